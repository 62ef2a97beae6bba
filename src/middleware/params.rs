//! 파라미터 관련 미들웨어

use async_trait::async_trait;
use hyper::Method;
use tracing::debug;

use crate::context::{keys, ContextKey};
use crate::middleware::{Handler, Middleware, MiddlewareError};
use crate::request::Request;
use crate::response::ResponseWriter;

/// 라우터 경로 파라미터 하나를 컨텍스트 키로 옮깁니다.
///
/// 라우터 파라미터가 없거나 값이 비어 있으면 아무것도 하지 않고 넘어갑니다.
#[derive(Debug, Clone)]
pub struct ParamToContext {
    key: ContextKey,
    param_name: String,
}

impl ParamToContext {
    pub fn new(key: ContextKey, param_name: impl Into<String>) -> Self {
        Self {
            key,
            param_name: param_name.into(),
        }
    }
}

#[async_trait]
impl Middleware for ParamToContext {
    fn name(&self) -> &str {
        "param-to-context"
    }

    async fn handle(
        &self,
        w: &mut ResponseWriter,
        mut req: Request,
        next: &dyn Handler,
    ) -> Result<(), MiddlewareError> {
        let value = req
            .context()
            .get_params(&keys::ROUTER_PARAMS)?
            .map(|params| params.by_name(&self.param_name).to_string())
            .unwrap_or_default();

        if !value.is_empty() {
            req.set_value(self.key, value);
        }
        next.serve(w, req).await;
        Ok(())
    }
}

/// 선언된 메서드 기준으로 필수 파라미터를 검사합니다.
///
/// - GET: 비어 있지 않은 쿼리 파라미터
/// - POST / PUT: 비어 있지 않은 폼 값 (폼 본문을 파싱합니다)
/// - 그 외 메서드: 검사하지 않음
#[derive(Debug, Clone)]
pub struct RequiredParams {
    method: Method,
    params: Vec<String>,
}

impl RequiredParams {
    pub fn new(method: Method, params: &[&str]) -> Self {
        Self {
            method,
            params: params.iter().map(|p| p.to_string()).collect(),
        }
    }
}

#[async_trait]
impl Middleware for RequiredParams {
    fn name(&self) -> &str {
        "required-params"
    }

    async fn handle(
        &self,
        w: &mut ResponseWriter,
        mut req: Request,
        next: &dyn Handler,
    ) -> Result<(), MiddlewareError> {
        for param in &self.params {
            match self.method {
                Method::GET => {
                    if req.query_param(param).is_empty() {
                        return Err(MiddlewareError::MissingUrlParameter(param.clone()));
                    }
                }
                Method::POST | Method::PUT => {
                    let value = req
                        .form_value(param)
                        .await
                        .map_err(|e| MiddlewareError::BodyRead(e.to_string()))?;
                    if value.is_empty() {
                        let remaining = req.read_unconsumed_body().await;
                        debug!(param = %param, "필수 본문 파라미터 누락");
                        return Err(MiddlewareError::MissingBodyParameter {
                            name: param.clone(),
                            remaining,
                        });
                    }
                }
                _ => {}
            }
        }
        next.serve(w, req).await;
        Ok(())
    }
}
