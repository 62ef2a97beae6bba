//! JSON 본문 수집 미들웨어

use async_trait::async_trait;
use hyper::Method;
use serde_json::{Deserializer, Value};
use tracing::debug;

use crate::context::{keys, ContextKey, JsonMap};
use crate::middleware::{Handler, Middleware, MiddlewareError};
use crate::request::Request;
use crate::response::ResponseWriter;

/// 요청 본문(또는 GET 쿼리)을 범용 맵으로 파싱해서 컨텍스트에 저장합니다.
///
/// 대상 키에 이미 값이 있고 `reset`이 아니면 다시 파싱하지 않고 필수 속성만 재검증합니다.
/// 본문 스트림은 [`Request::read_body`]로 읽으므로, 같은 체인에 이 미들웨어가 여러 번
/// 있어도 실제 읽기는 한 번뿐입니다.
///
/// 필수 속성이 설정되어 있는데 본문을 읽지 못했거나 비어 있으면 항상 400으로 실패합니다.
/// 필수 속성이 없으면 그런 경우 파싱 없이 다음 핸들러로 넘어갑니다.
/// JSON 디코딩 실패는 필수 속성 여부와 관계없이 400입니다.
#[derive(Debug, Clone)]
pub struct JsonToContext {
    key: ContextKey,
    reset: bool,
    required: Vec<String>,
}

impl JsonToContext {
    pub fn new(key: ContextKey, reset: bool, required: &[&str]) -> Self {
        Self {
            key,
            reset,
            required: required.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// [`keys::REQUEST_JSON`]에 저장하는 기본 설정
    pub fn required(required: &[&str]) -> Self {
        Self::new(keys::REQUEST_JSON, false, required)
    }

    fn check_required(&self, map: &JsonMap) -> Result<(), MiddlewareError> {
        match self.required.iter().find(|prop| !map.contains_key(prop.as_str())) {
            Some(missing) => Err(MiddlewareError::MissingJsonProperty(missing.clone())),
            None => Ok(()),
        }
    }

    async fn ingest(&self, req: &mut Request) -> Result<JsonMap, MiddlewareError> {
        let mut map = JsonMap::new();

        if matches!(*req.method(), Method::POST | Method::PUT | Method::PATCH) {
            let body = match req.read_body().await {
                Ok(body) => body,
                Err(e) if !self.required.is_empty() => {
                    return Err(MiddlewareError::BodyRead(e.to_string()));
                }
                Err(e) => {
                    debug!(error = %e, "본문 읽기 실패, 필수 속성이 없어 건너뜀");
                    return Ok(map);
                }
            };

            if body.is_empty() {
                if !self.required.is_empty() {
                    return Err(MiddlewareError::EmptyBody);
                }
                return Ok(map);
            }

            map = decode_first_object(&body)?;
            self.check_required(&map)?;
        }

        if *req.method() == Method::GET && !self.required.is_empty() {
            for prop in &self.required {
                let value = req.query_param(prop);
                if value.is_empty() {
                    return Err(MiddlewareError::MissingUrlParameter(prop.clone()));
                }
                map.insert(prop.clone(), Value::String(value));
            }
        }

        Ok(map)
    }
}

/// 본문 앞쪽의 첫 JSON 객체만 디코딩합니다. 그 뒤에 오는 데이터는 무시합니다.
fn decode_first_object(body: &[u8]) -> Result<JsonMap, MiddlewareError> {
    match Deserializer::from_slice(body).into_iter::<JsonMap>().next() {
        Some(Ok(map)) => Ok(map),
        Some(Err(e)) => Err(MiddlewareError::MalformedJson(e.to_string())),
        None => Err(MiddlewareError::MalformedJson("EOF".to_string())),
    }
}

#[async_trait]
impl Middleware for JsonToContext {
    fn name(&self) -> &str {
        "json-to-context"
    }

    async fn handle(
        &self,
        w: &mut ResponseWriter,
        mut req: Request,
        next: &dyn Handler,
    ) -> Result<(), MiddlewareError> {
        let already_parsed = match req.context().get_json(&self.key) {
            _ if self.reset => false,
            Ok(Some(existing)) => {
                self.check_required(existing)?;
                true
            }
            Ok(None) => false,
            Err(e) => return Err(e.into()),
        };
        if already_parsed {
            next.serve(w, req).await;
            return Ok(());
        }

        let map = self.ingest(&mut req).await?;
        if !map.is_empty() {
            debug!(key = %self.key, props = map.len(), "JSON 맵을 컨텍스트에 저장");
            req.set_value(self.key, map);
        }
        next.serve(w, req).await;
        Ok(())
    }
}
