use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::context::ContextKey;
use crate::middleware::{Handler, Middleware, MiddlewareError};
use crate::request::Request;
use crate::response::ResponseWriter;
use super::extract::{extract_token, TokenError, TokenSource};

pub type ValidationError = Box<dyn std::error::Error + Send + Sync>;

/// 외부에서 주입하는 토큰 검증 로직
pub trait TokenValidator: Send + Sync {
    fn validate(&self, token: &str, req: &Request) -> Result<bool, ValidationError>;
}

impl<F> TokenValidator for F
where
    F: Fn(&str, &Request) -> Result<bool, ValidationError> + Send + Sync,
{
    fn validate(&self, token: &str, req: &Request) -> Result<bool, ValidationError> {
        self(token, req)
    }
}

/// 클로저의 시그니처를 고정해서 [`TokenValidator`]로 쓸 수 있게 합니다.
pub fn validator_fn<F>(f: F) -> F
where
    F: Fn(&str, &Request) -> Result<bool, ValidationError> + Send + Sync,
{
    f
}

/// 토큰을 추출해서 컨텍스트에 저장합니다. 추출에 실패하면 401입니다.
#[derive(Debug, Clone)]
pub struct TokenToContext {
    key: ContextKey,
    source: TokenSource,
}

impl TokenToContext {
    pub fn new(key: ContextKey, source: TokenSource) -> Self {
        Self { key, source }
    }
}

#[async_trait]
impl Middleware for TokenToContext {
    fn name(&self) -> &str {
        "token-to-context"
    }

    async fn handle(
        &self,
        w: &mut ResponseWriter,
        mut req: Request,
        next: &dyn Handler,
    ) -> Result<(), MiddlewareError> {
        let token = match extract_token(&mut req, &self.source).await {
            Ok(token) => token,
            Err(TokenError::Context(e)) => return Err(e.into()),
            Err(e) => return Err(e.into()),
        };
        next.serve(w, req.with_value(self.key, token)).await;
        Ok(())
    }
}

/// 컨텍스트의 토큰을 검증합니다.
///
/// 토큰이 없거나 비어 있거나 검증 결과가 `false`면 401, 검증 함수가 에러를
/// 반환해도 401입니다. `true`일 때만 다음 핸들러로 넘어갑니다.
#[derive(Clone)]
pub struct ValidateToken {
    key: ContextKey,
    validator: Arc<dyn TokenValidator>,
}

impl ValidateToken {
    pub fn new<V: TokenValidator + 'static>(key: ContextKey, validator: V) -> Self {
        Self {
            key,
            validator: Arc::new(validator),
        }
    }
}

#[async_trait]
impl Middleware for ValidateToken {
    fn name(&self) -> &str {
        "validate-token"
    }

    async fn handle(
        &self,
        w: &mut ResponseWriter,
        req: Request,
        next: &dyn Handler,
    ) -> Result<(), MiddlewareError> {
        let token = req.context().get_str(&self.key)?;
        if token.is_empty() {
            return Err(MiddlewareError::TokenNotPresent);
        }

        match self.validator.validate(token, &req) {
            Ok(true) => {}
            Ok(false) => return Err(MiddlewareError::TokenNotPresent),
            Err(e) => {
                debug!(error = %e, "토큰 검증 실패");
                return Err(MiddlewareError::TokenInvalid);
            }
        }

        next.serve(w, req).await;
        Ok(())
    }
}
