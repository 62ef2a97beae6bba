use async_trait::async_trait;
use tracing::debug;

use crate::context::{ContextKey, ContextValue};
use crate::middleware::{Handler, Middleware, MiddlewareError};
use crate::request::Request;
use crate::response::ResponseWriter;

/// 인가 게이트
///
/// - 요구 식별자가 없으면 컨텍스트 값이 정확히 `true`일 때 통과
/// - 요구 식별자가 있으면 컨텍스트의 문자열 목록에 그 식별자가 있을 때 통과
///
/// 실패하면 403 Forbidden으로 체인을 중단합니다. 다른 타입의 값은 실패로 취급합니다.
#[derive(Debug, Clone)]
pub struct AuthBouncer {
    key: ContextKey,
    required_ident: Option<String>,
}

impl AuthBouncer {
    /// 불리언 인가 플래그를 검사합니다.
    pub fn new(key: ContextKey) -> Self {
        Self {
            key,
            required_ident: None,
        }
    }

    /// 권한 식별자 목록에 `ident`가 있는지 검사합니다.
    pub fn requiring(key: ContextKey, ident: impl Into<String>) -> Self {
        Self {
            key,
            required_ident: Some(ident.into()),
        }
    }

    fn passes(&self, req: &Request) -> bool {
        let value = req.context().get(&self.key);
        match &self.required_ident {
            Some(ident) => matches!(
                value,
                Some(ContextValue::Strings(idents)) if idents.iter().any(|id| id == ident)
            ),
            None => matches!(value, Some(ContextValue::Bool(true))),
        }
    }
}

#[async_trait]
impl Middleware for AuthBouncer {
    fn name(&self) -> &str {
        "auth-bouncer"
    }

    async fn handle(
        &self,
        w: &mut ResponseWriter,
        req: Request,
        next: &dyn Handler,
    ) -> Result<(), MiddlewareError> {
        if !self.passes(&req) {
            debug!(key = %self.key, ident = ?self.required_ident, "인가 실패");
            return Err(MiddlewareError::Forbidden);
        }
        next.serve(w, req).await;
        Ok(())
    }
}
