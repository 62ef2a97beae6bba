use async_trait::async_trait;

use crate::context::{keys, ContextKey};
use crate::middleware::{Handler, Middleware, MiddlewareError};
use crate::request::Request;
use crate::response::ResponseWriter;

/// 인가 플래그를 `true`로 설정해 공개 라우트를 통과시킵니다.
#[derive(Debug, Clone)]
pub struct AuthPermitAll {
    key: ContextKey,
}

impl AuthPermitAll {
    pub fn new(key: ContextKey) -> Self {
        Self { key }
    }
}

impl Default for AuthPermitAll {
    fn default() -> Self {
        Self::new(keys::ROUTE_AUTHORIZED)
    }
}

#[async_trait]
impl Middleware for AuthPermitAll {
    fn name(&self) -> &str {
        "auth-permit-all"
    }

    async fn handle(
        &self,
        w: &mut ResponseWriter,
        req: Request,
        next: &dyn Handler,
    ) -> Result<(), MiddlewareError> {
        next.serve(w, req.with_value(self.key, true)).await;
        Ok(())
    }
}
