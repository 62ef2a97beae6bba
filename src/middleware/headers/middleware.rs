use crate::middleware::{Handler, Middleware, MiddlewareError};
use crate::request::Request;
use crate::response::ResponseWriter;
use async_trait::async_trait;
use hyper::header::{self, HeaderValue};

/// `Content-Type: application/json` 응답 헤더를 설정합니다.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonContentType;

impl JsonContentType {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Middleware for JsonContentType {
    fn name(&self) -> &str {
        "json-content-type"
    }

    async fn handle(
        &self,
        w: &mut ResponseWriter,
        req: Request,
        next: &dyn Handler,
    ) -> Result<(), MiddlewareError> {
        w.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json")
        );
        next.serve(w, req).await;
        Ok(())
    }
}
