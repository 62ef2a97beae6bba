use async_trait::async_trait;

use crate::middleware::{Handler, Middleware, MiddlewareError};
use crate::request::Request;
use crate::response::ResponseWriter;

/// 고정 문자열 한 줄을 응답에 쓰고 다음 핸들러로 넘깁니다.
///
/// 쓰기에 실패하면 500으로 체인을 중단합니다.
#[derive(Debug, Clone)]
pub struct WriteResponse {
    line: String,
}

impl WriteResponse {
    pub fn new(value: impl Into<String>) -> Self {
        let mut line = value.into();
        line.push('\n');
        Self { line }
    }
}

#[async_trait]
impl Middleware for WriteResponse {
    fn name(&self) -> &str {
        "write-response"
    }

    async fn handle(
        &self,
        w: &mut ResponseWriter,
        req: Request,
        next: &dyn Handler,
    ) -> Result<(), MiddlewareError> {
        w.write_str(&self.line)?;
        next.serve(w, req).await;
        Ok(())
    }
}
