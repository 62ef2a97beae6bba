//! HTTP/1 서버
//!
//! 연결마다 태스크를 하나 띄우고, 요청을 [`crate::request::Request`]로 바꿔
//! 핸들러 체인에 넘긴 뒤 [`crate::response::ResponseWriter`]를 hyper 응답으로 돌려줍니다.

pub mod error;
pub mod handler;
pub mod listener;

pub use error::Error;
pub use handler::RequestHandler;
pub use listener::ServerListener;

pub type Result<T> = std::result::Result<T, Error>;

use std::future::Future;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::middleware::SharedHandler;

/// 바인딩된 리스너에서 `handler`를 `shutdown`이 끝날 때까지 서비스합니다.
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    handler: SharedHandler,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()>,
{
    let handler = Arc::new(RequestHandler::new(handler));
    ServerListener::from_listener(listener)
        .run_until(handler, shutdown)
        .await
}
