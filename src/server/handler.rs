use std::convert::Infallible;
use std::time::Instant;

use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Response, StatusCode};
use tokio::sync::watch;
use tracing::debug;

use crate::logging::{log_request, RequestLog};
use crate::middleware::SharedHandler;
use crate::request::Request;
use crate::response::ResponseWriter;

/// 연결 단위로 hyper 요청을 받아 체인(보통 [`crate::router::Router`])에 넘깁니다.
pub struct RequestHandler {
    handler: SharedHandler,
}

impl RequestHandler {
    pub fn new(handler: SharedHandler) -> Self {
        Self { handler }
    }

    pub async fn handle_request(
        &self,
        req: hyper::Request<Incoming>,
    ) -> Result<Response<Full<Bytes>>, Infallible> {
        let started = Instant::now();
        let mut log = RequestLog::new();
        log.with_request(&req);

        let mut w = ResponseWriter::new();
        self.handler.serve(&mut w, Request::from_hyper(req)).await;

        let status = w.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            log.with_error(w.body_string().trim());
        }
        log.with_response(status, started.elapsed());
        log_request(&log);

        Ok(w.into_response())
    }

    /// 연결 하나를 끝까지 처리합니다. `shutdown`이 바뀌면 진행 중인 요청을 마친 뒤 연결을 닫습니다.
    pub async fn handle_connection<I>(
        &self,
        io: I,
        mut shutdown: watch::Receiver<bool>,
    ) -> Result<(), hyper::Error>
    where
        I: hyper::rt::Read + hyper::rt::Write + Send + Unpin + 'static,
    {
        let conn = http1::Builder::new()
            .serve_connection(io, service_fn(|req| self.handle_request(req)));
        tokio::pin!(conn);

        tokio::select! {
            result = conn.as_mut() => result,
            _ = shutdown.changed() => {
                debug!("종료 신호 수신, 연결을 정리합니다");
                conn.as_mut().graceful_shutdown();
                conn.await
            }
        }
    }
}
