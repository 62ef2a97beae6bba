use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{error, info};

use super::error::Error;
use super::handler::RequestHandler;
use super::Result;

pub struct ServerListener {
    http_listener: TcpListener,
}

impl ServerListener {
    pub async fn new(addr: SocketAddr) -> Result<Self> {
        let http_listener = TcpListener::bind(addr).await.map_err(|e| {
            error!(error = %e, %addr, "HTTP 포트 바인딩 실패");
            Error::BindError { addr, source: e }
        })?;

        info!(%addr, "HTTP 리스너 시작");
        Ok(Self { http_listener })
    }

    /// 이미 바인딩된 리스너로 만듭니다. 테스트에서 `127.0.0.1:0`을 쓸 때 사용합니다.
    pub fn from_listener(http_listener: TcpListener) -> Self {
        Self { http_listener }
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.http_listener.local_addr()?)
    }

    /// `shutdown`이 완료될 때까지 연결을 받고, 이후 열린 연결들에 종료를 알립니다.
    pub async fn run_until<F>(self, handler: Arc<RequestHandler>, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let (stop_tx, stop_rx) = watch::channel(false);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                result = self.http_listener.accept() => {
                    match result {
                        Ok((stream, _)) => {
                            let handler = handler.clone();
                            let stop_rx = stop_rx.clone();
                            tokio::spawn(async move {
                                let io = TokioIo::new(stream);
                                if let Err(err) = handler.handle_connection(io, stop_rx).await {
                                    error!(error = %err, "HTTP 연결 처리 실패");
                                }
                            });
                        }
                        Err(e) => {
                            error!(error = %e, "HTTP 연결 수락 실패");
                        }
                    }
                }

                _ = &mut shutdown => {
                    info!("종료 신호 수신, 연결 수락 중단");
                    break;
                }
            }
        }

        // 수신자가 모두 끝났으면 send가 실패하는데, 알릴 연결이 없다는 뜻입니다.
        let _ = stop_tx.send(true);
        Ok(())
    }
}
