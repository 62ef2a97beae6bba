use crate::middleware::{Handler, Middleware, MiddlewareError};
use crate::request::Request;
use crate::response::ResponseWriter;
use super::config::CorsConfig;
use async_trait::async_trait;
use hyper::header::{self, HeaderValue};
use tracing::{debug, instrument};

/// CORS 미들웨어
///
/// `Access-Control-Allow-Origin`과 `Access-Control-Allow-Headers`를 설정한 뒤
/// 항상 다음 핸들러로 넘깁니다.
#[derive(Debug, Clone)]
pub struct Cors {
    /// `None`이면 요청 Origin을 반사
    origin: Option<HeaderValue>,
    allow_headers: HeaderValue,
}

impl Cors {
    /// 헤더 값으로 쓸 수 없는 설정이면 `MiddlewareError::Config`를 반환합니다.
    pub fn new(config: CorsConfig) -> Result<Self, MiddlewareError> {
        let origin = if config.domain.is_empty() {
            None
        } else {
            Some(HeaderValue::from_str(&config.domain).map_err(|e| {
                MiddlewareError::Config(format!("잘못된 CORS 도메인 {:?}: {}", config.domain, e))
            })?)
        };

        let allow_headers = HeaderValue::from_str(&config.allow_headers_value())
            .map_err(|e| MiddlewareError::Config(format!("잘못된 CORS 허용 헤더: {}", e)))?;

        Ok(Self { origin, allow_headers })
    }

    pub fn reflect_origin() -> Self {
        Self {
            origin: None,
            allow_headers: HeaderValue::from_static("Content-Type"),
        }
    }
}

#[async_trait]
impl Middleware for Cors {
    fn name(&self) -> &str {
        "cors"
    }

    #[instrument(skip_all)]
    async fn handle(
        &self,
        w: &mut ResponseWriter,
        req: Request,
        next: &dyn Handler,
    ) -> Result<(), MiddlewareError> {
        let origin = match &self.origin {
            Some(origin) => Some(origin.clone()),
            None => req.headers().get(header::ORIGIN).cloned(),
        };

        let headers = w.headers_mut();
        match origin {
            Some(origin) => {
                debug!(?origin, "CORS origin 설정");
                headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
            }
            None => debug!("반사할 Origin 헤더가 없음"),
        }
        headers.append(header::ACCESS_CONTROL_ALLOW_HEADERS, self.allow_headers.clone());

        next.serve(w, req).await;
        Ok(())
    }
}
