//! 응답 싱크
//!
//! 핸들러와 미들웨어는 [`ResponseWriter`]에 상태 코드, 헤더, 본문을 씁니다.
//! 체인 실행이 끝나면 [`ResponseWriter::into_response`]로 hyper 응답을 만듭니다.

use bytes::{Bytes, BytesMut};
use http_body_util::Full;
use hyper::header::{self, HeaderValue};
use hyper::{HeaderMap, Response, StatusCode};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WriteError {
    #[error("응답 본문 한도 {limit} 바이트 초과")]
    LimitExceeded { limit: usize },

    #[error("JSON 직렬화 실패: {0}")]
    Serialize(String),
}

#[derive(Debug, Default)]
pub struct ResponseWriter {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: BytesMut,
    limit: Option<usize>,
}

impl ResponseWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 본문 크기 한도를 둔 응답 싱크. 한도를 넘는 쓰기는 실패합니다.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// 현재 상태 코드. 아직 아무것도 쓰지 않았다면 200입니다.
    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::OK)
    }

    /// 상태 코드나 본문이 이미 기록되었는지 여부
    pub fn is_committed(&self) -> bool {
        self.status.is_some()
    }

    /// 상태 코드를 기록합니다. 처음 기록된 값만 유효합니다.
    pub fn write_header(&mut self, status: StatusCode) {
        match self.status {
            Some(current) => {
                debug!(%current, ignored = %status, "상태 코드가 이미 기록됨");
            }
            None => self.status = Some(status),
        }
    }

    pub fn write(&mut self, data: &[u8]) -> Result<usize, WriteError> {
        if let Some(limit) = self.limit {
            if self.body.len() + data.len() > limit {
                return Err(WriteError::LimitExceeded { limit });
            }
        }
        if self.status.is_none() {
            self.status = Some(StatusCode::OK);
        }
        self.body.extend_from_slice(data);
        Ok(data.len())
    }

    pub fn write_str(&mut self, data: &str) -> Result<usize, WriteError> {
        self.write(data.as_bytes())
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn body_string(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn into_response(self) -> Response<Full<Bytes>> {
        let mut response = Response::new(Full::new(self.body.freeze()));
        *response.status_mut() = self.status.unwrap_or(StatusCode::OK);
        *response.headers_mut() = self.headers;
        response
    }
}

/// 평문 에러 응답을 씁니다.
///
/// 본문은 `message` 뒤에 줄바꿈을 붙인 것이며, 본문 쓰기가 실패해도 상태 코드는 남습니다.
pub fn http_error(w: &mut ResponseWriter, message: &str, status: StatusCode) {
    let headers = w.headers_mut();
    headers.remove(header::CONTENT_LENGTH);
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    w.write_header(status);
    if let Err(e) = w.write_str(&format!("{}\n", message)) {
        debug!(error = %e, "에러 응답 본문 쓰기 실패");
    }
}

/// 값을 JSON으로 직렬화해서 응답 본문에 씁니다.
pub fn json_out<T: Serialize + ?Sized>(w: &mut ResponseWriter, value: &T) -> Result<(), WriteError> {
    let body = serde_json::to_vec(value).map_err(|e| WriteError::Serialize(e.to_string()))?;
    w.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    w.write(&body)?;
    Ok(())
}
