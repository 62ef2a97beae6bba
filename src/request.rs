//! 체인이 다루는 요청 타입
//!
//! hyper 요청의 헤더 부분, 한 번만 읽을 수 있는 본문 스트림, 그리고 요청 단위
//! [`Context`]를 함께 들고 다닙니다. 본문은 [`Request::read_body`]로 처음 읽을 때
//! 컨텍스트의 [`keys::REQUEST_BODY`]에 캐시되며, 이후의 모든 소비자는 캐시를 읽습니다.

use bytes::Bytes;
use http_body_util::combinators::UnsyncBoxBody;
use http_body_util::BodyExt;
use hyper::http::request::Parts;
use hyper::{header, HeaderMap, Method, Uri};
use tracing::debug;

use crate::context::{keys, Context, ContextKey, ContextValue};

pub type BodyError = Box<dyn std::error::Error + Send + Sync>;

/// 타입이 지워진 요청 본문
pub type Body = UnsyncBoxBody<Bytes, BodyError>;

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

pub struct Request {
    parts: Parts,
    body: Option<Body>,
    context: Context,
}

impl Request {
    /// hyper 요청을 빈 컨텍스트와 함께 감쌉니다.
    pub fn from_hyper<B>(req: hyper::Request<B>) -> Self
    where
        B: hyper::body::Body<Data = Bytes> + Send + 'static,
        B::Error: Into<BodyError>,
    {
        let (parts, body) = req.into_parts();
        Self {
            parts,
            body: Some(body.map_err(Into::into).boxed_unsync()),
            context: Context::new(),
        }
    }

    pub fn method(&self) -> &Method {
        &self.parts.method
    }

    pub fn uri(&self) -> &Uri {
        &self.parts.uri
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.parts.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.parts.headers
    }

    /// 헤더 값을 문자열로 읽습니다. 없거나 ASCII가 아니면 `None`.
    pub fn header(&self, name: impl header::AsHeaderName) -> Option<&str> {
        self.parts.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// 컨텍스트를 확장한 요청을 반환합니다.
    pub fn with_value(mut self, key: ContextKey, value: impl Into<ContextValue>) -> Self {
        self.set_value(key, value);
        self
    }

    /// 이 요청이 들고 있는 컨텍스트를 확장합니다.
    ///
    /// 기존 컨텍스트 노드는 변경되지 않으므로, 이전에 복제해 둔 스냅샷에는 보이지 않습니다.
    pub fn set_value(&mut self, key: ContextKey, value: impl Into<ContextValue>) {
        self.context = self.context.with_value(key, value);
    }

    /// 첫 번째 쿼리 파라미터 값을 반환합니다. 없으면 빈 문자열입니다.
    pub fn query_param(&self, name: &str) -> String {
        self.parts
            .uri
            .query()
            .and_then(|query| {
                url::form_urlencoded::parse(query.as_bytes())
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| value.into_owned())
            })
            .unwrap_or_default()
    }

    /// 본문 스트림을 아직 아무도 읽지 않았는지 여부
    pub fn has_unread_body(&self) -> bool {
        self.body.is_some()
    }

    /// 본문 전체를 반환합니다.
    ///
    /// 스트림은 요청당 최대 한 번만 읽히며, 결과는 [`keys::REQUEST_BODY`]에 캐시됩니다.
    /// 읽기에 실패하면 스트림은 소모된 상태로 남고 캐시는 만들어지지 않습니다.
    pub async fn read_body(&mut self) -> Result<Bytes, BodyError> {
        if let Some(cached) = self.context.get_bytes(&keys::REQUEST_BODY)? {
            return Ok(cached.clone());
        }

        let bytes = match self.body.take() {
            Some(body) => body.collect().await?.to_bytes(),
            None => Bytes::new(),
        };
        debug!(len = bytes.len(), "요청 본문 읽기 완료");

        self.set_value(keys::REQUEST_BODY, bytes.clone());
        Ok(bytes)
    }

    /// 아직 소비되지 않은 본문을 문자열로 읽습니다. 이미 소비되었으면 빈 문자열입니다.
    pub async fn read_unconsumed_body(&mut self) -> String {
        if !self.has_unread_body() {
            return String::new();
        }
        match self.read_body().await {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(_) => String::new(),
        }
    }

    pub fn is_form_encoded(&self) -> bool {
        self.header(header::CONTENT_TYPE)
            .map(|value| {
                value
                    .split(';')
                    .next()
                    .map(|mime| mime.trim().eq_ignore_ascii_case(FORM_URLENCODED))
                    .unwrap_or(false)
            })
            .unwrap_or(false)
    }

    fn has_writable_method(&self) -> bool {
        matches!(
            self.parts.method,
            Method::POST | Method::PUT | Method::PATCH
        )
    }

    /// 폼 값을 조회합니다.
    ///
    /// 쓰기 메서드이고 `application/x-www-form-urlencoded` 본문이면 본문을 먼저
    /// 읽어서(캐시 사용) 찾고, 없으면 쿼리 파라미터를 봅니다.
    pub async fn form_value(&mut self, name: &str) -> Result<String, BodyError> {
        if self.has_writable_method() && self.is_form_encoded() {
            let body = self.read_body().await?;
            if let Some((_, value)) =
                url::form_urlencoded::parse(&body).find(|(key, _)| key == name)
            {
                return Ok(value.into_owned());
            }
        }
        Ok(self.query_param(name))
    }

    /// `apiKey` / `apikey` 쿼리 파라미터, 그다음 같은 이름의 폼 값 순으로 API 키를 찾습니다.
    pub async fn api_key(&mut self) -> Result<String, BodyError> {
        for name in ["apiKey", "apikey"] {
            let value = self.query_param(name);
            if !value.is_empty() {
                return Ok(value);
            }
        }
        for name in ["apiKey", "apikey"] {
            let value = self.form_value(name).await?;
            if !value.is_empty() {
                return Ok(value);
            }
        }
        Ok(String::new())
    }
}

impl std::fmt::Debug for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Request")
            .field("method", &self.parts.method)
            .field("uri", &self.parts.uri)
            .field("headers", &self.parts.headers)
            .field("body_unread", &self.body.is_some())
            .field("context", &self.context)
            .finish()
    }
}
