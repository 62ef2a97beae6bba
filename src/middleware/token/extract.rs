use hyper::header;

use crate::context::{keys, ContextError, ContextKey};
use crate::request::Request;
use serde_json::Value;

const BEARER: &str = "Bearer";

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("no token value in parameter={0}")]
    MissingParameter(String),

    #[error("token parameter={0} is not a string")]
    NotAString(String),

    #[error("error reading token parameter={name} err={message}")]
    Body {
        name: String,
        message: String,
    },

    #[error("No Authorization header value")]
    MissingHeader,

    #[error("Authorization header parse failed")]
    MalformedHeader,

    #[error(transparent)]
    Context(#[from] ContextError),
}

/// 토큰을 어디에서 꺼낼지에 대한 설정. 설정된 한 곳만 조회합니다.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenSource {
    /// 파싱된 JSON 맵의 `name` 속성, 없으면 같은 이름의 폼 값
    Parameter {
        name: String,
        json_key: ContextKey,
    },
    /// `Authorization: Bearer <token>` 헤더
    BearerHeader,
}

impl TokenSource {
    /// [`keys::REQUEST_JSON`]의 JSON 맵을 보는 파라미터 소스
    pub fn parameter(name: impl Into<String>) -> Self {
        TokenSource::Parameter {
            name: name.into(),
            json_key: keys::REQUEST_JSON,
        }
    }

    pub fn bearer() -> Self {
        TokenSource::BearerHeader
    }
}

/// 요청에서 토큰 문자열을 추출합니다.
pub async fn extract_token(req: &mut Request, source: &TokenSource) -> Result<String, TokenError> {
    match source {
        TokenSource::Parameter { name, json_key } => from_parameter(req, name, json_key).await,
        TokenSource::BearerHeader => from_bearer_header(req),
    }
}

async fn from_parameter(
    req: &mut Request,
    name: &str,
    json_key: &ContextKey,
) -> Result<String, TokenError> {
    let from_json = match req.context().get_json(json_key)?.and_then(|map| map.get(name)) {
        Some(Value::String(token)) => token.clone(),
        Some(Value::Null) | None => String::new(),
        Some(_) => return Err(TokenError::NotAString(name.to_string())),
    };
    if !from_json.is_empty() {
        return Ok(from_json);
    }

    let from_form = req.form_value(name).await.map_err(|e| TokenError::Body {
        name: name.to_string(),
        message: e.to_string(),
    })?;
    if from_form.is_empty() {
        return Err(TokenError::MissingParameter(name.to_string()));
    }
    Ok(from_form)
}

fn from_bearer_header(req: &Request) -> Result<String, TokenError> {
    let value = match req.headers().get(header::AUTHORIZATION) {
        Some(value) => value.to_str().map_err(|_| TokenError::MalformedHeader)?,
        None => return Err(TokenError::MissingHeader),
    };
    if value.is_empty() {
        return Err(TokenError::MissingHeader);
    }

    value
        .rfind(BEARER)
        .map(|index| value[index + BEARER.len()..].trim())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .ok_or(TokenError::MalformedHeader)
}
