use hyper::StatusCode;

use crate::context::ContextError;
use crate::response::{http_error, ResponseWriter, WriteError};
use super::token::TokenError;

#[derive(Debug, thiserror::Error)]
pub enum MiddlewareError {
    #[error("설정 오류: {0}")]
    Config(String),

    #[error("Missing required JSON property={0}")]
    MissingJsonProperty(String),

    #[error("Missing required url parameter={0}")]
    MissingUrlParameter(String),

    #[error("Missing required body parameter={name} val={remaining}")]
    MissingBodyParameter {
        name: String,
        remaining: String,
    },

    #[error("Error getting request body err={0}")]
    BodyRead(String),

    #[error("Please send a request body")]
    EmptyBody,

    #[error("error parsing json err={0}")]
    MalformedJson(String),

    #[error("Token not valid.")]
    TokenInvalid,

    #[error("Authorization token not valid or not present")]
    TokenNotPresent,

    #[error(transparent)]
    TokenExtraction(#[from] TokenError),

    #[error("Not authorized")]
    Forbidden,

    #[error(transparent)]
    Context(#[from] ContextError),

    #[error(transparent)]
    Write(#[from] WriteError),

    #[error("최초 1회 설정 실패: {0}")]
    SetupPanicked(String),
}

impl MiddlewareError {
    pub fn status(&self) -> StatusCode {
        match self {
            MiddlewareError::MissingJsonProperty(_)
            | MiddlewareError::MissingUrlParameter(_)
            | MiddlewareError::MissingBodyParameter { .. }
            | MiddlewareError::BodyRead(_)
            | MiddlewareError::EmptyBody
            | MiddlewareError::MalformedJson(_) => StatusCode::BAD_REQUEST,
            MiddlewareError::TokenInvalid
            | MiddlewareError::TokenNotPresent
            | MiddlewareError::TokenExtraction(_) => StatusCode::UNAUTHORIZED,
            MiddlewareError::Forbidden => StatusCode::FORBIDDEN,
            MiddlewareError::Config(_)
            | MiddlewareError::Context(_)
            | MiddlewareError::Write(_)
            | MiddlewareError::SetupPanicked(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 미들웨어 에러를 HTTP 에러 응답으로 씁니다.
    ///
    /// 내부 에러(설정, 컨텍스트 타입 불일치, 쓰기 실패)는 상세 내용을 응답에 싣지 않습니다.
    pub fn write_to(&self, w: &mut ResponseWriter) {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            http_error(w, "", status);
        } else {
            http_error(w, &self.to_string(), status);
        }
    }
}
