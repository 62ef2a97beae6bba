//! 토큰 추출 및 검증 미들웨어

mod extract;
mod middleware;

pub use extract::{extract_token, TokenError, TokenSource};
pub use middleware::{TokenToContext, TokenValidator, ValidateToken, ValidationError, validator_fn};
