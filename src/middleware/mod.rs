//! 미들웨어(어댑터)와 체인 합성
//!
//! 각 미들웨어는 [`Middleware`]를 구현하고, [`adapt`] 또는 [`MiddlewareChain`]으로
//! 말단 [`Handler`]를 감싸서 하나의 핸들러로 합성합니다. 목록의 첫 미들웨어가 가장
//! 바깥쪽에서 실행됩니다.

pub mod auth;
pub mod chain;
pub mod cors;
pub mod error;
pub mod headers;
pub mod json;
pub mod once;
pub mod params;
pub mod token;
pub mod traits;
pub mod write;

pub use auth::{AuthBouncer, AuthPermitAll};
pub use chain::{adapt, wrap, HandlerFnAdapter, MiddlewareChain};
pub use cors::{Cors, CorsConfig};
pub use error::MiddlewareError;
pub use headers::JsonContentType;
pub use json::JsonToContext;
pub use once::CallOnce;
pub use params::{ParamToContext, RequiredParams};
pub use token::{validator_fn, TokenSource, TokenToContext, TokenValidator, ValidateToken};
pub use traits::{handler_fn, noop, Adapter, Handler, HandlerFn, Middleware, Noop, SharedHandler};
pub use write::WriteResponse;
