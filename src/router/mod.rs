//! 경로 파라미터 라우터와 체인 연동
//!
//! 라우터는 `(응답, 요청, 파라미터)` 규약으로 [`RouteHandle`]을 호출합니다.
//! [`router_adapt`] 계열 함수는 체인 핸들러를 이 규약에 맞추고, 파라미터를
//! 컨텍스트의 잘 알려진 키에 넣어서 [`ParamToContext`] 같은 미들웨어가 읽을 수 있게 합니다.
//!
//! ```
//! use adapter_chain::router::{router_adapt_fn, Router};
//! use adapter_chain::context::keys;
//! use adapter_chain::middleware::{Adapter, JsonContentType};
//! use std::sync::Arc;
//!
//! let adapters: Vec<Adapter> = vec![Arc::new(JsonContentType)];
//! let mut router = Router::new();
//! router
//!     .get(
//!         "/items/:id",
//!         router_adapt_fn(|w, _req| { let _ = w.write_str("{}"); }, Some(keys::ROUTER_PARAMS), &adapters),
//!     )
//!     .unwrap();
//! ```
//!
//! [`ParamToContext`]: crate::middleware::ParamToContext

mod adapt;
mod error;
pub mod matcher;
mod params;
mod table;

pub use adapt::{
    compatible_handler, options_handle, router_adapt, router_adapt_fn, router_param,
    wrap_handler_adapters, RouteHandle, SharedRouteHandle,
};
pub use error::RoutingError;
pub use matcher::PathPattern;
pub use params::{Param, Params};
pub use table::Router;
