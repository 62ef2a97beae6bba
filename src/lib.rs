//! Adapter Chain은 HTTP 핸들러 앞에 인증, CORS, JSON 수집, 토큰 검증 같은
//! 단계(어댑터)를 순서대로 쌓아 하나의 핸들러로 합성하는 라이브러리입니다.
//!
//! # 주요 기능
//!
//! - 어댑터 체인 합성 (목록의 첫 어댑터가 가장 바깥쪽)
//! - 요청 단위 컨텍스트 저장소 (확장해도 이전 스냅샷은 변하지 않음)
//! - 한 번만 읽히는 요청 본문의 캐시
//! - 경로 파라미터 라우터와의 연동
//!
//! # 예제
//!
//! ```
//! use adapter_chain::middleware::{adapt, handler_fn, Adapter, AuthBouncer, AuthPermitAll};
//! use adapter_chain::context::keys;
//! use std::sync::Arc;
//!
//! let adapters: Vec<Adapter> = vec![
//!     Arc::new(AuthPermitAll::default()),
//!     Arc::new(AuthBouncer::new(keys::ROUTE_AUTHORIZED)),
//! ];
//! let handler = adapt(handler_fn(|w, _req| { let _ = w.write_str("ok"); }), &adapters);
//! # let _ = handler;
//! ```

pub mod context;
pub mod logging;
pub mod middleware;
pub mod request;
pub mod response;
pub mod router;
pub mod server;
pub mod settings;
