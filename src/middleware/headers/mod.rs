//! 응답 헤더 미들웨어

mod middleware;

pub use middleware::JsonContentType;
