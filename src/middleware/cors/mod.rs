//! CORS 헤더 미들웨어

mod config;
mod middleware;

pub use config::CorsConfig;
pub use middleware::Cors;
