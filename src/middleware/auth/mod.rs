//! 인가 미들웨어
//!
//! 앞 단계(토큰 검증, 권한 조회 등)가 컨텍스트에 남긴 인가 결과를 보고 통과 여부를 결정합니다.

mod bouncer;
mod permit;

pub use bouncer::AuthBouncer;
pub use permit::AuthPermitAll;
