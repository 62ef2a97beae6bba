use async_trait::async_trait;
use std::sync::Arc;

use crate::request::Request;
use crate::response::ResponseWriter;
use super::MiddlewareError;

/// 요청 핸들러 트레이트
///
/// 체인의 말단 핸들러이자, 미들웨어로 감싼 결과이기도 합니다.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn serve(&self, w: &mut ResponseWriter, req: Request);
}

pub type SharedHandler = Arc<dyn Handler>;

/// 미들웨어(어댑터) 트레이트
///
/// `next`를 호출하지 않고 반환하면 체인이 그 자리에서 끝납니다. `Err`를 반환하면
/// 체인 래퍼가 에러 응답을 쓰고 이후 단계는 실행되지 않습니다.
#[async_trait]
pub trait Middleware: Send + Sync {
    /// 미들웨어의 고유 이름을 반환합니다.
    fn name(&self) -> &str;

    async fn handle(
        &self,
        w: &mut ResponseWriter,
        req: Request,
        next: &dyn Handler,
    ) -> Result<(), MiddlewareError>;
}

/// 체인에 넣을 수 있는 어댑터
pub type Adapter = Arc<dyn Middleware>;

/// 동기 함수 핸들러
pub struct HandlerFn<F>(F);

#[async_trait]
impl<F> Handler for HandlerFn<F>
where
    F: Fn(&mut ResponseWriter, &Request) + Send + Sync,
{
    async fn serve(&self, w: &mut ResponseWriter, req: Request) {
        (self.0)(w, &req)
    }
}

/// 함수를 핸들러로 만듭니다.
pub fn handler_fn<F>(f: F) -> SharedHandler
where
    F: Fn(&mut ResponseWriter, &Request) + Send + Sync + 'static,
{
    Arc::new(HandlerFn(f))
}

/// 아무것도 하지 않는 말단 핸들러
pub struct Noop;

#[async_trait]
impl Handler for Noop {
    async fn serve(&self, _w: &mut ResponseWriter, _req: Request) {}
}

pub fn noop() -> SharedHandler {
    Arc::new(Noop)
}
