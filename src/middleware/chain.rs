use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::request::Request;
use crate::response::ResponseWriter;
use super::{Adapter, Handler, Middleware, MiddlewareError, SharedHandler};

/// 미들웨어 하나로 다음 핸들러를 감싼 핸들러
struct Wrapped {
    middleware: Adapter,
    next: SharedHandler,
}

#[async_trait]
impl Handler for Wrapped {
    async fn serve(&self, w: &mut ResponseWriter, req: Request) {
        if let Err(err) = self.middleware.handle(w, req, self.next.as_ref()).await {
            debug!(
                middleware = self.middleware.name(),
                status = %err.status(),
                error = %err,
                "미들웨어가 체인을 중단함"
            );
            err.write_to(w);
        }
    }
}

/// `next`를 `middleware`로 감쌉니다.
pub fn wrap(middleware: Adapter, next: SharedHandler) -> SharedHandler {
    Arc::new(Wrapped { middleware, next })
}

/// `[A0, A1, ..., An-1]`을 `A0(A1(...(An-1(handler))))`로 합성합니다.
///
/// 목록의 첫 어댑터가 가장 바깥쪽이 되므로, 실행 시 전처리는 목록 순서대로,
/// 후처리는 역순으로 일어납니다. 빈 목록이면 `handler`를 그대로 돌려줍니다.
pub fn adapt(handler: SharedHandler, adapters: &[Adapter]) -> SharedHandler {
    adapters
        .iter()
        .rev()
        .fold(handler, |next, adapter| wrap(Arc::clone(adapter), next))
}

/// 어댑터 목록을 쌓아 두었다가 말단 핸들러와 합성하는 빌더
#[derive(Clone, Default)]
pub struct MiddlewareChain {
    middlewares: Vec<Adapter>,
}

impl MiddlewareChain {
    pub fn new() -> Self {
        Self {
            middlewares: Vec::new()
        }
    }

    /// 체인의 가장 안쪽(지금까지 추가된 것들 다음)에 미들웨어를 추가합니다.
    pub fn add<M: Middleware + 'static>(&mut self, middleware: M) -> &mut Self {
        self.middlewares.push(Arc::new(middleware));
        self
    }

    pub fn add_shared(&mut self, middleware: Adapter) -> &mut Self {
        self.middlewares.push(middleware);
        self
    }

    /// 다른 체인의 어댑터들을 뒤에 이어 붙입니다.
    pub fn extend(&mut self, other: &MiddlewareChain) -> &mut Self {
        self.middlewares.extend(other.middlewares.iter().cloned());
        self
    }

    pub fn names(&self) -> Vec<&str> {
        self.middlewares.iter().map(|m| m.name()).collect()
    }

    pub fn adapters(&self) -> &[Adapter] {
        &self.middlewares
    }

    pub fn len(&self) -> usize {
        self.middlewares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.middlewares.is_empty()
    }

    pub fn build(&self, handler: SharedHandler) -> SharedHandler {
        adapt(handler, &self.middlewares)
    }
}

type HandlerFnBox = dyn Fn(&mut ResponseWriter, &Request) + Send + Sync;

/// 일반 핸들러 함수를 실행한 뒤 다음 핸들러로 넘기는 어댑터
///
/// 핸들러 함수는 요청을 빌려 받으므로 컨텍스트를 확장할 수 없습니다.
#[derive(Clone)]
pub struct HandlerFnAdapter {
    handler: Arc<HandlerFnBox>,
}

impl HandlerFnAdapter {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&mut ResponseWriter, &Request) + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
        }
    }
}

#[async_trait]
impl Middleware for HandlerFnAdapter {
    fn name(&self) -> &str {
        "handler-fn"
    }

    async fn handle(
        &self,
        w: &mut ResponseWriter,
        req: Request,
        next: &dyn Handler,
    ) -> Result<(), MiddlewareError> {
        (self.handler)(w, &req);
        next.serve(w, req).await;
        Ok(())
    }
}
