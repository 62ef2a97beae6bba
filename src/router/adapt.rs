//! 라우터 호출 규약과 체인 핸들러를 잇는 심(shim)

use async_trait::async_trait;
use std::sync::Arc;

use crate::context::{keys, ContextError, ContextKey};
use crate::middleware::{
    adapt, handler_fn, noop, Adapter, AuthPermitAll, HandlerFnAdapter, SharedHandler,
};
use crate::request::Request;
use crate::response::ResponseWriter;
use super::Params;

/// 라우터가 호출하는 핸들 (요청과 함께 경로 파라미터를 받음)
#[async_trait]
pub trait RouteHandle: Send + Sync {
    async fn call(&self, w: &mut ResponseWriter, req: Request, params: Params);
}

pub type SharedRouteHandle = Arc<dyn RouteHandle>;

/// 경로 파라미터를 컨텍스트에 넣은 뒤 체인 핸들러를 실행합니다.
struct ParamsToContext {
    handler: SharedHandler,
    params_key: Option<ContextKey>,
}

#[async_trait]
impl RouteHandle for ParamsToContext {
    async fn call(&self, w: &mut ResponseWriter, mut req: Request, params: Params) {
        if let Some(key) = self.params_key {
            req.set_value(key, params);
        }
        self.handler.serve(w, req).await
    }
}

/// 핸들러를 라우트 핸들로 바꿉니다. `params_key`가 `None`이면 파라미터는 버려집니다.
pub fn compatible_handler(handler: SharedHandler, params_key: Option<ContextKey>) -> SharedRouteHandle {
    Arc::new(ParamsToContext { handler, params_key })
}

/// 어댑터를 합성한 뒤 라우트 핸들로 바꿉니다.
pub fn router_adapt(
    handler: SharedHandler,
    params_key: Option<ContextKey>,
    adapters: &[Adapter],
) -> SharedRouteHandle {
    compatible_handler(adapt(handler, adapters), params_key)
}

pub fn router_adapt_fn<F>(f: F, params_key: Option<ContextKey>, adapters: &[Adapter]) -> SharedRouteHandle
where
    F: Fn(&mut ResponseWriter, &Request) + Send + Sync + 'static,
{
    router_adapt(handler_fn(f), params_key, adapters)
}

/// `pre ++ adapters ++ [handler_fn] ++ post` 순서로 빈 말단 핸들러를 감쌉니다.
///
/// 경로 파라미터는 [`keys::ROUTER_PARAMS`]에 저장됩니다.
pub fn wrap_handler_adapters<F>(
    handler: F,
    adapters: &[Adapter],
    pre: &[Adapter],
    post: &[Adapter],
) -> SharedRouteHandle
where
    F: Fn(&mut ResponseWriter, &Request) + Send + Sync + 'static,
{
    let mut all: Vec<Adapter> = Vec::with_capacity(pre.len() + adapters.len() + post.len() + 1);
    all.extend(pre.iter().cloned());
    all.extend(adapters.iter().cloned());
    all.push(Arc::new(HandlerFnAdapter::new(handler)));
    all.extend(post.iter().cloned());

    router_adapt(noop(), Some(keys::ROUTER_PARAMS), &all)
}

/// CORS 사전 요청(OPTIONS)용 라우트 핸들
pub fn options_handle(cors: Adapter) -> SharedRouteHandle {
    wrap_handler_adapters(
        |_w: &mut ResponseWriter, _req: &Request| {},
        &[cors, Arc::new(AuthPermitAll::default())],
        &[],
        &[],
    )
}

/// 컨텍스트에 저장된 경로 파라미터를 읽습니다.
pub fn router_param(req: &Request, name: &str) -> Result<String, ContextError> {
    req.context()
        .get_params(&keys::ROUTER_PARAMS)?
        .map(|params| params.by_name(name).to_string())
        .ok_or(ContextError::NoParams)
}
