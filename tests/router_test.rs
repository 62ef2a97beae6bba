mod common;

use std::sync::Arc;

use adapter_chain::context::keys;
use adapter_chain::middleware::{adapt, handler_fn, Adapter, Cors, ParamToContext, SharedHandler};
use adapter_chain::router::{
    options_handle, router_adapt, router_adapt_fn, router_param, wrap_handler_adapters, Router,
    RoutingError,
};
use common::{entries, get, new_log, request, run, Recorder};
use hyper::{header, Method, StatusCode};

fn param_writer(name: &'static str) -> SharedHandler {
    handler_fn(move |w, req| match router_param(req, name) {
        Ok(value) => {
            w.write_str(&value).unwrap();
        }
        Err(e) => {
            w.write_str(&e.to_string()).unwrap();
        }
    })
}

#[tokio::test]
async fn test_router_adapt_deposits_params() {
    let adapters: Vec<Adapter> = vec![Arc::new(ParamToContext::new(keys::REQUEST_ID_PARAM, "id"))];
    let mut router = Router::new();
    router
        .get(
            "/items/:id",
            router_adapt_fn(
                |w, req| {
                    let id = req.context().get_str(&keys::REQUEST_ID_PARAM).unwrap();
                    w.write_str(id).unwrap();
                },
                Some(keys::ROUTER_PARAMS),
                &adapters,
            ),
        )
        .unwrap();
    let router: SharedHandler = Arc::new(router);

    let w = run(&router, get("/items/42")).await;

    assert_eq!(w.status(), StatusCode::OK);
    assert_eq!(w.body_string(), "42");
}

#[tokio::test]
async fn test_router_param_without_shim() {
    let mut router = Router::new();
    router
        .get("/items/:id", router_adapt(param_writer("id"), None, &[]))
        .unwrap()
        .get("/users/:id", router_adapt(param_writer("id"), Some(keys::ROUTER_PARAMS), &[]))
        .unwrap();
    let router: SharedHandler = Arc::new(router);

    let w = run(&router, get("/items/7")).await;
    assert_eq!(w.body_string(), "no parameters in context");

    let w = run(&router, get("/users/7")).await;
    assert_eq!(w.body_string(), "7");
}

#[tokio::test]
async fn test_wrap_handler_adapters_order() {
    let log = new_log();
    let fn_log = log.clone();
    let pre: Vec<Adapter> = vec![Arc::new(Recorder::new("pre", &log))];
    let adapters: Vec<Adapter> = vec![Arc::new(Recorder::new("mid", &log))];
    let post: Vec<Adapter> = vec![Arc::new(Recorder::new("post", &log))];

    let mut router = Router::new();
    router
        .get(
            "/items/:id",
            wrap_handler_adapters(
                move |w, req| {
                    let id = router_param(req, "id").unwrap();
                    fn_log.lock().unwrap().push(format!("fn:{}", id));
                    w.write_str(&id).unwrap();
                },
                &adapters,
                &pre,
                &post,
            ),
        )
        .unwrap();
    let router: SharedHandler = Arc::new(router);

    let w = run(&router, get("/items/9")).await;

    assert_eq!(w.body_string(), "9");
    assert_eq!(
        entries(&log),
        vec![
            "pre:before",
            "mid:before",
            "fn:9",
            "post:before",
            "post:after",
            "mid:after",
            "pre:after"
        ]
    );
}

#[tokio::test]
async fn test_options_handle_sets_cors_headers() {
    let mut router = Router::new();
    router
        .options("/*path", options_handle(Arc::new(Cors::reflect_origin())))
        .unwrap();
    let router: SharedHandler = Arc::new(router);

    let mut req = request(Method::OPTIONS, "/items/1", None, "");
    req.headers_mut()
        .insert(header::ORIGIN, "http://localhost:3000".parse().unwrap());
    let w = run(&router, req).await;

    assert_eq!(w.status(), StatusCode::OK);
    assert!(w.body().is_empty());
    assert_eq!(
        w.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:3000"
    );
    assert_eq!(
        w.headers().get(header::ACCESS_CONTROL_ALLOW_HEADERS).unwrap(),
        "Content-Type"
    );
}

#[tokio::test]
async fn test_not_found_and_method_not_allowed() {
    let mut router = Router::new();
    router
        .get("/items/:id", router_adapt(param_writer("id"), Some(keys::ROUTER_PARAMS), &[]))
        .unwrap()
        .delete("/items/:id", router_adapt(param_writer("id"), Some(keys::ROUTER_PARAMS), &[]))
        .unwrap();
    let router: SharedHandler = Arc::new(router);

    let w = run(&router, get("/nothing")).await;
    assert_eq!(w.status(), StatusCode::NOT_FOUND);
    assert_eq!(w.body_string(), "404 page not found\n");

    let w = run(&router, request(Method::POST, "/items/1", None, "")).await;
    assert_eq!(w.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(w.headers().get(header::ALLOW).unwrap(), "DELETE, GET");
}

#[tokio::test]
async fn test_registration_order_and_catch_all() {
    let mut router = Router::new();
    router
        .get(
            "/items/new",
            router_adapt_fn(|w, _req| { w.write_str("new").unwrap(); }, None, &[]),
        )
        .unwrap()
        .get("/items/:id", router_adapt(param_writer("id"), Some(keys::ROUTER_PARAMS), &[]))
        .unwrap()
        .get("/files/*path", router_adapt(param_writer("path"), Some(keys::ROUTER_PARAMS), &[]))
        .unwrap();
    let router: SharedHandler = Arc::new(router);

    assert_eq!(run(&router, get("/items/new")).await.body_string(), "new");
    assert_eq!(run(&router, get("/items/5")).await.body_string(), "5");
    assert_eq!(run(&router, get("/files/a/b.txt")).await.body_string(), "/a/b.txt");
}

#[test]
fn test_route_registration_errors() {
    let mut router = Router::new();
    router
        .get("/items/:id", router_adapt(adapt(param_writer("id"), &[]), None, &[]))
        .unwrap();

    assert!(matches!(
        router.get("/items/:id", router_adapt(param_writer("id"), None, &[])),
        Err(RoutingError::DuplicateRoute { .. })
    ));
    assert!(matches!(
        router.get("items", router_adapt(param_writer("id"), None, &[])),
        Err(RoutingError::InvalidPathPattern { .. })
    ));
    assert!(matches!(
        router.get("/a/*rest/b", router_adapt(param_writer("id"), None, &[])),
        Err(RoutingError::InvalidPathPattern { .. })
    ));
}
