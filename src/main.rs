use std::sync::Arc;

use hyper::StatusCode;
use serde_json::json;
use tracing::{error, info};

use adapter_chain::context::keys;
use adapter_chain::logging::init_logging;
use adapter_chain::middleware::{
    validator_fn, Adapter, AuthBouncer, AuthPermitAll, Cors, JsonContentType, JsonToContext,
    ParamToContext, TokenSource, TokenToContext, ValidateToken,
};
use adapter_chain::response::{http_error, json_out, ResponseWriter};
use adapter_chain::request::Request;
use adapter_chain::router::{options_handle, router_adapt_fn, Router};
use adapter_chain::server::{RequestHandler, ServerListener};
use adapter_chain::settings::Settings;

fn build_router(settings: &Settings) -> Result<Router, Box<dyn std::error::Error>> {
    let cors: Adapter = Arc::new(Cors::new(settings.cors.clone())?);
    let demo_token = settings.demo_token.clone();

    let read_item: Vec<Adapter> = vec![
        cors.clone(),
        Arc::new(JsonContentType),
        Arc::new(ParamToContext::new(keys::REQUEST_ID_PARAM, "id")),
    ];

    let create_item: Vec<Adapter> = vec![
        cors.clone(),
        Arc::new(JsonContentType),
        Arc::new(TokenToContext::new(keys::TOKEN, TokenSource::bearer())),
        Arc::new(ValidateToken::new(
            keys::TOKEN,
            validator_fn(move |token, _req| Ok(token == demo_token)),
        )),
        Arc::new(AuthPermitAll::default()),
        Arc::new(AuthBouncer::new(keys::ROUTE_AUTHORIZED)),
        Arc::new(JsonToContext::required(&["name"])),
    ];

    let mut router = Router::new();
    router
        .options("/*path", options_handle(cors))?
        .get(
            "/items/:id",
            router_adapt_fn(show_item, Some(keys::ROUTER_PARAMS), &read_item),
        )?
        .post(
            "/items",
            router_adapt_fn(echo_item, Some(keys::ROUTER_PARAMS), &create_item),
        )?;

    Ok(router)
}

fn show_item(w: &mut ResponseWriter, req: &Request) {
    let id = match req.context().get_str(&keys::REQUEST_ID_PARAM) {
        Ok(id) => id,
        Err(e) => {
            error!(error = %e, "컨텍스트 값 타입 불일치");
            http_error(w, "", StatusCode::INTERNAL_SERVER_ERROR);
            return;
        }
    };
    if let Err(e) = json_out(w, &json!({ "id": id })) {
        error!(error = %e, "응답 쓰기 실패");
        http_error(w, "", StatusCode::INTERNAL_SERVER_ERROR);
    }
}

fn echo_item(w: &mut ResponseWriter, req: &Request) {
    let result = match req.context().get_json(&keys::REQUEST_JSON) {
        Ok(Some(item)) => {
            w.write_header(StatusCode::CREATED);
            json_out(w, item)
        }
        Ok(None) => json_out(w, &json!({})),
        Err(e) => {
            error!(error = %e, "컨텍스트 값 타입 불일치");
            http_error(w, "", StatusCode::INTERNAL_SERVER_ERROR);
            return;
        }
    };
    if let Err(e) = result {
        error!(error = %e, "응답 쓰기 실패");
        http_error(w, "", StatusCode::INTERNAL_SERVER_ERROR);
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "종료 신호 대기 실패");
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load()?;
    let _guard = init_logging(&settings.logging)?;

    let router = build_router(&settings)?;
    let listener = ServerListener::new(settings.server.addr()?).await?;
    let handler = Arc::new(RequestHandler::new(Arc::new(router)));

    listener.run_until(handler, shutdown_signal()).await?;
    info!("서버 종료");
    Ok(())
}
