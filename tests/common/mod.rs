#![allow(dead_code)]

use std::convert::Infallible;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use adapter_chain::context::keys;
use adapter_chain::middleware::{handler_fn, Handler, Middleware, MiddlewareError, SharedHandler};
use adapter_chain::request::Request;
use adapter_chain::response::{json_out, ResponseWriter};
use async_trait::async_trait;
use bytes::Bytes;
use http_body::Frame;
use http_body_util::Full;
use hyper::{header, Method};

/// 데이터 프레임을 내보낸 횟수를 세는 본문
pub struct CountingBody {
    data: Option<Bytes>,
    reads: Arc<AtomicUsize>,
}

impl CountingBody {
    pub fn new(data: &'static str) -> (Self, Arc<AtomicUsize>) {
        let reads = Arc::new(AtomicUsize::new(0));
        let body = Self {
            data: Some(Bytes::from(data)),
            reads: reads.clone(),
        };
        (body, reads)
    }
}

impl http_body::Body for CountingBody {
    type Data = Bytes;
    type Error = Infallible;

    fn poll_frame(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Bytes>, Infallible>>> {
        match self.data.take() {
            Some(data) => {
                self.reads.fetch_add(1, Ordering::SeqCst);
                Poll::Ready(Some(Ok(Frame::data(data))))
            }
            None => Poll::Ready(None),
        }
    }
}

pub fn request(method: Method, uri: &str, content_type: Option<&str>, body: &'static str) -> Request {
    let mut builder = hyper::Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    Request::from_hyper(builder.body(Full::new(Bytes::from(body))).unwrap())
}

pub fn get(uri: &str) -> Request {
    request(Method::GET, uri, None, "")
}

pub fn post_json(uri: &str, body: &'static str) -> Request {
    request(Method::POST, uri, Some("application/json"), body)
}

pub fn post_form(uri: &str, body: &'static str) -> Request {
    request(Method::POST, uri, Some("application/x-www-form-urlencoded"), body)
}

/// 본문 읽기 횟수를 관찰할 수 있는 JSON POST 요청
pub fn counting_post(uri: &str, body: &'static str) -> (Request, Arc<AtomicUsize>) {
    let (body, reads) = CountingBody::new(body);
    let req = hyper::Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body)
        .unwrap();
    (Request::from_hyper(req), reads)
}

pub async fn run(handler: &SharedHandler, req: Request) -> ResponseWriter {
    let mut w = ResponseWriter::new();
    handler.serve(&mut w, req).await;
    w
}

pub type Log = Arc<Mutex<Vec<String>>>;

pub fn new_log() -> Log {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn entries(log: &Log) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// 다음 핸들러 호출 전후를 기록하는 미들웨어
pub struct Recorder {
    name: &'static str,
    log: Log,
}

impl Recorder {
    pub fn new(name: &'static str, log: &Log) -> Self {
        Self {
            name,
            log: log.clone(),
        }
    }
}

#[async_trait]
impl Middleware for Recorder {
    fn name(&self) -> &str {
        self.name
    }

    async fn handle(
        &self,
        w: &mut ResponseWriter,
        req: Request,
        next: &dyn Handler,
    ) -> Result<(), MiddlewareError> {
        self.log.lock().unwrap().push(format!("{}:before", self.name));
        next.serve(w, req).await;
        self.log.lock().unwrap().push(format!("{}:after", self.name));
        Ok(())
    }
}

/// 호출을 기록하고 "ok"를 쓰는 말단 핸들러
pub fn recording_handler(log: &Log) -> SharedHandler {
    let log = log.clone();
    handler_fn(move |w, _req| {
        log.lock().unwrap().push("handler".to_string());
        w.write_str("ok").unwrap();
    })
}

/// 컨텍스트의 JSON 맵을 그대로 응답하는 말단 핸들러
pub fn json_echo() -> SharedHandler {
    handler_fn(|w, req| {
        let map = req
            .context()
            .get_json(&keys::REQUEST_JSON)
            .unwrap()
            .cloned()
            .unwrap_or_default();
        json_out(w, &map).unwrap();
    })
}

/// 첫 폴링에서 에러를 내는 본문
pub struct FailingBody;

impl http_body::Body for FailingBody {
    type Data = Bytes;
    type Error = std::io::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Bytes>, std::io::Error>>> {
        Poll::Ready(Some(Err(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "connection reset",
        ))))
    }
}

pub fn failing_post(uri: &str) -> Request {
    let req = hyper::Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(FailingBody)
        .unwrap();
    Request::from_hyper(req)
}
