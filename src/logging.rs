use std::path::Path;
use std::time::Duration;

use tracing::{error, info, span, warn, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, EnvFilter};

use crate::settings::{LogFormat, LogOutput, LogSettings};

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("로그 구독자 초기화 실패: {0}")]
    Init(String),
}

/// 전역 `tracing` 구독자를 설치합니다.
///
/// 반환된 [`WorkerGuard`]를 프로세스가 끝날 때까지 들고 있어야
/// 버퍼가 비워집니다. `RUST_LOG`가 설정되어 있으면 설정된 레벨보다 우선합니다.
pub fn init_logging(settings: &LogSettings) -> Result<WorkerGuard, LoggingError> {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    let filter = env_filter(settings, &directives);

    let (writer, guard) = match &settings.output {
        LogOutput::Stdout => tracing_appender::non_blocking(std::io::stdout()),
        LogOutput::File(path) => {
            let path = Path::new(path);
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let file_name = path.file_name().unwrap_or(path.as_os_str());
            tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name))
        }
    };

    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    let result = match settings.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
    result.map_err(|e| LoggingError::Init(e.to_string()))?;

    Ok(guard)
}

/// `directives`가 비어 있으면 설정된 레벨이 모든 타깃에 적용됩니다.
fn env_filter(settings: &LogSettings, directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(settings.level).into())
        .parse_lossy(directives)
}

/// 요청 하나에 대한 로그 기록
#[derive(Debug)]
pub struct RequestLog {
    pub request_id: String,
    pub method: String,
    pub path: String,
    pub status_code: u16,
    pub duration_ms: u64,
    pub error: Option<String>,
}

impl RequestLog {
    pub fn new() -> Self {
        Self {
            request_id: uuid::Uuid::new_v4().to_string(),
            method: String::new(),
            path: String::new(),
            status_code: 0,
            duration_ms: 0,
            error: None,
        }
    }

    pub fn with_request<B>(&mut self, req: &hyper::Request<B>) {
        self.method = req.method().to_string();
        self.path = req.uri().path().to_string();
    }

    pub fn with_response(&mut self, status: hyper::StatusCode, elapsed: Duration) {
        self.status_code = status.as_u16();
        self.duration_ms = elapsed.as_millis() as u64;
    }

    pub fn with_error(&mut self, error: impl std::fmt::Display) {
        self.error = Some(error.to_string());
    }
}

impl Default for RequestLog {
    fn default() -> Self {
        Self::new()
    }
}

pub fn log_request(log: &RequestLog) {
    let level = if log.error.is_some() || log.status_code >= 500 {
        Level::ERROR
    } else if log.status_code >= 400 {
        Level::WARN
    } else {
        Level::INFO
    };

    let span = span!(
        Level::INFO,
        "request",
        request_id = %log.request_id,
        method = %log.method,
        path = %log.path,
        status = %log.status_code,
        duration_ms = %log.duration_ms
    );
    let _enter = span.enter();

    match level {
        Level::ERROR => error!(error = ?log.error, "요청 실패"),
        Level::WARN => warn!("요청이 클라이언트 오류로 끝남"),
        _ => info!("요청 완료"),
    }
}
