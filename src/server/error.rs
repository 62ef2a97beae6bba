use std::fmt;
use std::net::SocketAddr;

#[derive(Debug)]
pub enum Error {
    BindError { addr: SocketAddr, source: std::io::Error },
    IoError(std::io::Error),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BindError { addr, source } => write!(f, "Bind Error: {}: {}", addr, source),
            Error::IoError(e) => write!(f, "IO Error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::BindError { source, .. } => Some(source),
            Error::IoError(e) => Some(e),
        }
    }
}
