use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Connection refused, DNS, timeout or an interrupted body.
    Transport,
    /// The server answered with a non-2xx status.
    HttpStatus,
    /// The body was not the JSON shape the endpoint promises.
    Parse,
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FailureKind::Transport => "transport",
            FailureKind::HttpStatus => "http_status",
            FailureKind::Parse => "parse",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiFailure {
    pub operation: &'static str,
    pub kind: FailureKind,
    pub status: Option<u16>,
    pub detail: String,
}

impl ApiFailure {
    pub fn transport(operation: &'static str, detail: impl Into<String>) -> Self {
        Self {
            operation,
            kind: FailureKind::Transport,
            status: None,
            detail: detail.into(),
        }
    }

    pub fn http_status(operation: &'static str, status: u16, body: impl Into<String>) -> Self {
        Self {
            operation,
            kind: FailureKind::HttpStatus,
            status: Some(status),
            detail: body.into(),
        }
    }

    pub fn parse(operation: &'static str, detail: impl Into<String>) -> Self {
        Self {
            operation,
            kind: FailureKind::Parse,
            status: None,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(
                f,
                "stock API error (operation={}, kind={}, status={}): {}",
                self.operation,
                self.kind.as_str(),
                status,
                self.detail
            ),
            None => write!(
                f,
                "stock API error (operation={}, kind={}): {}",
                self.operation,
                self.kind.as_str(),
                self.detail
            ),
        }
    }
}

impl std::error::Error for ApiFailure {}

/// Pulls the failure kind out of an error chain, if one was recorded.
pub fn failure_kind(err: &anyhow::Error) -> Option<FailureKind> {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<ApiFailure>())
        .map(|failure| failure.kind)
}
