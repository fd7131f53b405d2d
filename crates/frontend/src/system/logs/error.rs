use std::fmt;

use thiserror::Error;

/// Which logs request failed; selects the wording of the message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogsOperation {
    Fetch,
    Export,
}

impl LogsOperation {
    fn verb(&self) -> &'static str {
        match self {
            LogsOperation::Fetch => "fetch",
            LogsOperation::Export => "export",
        }
    }

    fn gerund(&self) -> &'static str {
        match self {
            LogsOperation::Fetch => "fetching",
            LogsOperation::Export => "exporting",
        }
    }
}

/// Failure of a logs API call. `Display` is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Authentication token not found. Please log in again.")]
    MissingToken,

    #[error("Authentication failed. Please log in again.")]
    Unauthorized,

    #[error("You do not have permission to view logs. Admin access required.")]
    Forbidden,

    #[error("Failed to {} logs: {}", .op.verb(), status_detail(.status, .detail))]
    Status {
        op: LogsOperation,
        status: u16,
        detail: Option<String>,
    },

    /// 2xx response with `success: false`
    #[error("Failed to {} logs: {}", .op.verb(), .detail.as_deref().unwrap_or("the server reported a failure"))]
    Rejected {
        op: LogsOperation,
        detail: Option<String>,
    },

    /// Request could not be sent or the response could not be read
    #[error("Error {} logs: {detail}", .op.gerund())]
    Transport { op: LogsOperation, detail: String },
}

fn status_detail(status: &u16, detail: &Option<String>) -> String {
    match detail.as_deref().map(str::trim) {
        Some(d) if !d.is_empty() => d.to_string(),
        _ => format!("HTTP {}", status),
    }
}

impl ApiError {
    /// Classify a non-2xx response
    pub fn from_status(op: LogsOperation, status: u16, detail: Option<String>) -> Self {
        match status {
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden,
            _ => ApiError::Status { op, status, detail },
        }
    }

    pub fn transport(op: LogsOperation, err: impl fmt::Display) -> Self {
        ApiError::Transport {
            op,
            detail: err.to_string(),
        }
    }
}
