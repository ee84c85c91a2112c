//! Centralized Error Handling Module
//!
//! Every failure carries a unique string code so log lines stay greppable
//! in production.
//!
//! Error codes follow pattern: CATEGORY_SPECIFIC_ERROR
//! - CFG_xxx: Configuration errors
//! - MCP_xxx: MCP server retrieval errors
//! - API_xxx: Local HTTP surface errors

use std::fmt;

/// Application-wide error type
#[derive(Debug)]
pub struct AppError {
    /// Unique error code for logging/monitoring
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Optional underlying error
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new AppError
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create AppError with source error
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get error code as string (for logging)
    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Unique error codes for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // ============================================
    // Configuration Errors
    // ============================================
    /// Missing environment variable
    ConfigMissingEnv,
    /// Invalid configuration value
    ConfigInvalidValue,

    // ============================================
    // MCP Retrieval Errors
    // ============================================
    /// Connection to the MCP server failed
    McpConnectionFailed,
    /// MCP request timed out
    McpTimeout,
    /// MCP server returned a non-success HTTP status
    McpHttpStatus,
    /// MCP response could not be parsed
    McpInvalidResponse,
    /// The remote tool reported an error
    McpToolError,

    // ============================================
    // API Errors (local HTTP surface)
    // ============================================
    /// Invalid request format
    ApiBadRequest,
    /// Internal server error
    ApiInternalError,

    /// Unknown error
    Unknown,
}

impl ErrorCode {
    /// Get string representation of error code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConfigMissingEnv => "CFG_MISSING_ENV",
            Self::ConfigInvalidValue => "CFG_INVALID_VALUE",

            Self::McpConnectionFailed => "MCP_CONNECTION_FAILED",
            Self::McpTimeout => "MCP_TIMEOUT",
            Self::McpHttpStatus => "MCP_HTTP_STATUS",
            Self::McpInvalidResponse => "MCP_INVALID_RESPONSE",
            Self::McpToolError => "MCP_TOOL_ERROR",

            Self::ApiBadRequest => "API_BAD_REQUEST",
            Self::ApiInternalError => "API_INTERNAL_ERROR",

            Self::Unknown => "UNKNOWN_ERROR",
        }
    }

    /// Get HTTP status code for API responses
    pub fn http_status(&self) -> u16 {
        match self {
            Self::ApiBadRequest | Self::ConfigInvalidValue => 400,
            Self::McpTimeout | Self::McpConnectionFailed => 502,
            _ => 500,
        }
    }
}

// ============================================
// Convenience constructors
// ============================================

impl AppError {
    /// Missing environment variable
    pub fn missing_env(var: &str) -> Self {
        Self::new(
            ErrorCode::ConfigMissingEnv,
            format!("{} not found in environment variables", var),
        )
    }

    /// Invalid configuration value
    pub fn invalid_value(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalidValue, msg)
    }

    /// Connection to the MCP server failed
    pub fn connection_failed(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::McpConnectionFailed, msg)
    }

    /// MCP request timed out
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::McpTimeout, msg)
    }

    /// MCP server returned a non-success status
    pub fn http_status(status: reqwest::StatusCode) -> Self {
        Self::new(ErrorCode::McpHttpStatus, format!("HTTP error: {}", status))
    }

    /// MCP response could not be parsed
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::McpInvalidResponse, msg)
    }

    /// The remote tool reported an error
    pub fn tool_error(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::McpToolError, msg)
    }

    /// API bad request
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiBadRequest, msg)
    }

    /// API internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiInternalError, msg)
    }
}

// ============================================
// Result type alias
// ============================================

/// Application Result type
pub type AppResult<T> = Result<T, AppError>;

// ============================================
// Conversion from common error types
// ============================================

impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        Self::new(ErrorCode::Unknown, err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorCode::Unknown, "IO error", err)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::new(ErrorCode::McpTimeout, "Request timeout")
        } else if err.is_connect() {
            Self::new(ErrorCode::McpConnectionFailed, "Connection failed")
        } else {
            Self::new(ErrorCode::Unknown, err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(ErrorCode::McpInvalidResponse, "JSON parse error", err)
    }
}
