//! Error types for wgstat

use thiserror::Error;

/// Result type alias using wgstat's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while preparing, reducing or binning a dataset
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid argument provided to an operation
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// A device program failed to build
    #[error(
        "Failed to build '{label}'\nBuild Status: {status}\nBuild Options:\t{options}\nBuild Log:\t{log}"
    )]
    ShaderBuild {
        /// Program label
        label: String,
        /// Build stage that failed
        status: &'static str,
        /// Options the program was validated with
        options: String,
        /// Full diagnostic text
        log: String,
    },

    /// A reduction dispatch faulted; none of its partial results are usable
    #[error("Reduction '{op}' failed: {reason}")]
    ReductionFailed {
        /// The reduction operator
        op: &'static str,
        /// Description of the fault
        reason: String,
    },

    /// Backend-specific error
    #[error("Backend error: {0}")]
    Backend(String),

    /// Backend limitation - operation valid but exceeds backend capabilities
    #[error("{backend} limitation: {operation} - {reason}")]
    BackendLimitation {
        /// The backend that has the limitation
        backend: &'static str,
        /// The operation being attempted
        operation: &'static str,
        /// Description of the limitation
        reason: String,
    },

    /// Malformed dataset record
    #[error("Parse error on line {line}: {reason}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// What was wrong with the record
        reason: String,
    },

    /// I/O failure while reading a dataset
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// WebGPU adapter or device error
    #[cfg(feature = "wgpu")]
    #[error("WebGPU error: {0}")]
    Wgpu(#[from] crate::runtime::wgpu::WgpuError),
}

impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument(arg: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            arg,
            reason: reason.into(),
        }
    }

    /// Create a reduction failure
    pub fn reduction_failed(op: &'static str, reason: impl Into<String>) -> Self {
        Self::ReductionFailed {
            op,
            reason: reason.into(),
        }
    }

    /// Create a backend limitation error
    pub fn backend_limitation(
        backend: &'static str,
        operation: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self::BackendLimitation {
            backend,
            operation,
            reason: reason.into(),
        }
    }

    /// Whether this error was raised before any device work was issued.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shader_build_message_contains_log() {
        let err = Error::ShaderBuild {
            label: "reduce_wg32".to_string(),
            status: "validation error",
            options: "ValidationFlags::all()".to_string(),
            log: "unknown identifier `foo`".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Build Status: validation error"));
        assert!(msg.contains("unknown identifier `foo`"));
    }

    #[test]
    fn test_configuration_classification() {
        assert!(Error::invalid_argument("bins", "must be positive").is_configuration());
        assert!(!Error::reduction_failed("max", "device lost").is_configuration());
    }
}
