use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the particle store and its configuration surface.
///
/// Every fallible operation is all-or-nothing: when one of these is returned
/// the store is left exactly as it was before the call.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid host-supplied parameter (count, size, speed or arena bound).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Settings file could not be read or written.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Settings file is not valid JSON for `Settings`.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidParameter(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_is_informative() {
        let e = Error::invalid("particle size must be finite and >= 0");
        let msg = format!("{e}");
        assert!(msg.contains("invalid parameter"));
        assert!(msg.contains("particle size"));
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.json");
        let e: Error = io.into();
        assert!(matches!(e, Error::Io(_)));
        assert!(e.to_string().contains("missing.json"));
    }
}
