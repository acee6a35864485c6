//! Error types for parameter-file I/O.

/// Failure modes for loading or saving an [`Evaluator`](crate::eval::Evaluator)'s
/// parameter file.
#[derive(Debug, thiserror::Error)]
pub enum ParamError {
    /// The file could not be opened for reading.
    #[error("failed to open parameter file")]
    Open(#[source] std::io::Error),
    /// The file's header did not match the expected "beluga" signature.
    #[error("invalid signature")]
    BadSignature,
    /// The file ended before every table cell could be read.
    #[error("failed to load: unexpected end of file")]
    ShortRead,
    /// Writing the parameter file failed.
    #[error("failed to write parameter file")]
    Write(#[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::ParamError;

    #[test]
    fn bad_signature_display() {
        assert_eq!(format!("{}", ParamError::BadSignature), "invalid signature");
    }

    #[test]
    fn short_read_display() {
        assert_eq!(format!("{}", ParamError::ShortRead), "failed to load: unexpected end of file");
    }
}
