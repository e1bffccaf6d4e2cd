//! Error types for I/O operations

use thiserror::Error;

/// Errors that can occur during I/O operations
#[derive(Error, Debug)]
pub enum IoError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid file format: {format}")]
    InvalidFormat { format: String },

    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("Write error: {message}")]
    WriteError { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<IoError> for topotree_core::Error {
    fn from(e: IoError) -> Self {
        use topotree_core::Error;
        match e {
            IoError::FileNotFound { path } => Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("File not found: {}", path),
            )),
            IoError::InvalidFormat { format } => Error::UnsupportedFormat(format),
            IoError::ParseError { message } => Error::InvalidData(message),
            IoError::WriteError { message } => Error::Io(std::io::Error::other(message)),
            IoError::Io(e) => Error::Io(e),
        }
    }
}

/// Open a file, reporting a missing file by path
pub(crate) fn open(path: &std::path::Path) -> Result<std::fs::File, IoError> {
    std::fs::File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => IoError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => IoError::Io(e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_to_core() {
        let err: topotree_core::Error = IoError::ParseError {
            message: "bad token".to_string(),
        }
        .into();
        assert!(matches!(err, topotree_core::Error::InvalidData(_)));

        let err: topotree_core::Error = IoError::FileNotFound {
            path: "x.order.dat".to_string(),
        }
        .into();
        assert!(format!("{err}").contains("x.order.dat"));
    }
}
