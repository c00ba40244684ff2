use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("PEM error: {0}")]
    Pem(#[from] ::pem::PemError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("RSA error: {0}")]
    Rsa(#[from] rsa::Error),

    #[error("Unsupported key size: {bits} bits (minimum {min})")]
    KeySize { bits: usize, min: usize },

    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Timestamp out of range: {0}")]
    InvalidTimestamp(i64),

    #[error("Unsupported time transform type: {0}")]
    UnsupportedTimeTransform(String),
}

impl Error {
    /// Coarse classification used by callers that only care about the failure class.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidKey(_) | Error::Pem(_) => ErrorKind::InvalidKey,
            Error::Io(_) => ErrorKind::IoFailure,
            Error::Rsa(_) | Error::KeySize { .. } => ErrorKind::CryptoFailure,
            Error::Base64(_) => ErrorKind::EncodingFailure,
            Error::InvalidTimestamp(_) | Error::UnsupportedTimeTransform(_) => {
                ErrorKind::InvalidInput
            }
        }
    }
}

impl From<rsa::pkcs1::Error> for Error {
    fn from(err: rsa::pkcs1::Error) -> Self {
        Error::InvalidKey(err.to_string())
    }
}

impl From<rsa::pkcs8::Error> for Error {
    fn from(err: rsa::pkcs8::Error) -> Self {
        Error::InvalidKey(err.to_string())
    }
}

impl From<rsa::pkcs8::spki::Error> for Error {
    fn from(err: rsa::pkcs8::spki::Error) -> Self {
        Error::InvalidKey(err.to_string())
    }
}

/// Failure classes surfaced by every operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidKey,
    IoFailure,
    CryptoFailure,
    EncodingFailure,
    InvalidInput,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorKind::InvalidKey => "INVALID_KEY",
            ErrorKind::IoFailure => "IO_FAILURE",
            ErrorKind::CryptoFailure => "CRYPTO_FAILURE",
            ErrorKind::EncodingFailure => "ENCODING_FAILURE",
            ErrorKind::InvalidInput => "INVALID_INPUT",
        };
        write!(f, "{}", s)
    }
}
