use std::fmt;
use std::str::FromStr;

/// Operation selected with `--opt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Generate a key pair into an output directory
    Gen,
    /// Sign a message with a private key file
    Sign,
    /// Verify a signature with a public key file
    Verify,
    /// Timestamp conversion
    Time,
}

/// Returned for a missing or unrecognised `--opt` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidOperation(pub String);

impl fmt::Display for InvalidOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid opt '{}'", self.0)
    }
}

impl std::error::Error for InvalidOperation {}

impl FromStr for Operation {
    type Err = InvalidOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gen" => Ok(Operation::Gen),
            "sign" => Ok(Operation::Sign),
            "verify" => Ok(Operation::Verify),
            "time" => Ok(Operation::Time),
            other => Err(InvalidOperation(other.to_string())),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operation::Gen => "gen",
            Operation::Sign => "sign",
            Operation::Verify => "verify",
            Operation::Time => "time",
        };
        write!(f, "{}", s)
    }
}
