//! PEM armoring for RSA key material.
//!
//! Key files carry a single `PRIVATE KEY` or `PUBLIC KEY` block. The label is
//! informational only: the DER payload decides how a key is parsed.

use std::fmt;
use std::str::FromStr;

use ::pem::{EncodeConfig, LineEnding};

use crate::error::Error;

/// Label written on private key files.
pub const PRIVATE_KEY_LABEL: &str = "PRIVATE KEY";
/// Label written on public key files.
pub const PUBLIC_KEY_LABEL: &str = "PUBLIC KEY";

/// Binary structure wrapped inside generated key files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyEncoding {
    /// PKCS#1 `RSAPrivateKey` / `RSAPublicKey`.
    #[default]
    Pkcs1,
    /// PKCS#8 `PrivateKeyInfo` / X.509 `SubjectPublicKeyInfo`.
    Pkcs8,
}

impl fmt::Display for KeyEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyEncoding::Pkcs1 => write!(f, "pkcs1"),
            KeyEncoding::Pkcs8 => write!(f, "pkcs8"),
        }
    }
}

impl FromStr for KeyEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pkcs1" => Ok(KeyEncoding::Pkcs1),
            "pkcs8" => Ok(KeyEncoding::Pkcs8),
            other => Err(format!(
                "unknown key encoding '{}', expected 'pkcs1' or 'pkcs8'",
                other
            )),
        }
    }
}

/// A decoded PEM block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PemBlock {
    pub label: String,
    pub der: Vec<u8>,
}

/// Armor DER bytes as a PEM block with 64-column lines and LF endings.
pub fn encode_block(label: &str, der: &[u8]) -> String {
    let block = ::pem::Pem::new(label, der.to_vec());
    ::pem::encode_config(&block, EncodeConfig::new().set_line_ending(LineEnding::LF))
}

/// Decode the first PEM block found anywhere in `data`.
///
/// Text around the block, the base64 line width and trailing whitespace on
/// each line are all ignored. Any failure, including a missing block, has
/// kind [`ErrorKind::InvalidKey`](crate::error::ErrorKind::InvalidKey).
pub fn decode_block(data: &[u8]) -> Result<PemBlock, Error> {
    let block = ::pem::parse(data)?;
    Ok(PemBlock {
        label: block.tag().to_string(),
        der: block.into_contents(),
    })
}
