//! # rsa-signer
//!
//! Generate RSA key pairs, sign messages and verify signatures using
//! PKCS#1 v1.5 padding over SHA-256 digests.
//!
//! ## Features
//!
//! - **Key Generation**: RSA key pairs of configurable size, written as PEM
//! - **Signing**: SHA-256 digest signed with PKCS#1 v1.5, returned as base64
//! - **Verification**: `Ok(true)` / `Ok(false)` for matching / non-matching
//!   signatures, `Err` only when verification could not be attempted
//! - **Key ID Calculation**: SHA-256 fingerprints for key identification
//! - **PEM Format Support**: PKCS#1 (default) and PKCS#8 / SPKI payloads
//!
//! ## Quick Start
//!
//! ```rust
//! use rsa_signer::crypto::{generate_key_pair, sign_message, verify_message};
//! use rsa_signer::pem::KeyEncoding;
//!
//! let key_pair = generate_key_pair(1024, KeyEncoding::Pkcs1).unwrap();
//!
//! let signature = sign_message(key_pair.private_key_pem.as_bytes(), b"hello world").unwrap();
//!
//! let is_valid =
//!     verify_message(key_pair.public_key_pem.as_bytes(), &signature, b"hello world").unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Error Handling
//!
//! All operations return `Result<T, Error>`. [`Error::kind`] classifies a
//! failure as invalid key, I/O, crypto, encoding or input failure.

pub mod core;
pub mod crypto;
pub mod error;
pub mod keyfile;
pub mod pem;
pub mod timestamp;

pub use error::{Error, ErrorKind};
