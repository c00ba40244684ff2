//! Cryptographic operations using RSA with PKCS#1 v1.5 padding over SHA-256.

use base64::{engine::general_purpose, Engine as _};
use rand::rngs::OsRng;
use rsa::{
    pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey, EncodeRsaPrivateKey, EncodeRsaPublicKey},
    pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey},
    Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey,
};
use sha2::{Digest, Sha256};

use crate::error::Error;
use crate::pem::{self, KeyEncoding, PRIVATE_KEY_LABEL, PUBLIC_KEY_LABEL};

/// Key size used when the caller does not pick one.
pub const DEFAULT_KEY_BITS: usize = 2048;
/// Smallest modulus accepted for generation.
pub const MIN_KEY_BITS: usize = 512;

/// Key pair containing private and public keys in PEM format
#[derive(Debug, Clone)]
pub struct KeyPair {
    pub private_key_pem: String,
    pub public_key_pem: String,
}

/// Generate a new RSA key pair of `bits` length and return both keys in PEM format.
///
/// # Arguments
///
/// * `bits` - Modulus length, at least [`MIN_KEY_BITS`]
/// * `encoding` - Binary structure wrapped in the PEM blocks
///
/// # Errors
///
/// Returns an error if the key size is rejected or key generation fails.
pub fn generate_key_pair(bits: usize, encoding: KeyEncoding) -> Result<KeyPair, Error> {
    let (private_key, public_key) = KeyManager::generate_keypair(bits)?;

    Ok(KeyPair {
        private_key_pem: KeyManager::export_private_key_pem(&private_key, encoding)?,
        public_key_pem: KeyManager::export_public_key_pem(&public_key, encoding)?,
    })
}

/// Sign `message` with a PEM private key and return the base64-encoded signature.
///
/// The message is hashed with SHA-256 and the digest is signed with
/// PKCS#1 v1.5 padding. Identical inputs always produce identical signatures.
///
/// # Errors
///
/// Returns [`Error::InvalidKey`] when `private_key_pem` holds no PEM block or
/// the block is not an RSA private key.
pub fn sign_message(private_key_pem: &[u8], message: &[u8]) -> Result<String, Error> {
    let private_key = KeyManager::load_private_key_pem(private_key_pem)?;
    let digest = Sha256::digest(message);
    SignatureManager::sign_digest(&digest, &private_key)
}

/// Verify a base64-encoded signature over `message` with a PEM public key.
///
/// # Returns
///
/// `true` if the signature is valid, `false` otherwise.
///
/// # Errors
///
/// Returns an error if the public key is unusable or the signature is not
/// valid base64. A signature that simply does not match is `Ok(false)`.
pub fn verify_message(
    public_key_pem: &[u8],
    signature: &str,
    message: &[u8],
) -> Result<bool, Error> {
    let public_key = KeyManager::load_public_key_pem(public_key_pem)?;
    let digest = Sha256::digest(message);
    SignatureManager::verify_digest(&digest, signature, &public_key)
}

/// Calculate the SHA-256 fingerprint of a PEM public key.
///
/// The hash covers the PKCS#1 DER form, so a key has the same id whichever
/// encoding its file uses. Returned as `"sha256:<hex>"`.
pub fn calculate_key_id(public_key_pem: &[u8]) -> Result<String, Error> {
    let public_key = KeyManager::load_public_key_pem(public_key_pem)?;
    KeyManager::calculate_key_fingerprint(&public_key)
}

/// Key manager for RSA key material
pub struct KeyManager;

impl KeyManager {
    /// Generate a new RSA key pair from the OS random source.
    pub fn generate_keypair(bits: usize) -> Result<(RsaPrivateKey, RsaPublicKey), Error> {
        if bits < MIN_KEY_BITS {
            return Err(Error::KeySize {
                bits,
                min: MIN_KEY_BITS,
            });
        }
        let mut rng = OsRng;
        let private_key = RsaPrivateKey::new(&mut rng, bits)?;
        let public_key = RsaPublicKey::from(&private_key);
        Ok((private_key, public_key))
    }

    /// Export private key to PEM format.
    pub fn export_private_key_pem(
        private_key: &RsaPrivateKey,
        encoding: KeyEncoding,
    ) -> Result<String, Error> {
        match encoding {
            KeyEncoding::Pkcs1 => {
                let der = private_key.to_pkcs1_der()?;
                Ok(pem::encode_block(PRIVATE_KEY_LABEL, der.as_bytes()))
            }
            KeyEncoding::Pkcs8 => {
                let der = private_key.to_pkcs8_der()?;
                Ok(pem::encode_block(PRIVATE_KEY_LABEL, der.as_bytes()))
            }
        }
    }

    /// Export public key to PEM format.
    pub fn export_public_key_pem(
        public_key: &RsaPublicKey,
        encoding: KeyEncoding,
    ) -> Result<String, Error> {
        match encoding {
            KeyEncoding::Pkcs1 => {
                let der = public_key.to_pkcs1_der()?;
                Ok(pem::encode_block(PUBLIC_KEY_LABEL, der.as_bytes()))
            }
            KeyEncoding::Pkcs8 => {
                let der = public_key.to_public_key_der()?;
                Ok(pem::encode_block(PUBLIC_KEY_LABEL, der.as_bytes()))
            }
        }
    }

    /// Load private key from PEM format (PKCS#1, falling back to PKCS#8).
    pub fn load_private_key_pem(pem_data: &[u8]) -> Result<RsaPrivateKey, Error> {
        let block = pem::decode_block(pem_data)?;
        match RsaPrivateKey::from_pkcs1_der(&block.der) {
            Ok(key) => Ok(key),
            Err(pkcs1_err) => RsaPrivateKey::from_pkcs8_der(&block.der).map_err(|_| {
                Error::InvalidKey(format!("not an RSA private key: {}", pkcs1_err))
            }),
        }
    }

    /// Load public key from PEM format (PKCS#1, falling back to SPKI).
    pub fn load_public_key_pem(pem_data: &[u8]) -> Result<RsaPublicKey, Error> {
        let block = pem::decode_block(pem_data)?;
        match RsaPublicKey::from_pkcs1_der(&block.der) {
            Ok(key) => Ok(key),
            Err(pkcs1_err) => RsaPublicKey::from_public_key_der(&block.der).map_err(|_| {
                Error::InvalidKey(format!("not an RSA public key: {}", pkcs1_err))
            }),
        }
    }

    /// Calculate SHA-256 fingerprint of public key.
    pub fn calculate_key_fingerprint(public_key: &RsaPublicKey) -> Result<String, Error> {
        let der = public_key.to_pkcs1_der()?;
        let hash = Sha256::digest(der.as_bytes());
        Ok(format!("sha256:{}", hex::encode(hash)))
    }
}

/// Signature manager for PKCS#1 v1.5 / SHA-256 operations on precomputed digests
pub struct SignatureManager;

impl SignatureManager {
    /// Sign a SHA-256 digest and return the Base64-encoded signature.
    pub fn sign_digest(digest: &[u8], private_key: &RsaPrivateKey) -> Result<String, Error> {
        // The RNG only blinds the private-key operation; the output is unaffected.
        let mut rng = OsRng;
        let signature = private_key.sign_with_rng(&mut rng, Pkcs1v15Sign::new::<Sha256>(), digest)?;
        Ok(general_purpose::STANDARD.encode(signature))
    }

    /// Verify a Base64-encoded signature against a SHA-256 digest.
    pub fn verify_digest(
        digest: &[u8],
        signature_b64: &str,
        public_key: &RsaPublicKey,
    ) -> Result<bool, Error> {
        // Pasted or wrapped signatures may carry line breaks.
        let compact: String = signature_b64
            .chars()
            .filter(|c| !matches!(c, '\r' | '\n'))
            .collect();
        let signature = general_purpose::STANDARD.decode(compact)?;

        match public_key.verify(Pkcs1v15Sign::new::<Sha256>(), digest, &signature) {
            Ok(()) => Ok(true),
            Err(_) => Ok(false),
        }
    }
}
