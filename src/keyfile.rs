//! Key files on disk: `<dir>/private.pem` and `<dir>/public.pem`.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::crypto;
use crate::error::Error;
use crate::pem::KeyEncoding;

/// File name of the private key inside an output directory.
pub const PRIVATE_KEY_FILE: &str = "private.pem";
/// File name of the public key inside an output directory.
pub const PUBLIC_KEY_FILE: &str = "public.pem";

/// Paths of a generated key pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyFiles {
    pub private_key: PathBuf,
    pub public_key: PathBuf,
}

impl KeyFiles {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            private_key: dir.join(PRIVATE_KEY_FILE),
            public_key: dir.join(PUBLIC_KEY_FILE),
        }
    }
}

/// Generate an RSA key pair and write it into `output_dir`.
///
/// The directory is created if missing and existing key files are
/// overwritten. Sets the private key file permissions to 0o600 on Unix.
pub fn generate_key_files(
    output_dir: &Path,
    bits: usize,
    encoding: KeyEncoding,
) -> Result<KeyFiles, Error> {
    debug!("Generating {}-bit RSA key pair ({})", bits, encoding);
    let key_pair = crypto::generate_key_pair(bits, encoding)?;

    fs::create_dir_all(output_dir)?;
    let files = KeyFiles::in_dir(output_dir);

    write_private_key(&files.private_key, &key_pair.private_key_pem)?;
    fs::write(&files.public_key, &key_pair.public_key_pem)?;

    let key_id = crypto::calculate_key_id(key_pair.public_key_pem.as_bytes())?;
    info!(
        "Generated key pair {} in {}",
        key_id,
        output_dir.display()
    );
    Ok(files)
}

fn write_private_key(path: &Path, pem: &str) -> Result<(), Error> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;

    // `mode` only applies on creation; tighten a file that already existed.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }

    file.write_all(pem.as_bytes())?;
    Ok(())
}

/// Sign `message` with the private key stored at `private_key_path`.
pub fn sign_with_key_file(private_key_path: &Path, message: &str) -> Result<String, Error> {
    let pem = fs::read(private_key_path)?;
    debug!("Signing message {:?}", message);
    let signature = crypto::sign_message(&pem, message.as_bytes())?;
    info!("Signed message with {}", private_key_path.display());
    Ok(signature)
}

/// Verify `signature` over `message` with the public key stored at `public_key_path`.
pub fn verify_with_key_file(
    public_key_path: &Path,
    signature: &str,
    message: &str,
) -> Result<bool, Error> {
    let pem = fs::read(public_key_path)?;
    debug!("Verifying message {:?}", message);
    let valid = crypto::verify_message(&pem, signature, message.as_bytes())?;
    info!(
        "Verified signature with {}: {}",
        public_key_path.display(),
        if valid { "valid" } else { "invalid" }
    );
    Ok(valid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::KeyManager;
    use crate::error::ErrorKind;
    use crate::pem;
    use tempfile::tempdir;

    #[test]
    fn test_generate_2048_into_new_dir() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out");

        let files = generate_key_files(&out, 2048, KeyEncoding::Pkcs1).unwrap();
        assert_eq!(files.private_key, out.join("private.pem"));
        assert_eq!(files.public_key, out.join("public.pem"));
        assert!(files.private_key.is_file());
        assert!(files.public_key.is_file());

        let private_pem = fs::read(&files.private_key).unwrap();
        let public_pem = fs::read(&files.public_key).unwrap();
        assert_eq!(pem::decode_block(&private_pem).unwrap().label, "PRIVATE KEY");
        assert_eq!(pem::decode_block(&public_pem).unwrap().label, "PUBLIC KEY");

        let private_key = KeyManager::load_private_key_pem(&private_pem).unwrap();
        let public_key = KeyManager::load_public_key_pem(&public_pem).unwrap();
        assert_eq!(rsa::RsaPublicKey::from(&private_key), public_key);
        assert_eq!(rsa::traits::PublicKeyParts::size(&public_key), 256);
    }

    #[test]
    fn test_generate_creates_nested_dirs() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("a").join("b");
        let files = generate_key_files(&out, 1024, KeyEncoding::Pkcs8).unwrap();
        assert!(files.private_key.is_file());
    }

    #[test]
    fn test_generate_overwrites_existing() {
        let dir = tempdir().unwrap();
        let first = generate_key_files(dir.path(), 1024, KeyEncoding::Pkcs1).unwrap();
        let before = fs::read_to_string(&first.public_key).unwrap();

        generate_key_files(dir.path(), 1024, KeyEncoding::Pkcs1).unwrap();
        let after = fs::read_to_string(&first.public_key).unwrap();
        assert_ne!(before, after);
    }

    #[test]
    fn test_generate_rejected_size_writes_nothing() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("never");
        let err = generate_key_files(&out, 64, KeyEncoding::Pkcs1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CryptoFailure);
        assert!(!out.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_private_key_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let files = generate_key_files(dir.path(), 1024, KeyEncoding::Pkcs1).unwrap();
        let mode = fs::metadata(&files.private_key).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_private_key_never_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join(PRIVATE_KEY_FILE);

        // Fresh file: created with 0600 directly
        write_private_key(&path, "fresh").unwrap();
        assert_eq!(fs::metadata(&path).unwrap().permissions().mode() & 0o777, 0o600);

        // Existing file left open to everyone is tightened before being rewritten
        fs::set_permissions(&path, fs::Permissions::from_mode(0o666)).unwrap();
        write_private_key(&path, "rewritten").unwrap();
        assert_eq!(fs::metadata(&path).unwrap().permissions().mode() & 0o777, 0o600);
        assert_eq!(fs::read_to_string(&path).unwrap(), "rewritten");
    }

    #[test]
    fn test_sign_and_verify_hello_world() {
        let dir = tempdir().unwrap();
        let files = generate_key_files(dir.path(), 1024, KeyEncoding::Pkcs1).unwrap();

        let signature = sign_with_key_file(&files.private_key, "hello world").unwrap();
        assert!(verify_with_key_file(&files.public_key, &signature, "hello world").unwrap());
        assert!(!verify_with_key_file(&files.public_key, &signature, "hello world!").unwrap());
    }

    #[test]
    fn test_missing_key_file() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.pem");

        let err = sign_with_key_file(&missing, "msg").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.kind(), ErrorKind::IoFailure);

        let err = verify_with_key_file(&missing, "AAAA", "msg").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IoFailure);
    }

    #[test]
    fn test_empty_key_file() {
        let dir = tempdir().unwrap();
        let empty = dir.path().join("empty.pem");
        fs::write(&empty, b"").unwrap();

        let err = sign_with_key_file(&empty, "msg").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidKey);
        let err = verify_with_key_file(&empty, "AAAA", "msg").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidKey);
    }
}
