use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use log::debug;

use rsa_signer::core::Operation;
use rsa_signer::crypto::DEFAULT_KEY_BITS;
use rsa_signer::keyfile;
use rsa_signer::pem::KeyEncoding;
use rsa_signer::timestamp::{self, TimeTransform, TIME_FORMAT};

/// Any library error while running an operation.
const EXIT_FAILURE: u8 = 1;
/// Missing or unknown `--opt`; clap reports its own parse errors with the same code.
const EXIT_USAGE: u8 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "rsa-signer",
    version,
    about = "Generate RSA keys, sign messages and verify PKCS#1 v1.5 / SHA-256 signatures"
)]
struct Cli {
    /// Operation: 'gen', 'sign', 'verify' or 'time'
    #[arg(long)]
    opt: Option<String>,

    /// Key length in bits
    #[arg(short = 'b', default_value_t = DEFAULT_KEY_BITS)]
    bits: usize,

    /// Output directory for generated keys
    #[arg(short = 'o', default_value = "rsa")]
    output: PathBuf,

    /// Key payload written by 'gen': 'pkcs1' or 'pkcs8'
    #[arg(short = 'f', long, default_value_t = KeyEncoding::Pkcs1)]
    format: KeyEncoding,

    /// Path of the public key
    #[arg(long = "pub", default_value = "rsa/public.pem")]
    public: PathBuf,

    /// Path of the private key
    #[arg(long, default_value = "rsa/private.pem")]
    private: PathBuf,

    /// Base64 signature to verify
    #[arg(long = "sign", default_value = "")]
    signature: String,

    /// The message to sign or verify
    #[arg(long, default_value = "")]
    message: String,

    /// Time transform type
    #[arg(long = "timeTransformType", default_value = "unixStampToTime")]
    time_transform_type: String,

    /// Source time, in seconds since the Unix epoch
    #[arg(long = "time", default_value_t = 0, allow_negative_numbers = true)]
    time: i64,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(log_level));

    let operation = match cli.opt.as_deref().unwrap_or_default().parse::<Operation>() {
        Ok(operation) => operation,
        Err(e) => {
            debug!("{}", e);
            println!("invalid opt");
            return ExitCode::from(EXIT_USAGE);
        }
    };

    match run(operation, &cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn run(operation: Operation, cli: &Cli) -> Result<()> {
    match operation {
        Operation::Gen => {
            let files = keyfile::generate_key_files(&cli.output, cli.bits, cli.format)
                .with_context(|| {
                    format!("generating key pair into {}", cli.output.display())
                })?;
            println!("{}", files.private_key.display());
            println!("{}", files.public_key.display());
        }
        Operation::Sign => {
            let signature = keyfile::sign_with_key_file(&cli.private, &cli.message)
                .with_context(|| format!("signing with {}", cli.private.display()))?;
            println!("{}", signature);
        }
        Operation::Verify => {
            let valid = keyfile::verify_with_key_file(&cli.public, &cli.signature, &cli.message)
                .with_context(|| format!("verifying with {}", cli.public.display()))?;
            println!("{}", valid);
        }
        Operation::Time => {
            let transform: TimeTransform = cli.time_transform_type.parse()?;
            match transform {
                TimeTransform::UnixStampToTime => {
                    let t = timestamp::unix_stamp_to_time(cli.time)?;
                    println!(
                        "src: {}, dst: {}",
                        cli.time,
                        t.with_timezone(&Local).format(TIME_FORMAT)
                    );
                }
            }
        }
    }
    Ok(())
}
