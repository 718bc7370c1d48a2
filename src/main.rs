mod config;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use nxsig::{PublicKey, ReqwestTransport, Signature, Verifier, TRUSTED_COMMENT_PREFIX};

pub const VERSION: &str = "v0.1.0";

/// info
#[derive(Parser)]
#[command(name = "nxsig")]
#[command(about = "minisign signature verifier for NeoniX updates")]
struct Cli {
    /// Log decoding and verification details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verifies a file against its minisign signature
    Verify {
        /// File to verify
        file: PathBuf,
        /// Signature file (defaults to <FILE> + signature suffix)
        #[arg(long = "sig", conflicts_with = "sig_url")]
        sig: Option<PathBuf>,
        /// Fetch the signature from this URL instead
        #[arg(long = "sig-url")]
        sig_url: Option<String>,
        /// Base64 public key (or env NXSIG_PUBKEY)
        #[arg(short = 'P', long = "pubkey", conflicts_with = "pubkey_file")]
        pubkey: Option<String>,
        /// Read the public key from a minisign .pub file
        #[arg(short = 'p', long = "pubkey-file")]
        pubkey_file: Option<PathBuf>,
    },
    /// Prints the fields of a signature file
    Inspect {
        /// Signature file
        sig: PathBuf,
    },
    // Show version of the nxsig
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Verify { file, sig, sig_url, pubkey, pubkey_file } => {
            let cfg = AppConfig::load();
            verify(&cfg, &file, sig, sig_url.as_deref(), pubkey.as_deref(), pubkey_file.as_deref())
        }
        Commands::Inspect { sig } => inspect(&sig),
        Commands::Version => {
            println!("nxsig {}", VERSION);
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", format!("Error: {}", e).red());
            ExitCode::FAILURE
        }
    }
}

fn verify(
    cfg: &AppConfig,
    file: &Path,
    sig: Option<PathBuf>,
    sig_url: Option<&str>,
    pubkey: Option<&str>,
    pubkey_file: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let key = match pubkey_file {
        Some(path) => PublicKey::from_file(path)?,
        None => cfg.resolve_public_key(pubkey)?,
    };

    let signature = match sig_url {
        Some(url) => {
            let transport = match cfg.http_timeout {
                Some(t) => ReqwestTransport::with_timeout(t)?,
                None => ReqwestTransport::new()?,
            };
            let pb = ProgressBar::new_spinner();
            pb.enable_steady_tick(std::time::Duration::from_millis(120));
            pb.set_style(ProgressStyle::with_template("{spinner:.blue} {elapsed_precise} {msg}")?);
            pb.set_message(format!("Fetching signature from {}...", url));
            let fetched = nxsig::source::fetch_signature(&transport, url);
            pb.finish_and_clear();
            fetched?
        }
        None => {
            let path = sig.unwrap_or_else(|| default_signature_path(file, &cfg.signature_suffix));
            nxsig::source::read_signature(&path)?
        }
    };

    let message = fs::read(file)?;
    let comment = signature
        .trusted_comment
        .strip_prefix(TRUSTED_COMMENT_PREFIX)
        .unwrap_or_default()
        .to_string();

    let mut verifier = Verifier::new();
    verifier.load_decoded(key, signature);
    verifier.verify(&message)?;

    println!("{}", format!("Signature and comment signature verified: {}", file.display()).green());
    println!("Trusted comment: {}", comment);
    Ok(())
}

fn inspect(path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let sig: Signature = nxsig::source::read_signature(path)?;
    println!("{}", sig.untrusted_comment.bold());
    println!("algorithm:       {}", String::from_utf8_lossy(&sig.signature_algorithm));
    println!("key id:          {}", sig.key_id_hex());
    println!("signature:       {}", hex::encode(sig.signature));
    println!("{}", sig.trusted_comment);
    println!("global signature: {}", hex::encode(sig.global_signature));
    Ok(())
}

fn default_signature_path(file: &Path, suffix: &str) -> PathBuf {
    let mut os = file.as_os_str().to_os_string();
    os.push(suffix);
    PathBuf::from(os)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_path_appends_suffix() {
        assert_eq!(
            default_signature_path(Path::new("/tmp/nxpkg-0.2.0.tar.gz"), ".minisig"),
            PathBuf::from("/tmp/nxpkg-0.2.0.tar.gz.minisig")
        );
    }

    #[test]
    fn cli_parses_verify() {
        let cli = Cli::try_parse_from(["nxsig", "verify", "artifact", "--sig-url", "https://x/y.minisig", "-P", "RWQ"]).unwrap();
        match cli.command {
            Commands::Verify { file, sig, sig_url, pubkey, .. } => {
                assert_eq!(file, PathBuf::from("artifact"));
                assert!(sig.is_none());
                assert_eq!(sig_url.as_deref(), Some("https://x/y.minisig"));
                assert_eq!(pubkey.as_deref(), Some("RWQ"));
            }
            _ => panic!("expected verify"),
        }
    }

    #[test]
    fn sig_and_sig_url_conflict() {
        assert!(Cli::try_parse_from(["nxsig", "verify", "a", "--sig", "a.minisig", "--sig-url", "https://x"]).is_err());
    }
}
