//! Muon CLI
//!
//! File-oriented front end for the Muon engine: GCM seal/open and
//! NIST key wrap/unwrap.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{open_file, seal_file, unwrap_file, wrap_file};
use std::path::PathBuf;

// =============================================================================
// CLI DEFINITION
// =============================================================================

#[derive(Parser)]
#[command(name = "muon")]
#[command(about = "AES-GCM and NIST key wrapping from the command line", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt and authenticate a file with AES-GCM
    Seal {
        /// Cipher key as hex (16, 24 or 32 bytes)
        #[arg(short, long)]
        key: String,
        /// Nonce as hex (12 bytes is the nominal size)
        #[arg(short, long)]
        nonce: String,
        /// Additional authenticated data as hex
        #[arg(short, long, default_value = "")]
        aad: String,
        /// Authentication tag length in bytes (0..=16)
        #[arg(short, long, default_value_t = 16)]
        tag_len: usize,
        #[arg(value_name = "INPUT")]
        input: PathBuf,
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
    },
    /// Verify and decrypt a file sealed with AES-GCM
    Open {
        /// Cipher key as hex (16, 24 or 32 bytes)
        #[arg(short, long)]
        key: String,
        /// Nonce as hex
        #[arg(short, long)]
        nonce: String,
        /// Additional authenticated data as hex
        #[arg(short, long, default_value = "")]
        aad: String,
        /// Expected authentication tag as hex
        #[arg(short, long)]
        tag: String,
        #[arg(value_name = "INPUT")]
        input: PathBuf,
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
    },
    /// Wrap key material with the NIST key-wrap construction
    Wrap {
        /// Key-encryption key as hex (16, 24 or 32 bytes)
        #[arg(short, long)]
        key: String,
        /// Integrity-check IV as hex (8 bytes; NIST default when omitted)
        #[arg(short, long)]
        iv: Option<String>,
        #[arg(value_name = "INPUT")]
        input: PathBuf,
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
    },
    /// Unwrap key material, checking its integrity
    Unwrap {
        /// Key-encryption key as hex (16, 24 or 32 bytes)
        #[arg(short, long)]
        key: String,
        /// Integrity-check IV as hex (8 bytes; NIST default when omitted)
        #[arg(short, long)]
        iv: Option<String>,
        #[arg(value_name = "INPUT")]
        input: PathBuf,
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
    },
}

// =============================================================================
// ENTRY POINT
// =============================================================================

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Seal {
            key,
            nonce,
            aad,
            tag_len,
            input,
            output,
        } => seal_file(&key, &nonce, &aad, tag_len, &input, &output),
        Commands::Open {
            key,
            nonce,
            aad,
            tag,
            input,
            output,
        } => open_file(&key, &nonce, &aad, &tag, &input, &output),
        Commands::Wrap {
            key,
            iv,
            input,
            output,
        } => wrap_file(&key, iv.as_deref(), &input, &output),
        Commands::Unwrap {
            key,
            iv,
            input,
            output,
        } => unwrap_file(&key, iv.as_deref(), &input, &output),
    }
}
