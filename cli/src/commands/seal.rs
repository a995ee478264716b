//! Seal / Open Commands
//!
//! AES-GCM over whole files; the tag travels separately as hex.

use super::{context_from_hex, hex_arg};
use anyhow::{bail, Context, Result};
use muon::gcm;
use std::path::Path;

/// Encrypt `input` into `output` and print the tag as hex on stdout.
pub fn seal_file(
    key: &str,
    nonce: &str,
    aad: &str,
    tag_len: usize,
    input: &Path,
    output: &Path,
) -> Result<()> {
    let ctx = context_from_hex(key)?;
    let nonce = hex_arg("nonce", nonce)?;
    let aad = hex_arg("aad", aad)?;

    let plaintext =
        std::fs::read(input).with_context(|| format!("reading {}", input.display()))?;

    let (ciphertext, tag) = gcm::seal(&ctx, &nonce, &aad, &plaintext, tag_len)
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    std::fs::write(output, &ciphertext)
        .with_context(|| format!("writing {}", output.display()))?;

    println!("{}", hex::encode(tag));
    Ok(())
}

/// Verify and decrypt `input` into `output`; a bad tag aborts with an
/// error before anything is written.
pub fn open_file(
    key: &str,
    nonce: &str,
    aad: &str,
    tag: &str,
    input: &Path,
    output: &Path,
) -> Result<()> {
    let ctx = context_from_hex(key)?;
    let nonce = hex_arg("nonce", nonce)?;
    let aad = hex_arg("aad", aad)?;
    let tag = hex_arg("tag", tag)?;

    let ciphertext =
        std::fs::read(input).with_context(|| format!("reading {}", input.display()))?;

    let Ok(plaintext) = gcm::open(&ctx, &nonce, &aad, &ciphertext, &tag) else {
        bail!("authentication failed: {} is not trustworthy", input.display());
    };

    std::fs::write(output, &plaintext)
        .with_context(|| format!("writing {}", output.display()))?;
    Ok(())
}
