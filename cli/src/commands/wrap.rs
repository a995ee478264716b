//! Wrap / Unwrap Commands
//!
//! NIST key wrapping over whole files.

use super::{context_from_hex, hex_arg};
use anyhow::{bail, Context, Result};
use muon::wrap;
use std::path::Path;

fn parse_iv(iv: Option<&str>) -> Result<Option<[u8; 8]>> {
    let Some(iv) = iv else { return Ok(None) };
    let bytes = hex_arg("iv", iv)?;
    let Ok(iv) = <[u8; 8]>::try_from(bytes.as_slice()) else {
        bail!("iv must be exactly 8 bytes");
    };
    Ok(Some(iv))
}

/// Wrap the contents of `input` into `output` (8 bytes longer).
pub fn wrap_file(key: &str, iv: Option<&str>, input: &Path, output: &Path) -> Result<()> {
    let ctx = context_from_hex(key)?;
    let iv = parse_iv(iv)?;

    let data = std::fs::read(input).with_context(|| format!("reading {}", input.display()))?;

    let wrapped = wrap::wrap(&ctx, &data, iv.as_ref()).map_err(|e| anyhow::anyhow!("{e}"))?;

    std::fs::write(output, &wrapped)
        .with_context(|| format!("writing {}", output.display()))?;
    Ok(())
}

/// Unwrap the contents of `input` into `output` (8 bytes shorter); an
/// integrity failure aborts with an error before anything is written.
pub fn unwrap_file(key: &str, iv: Option<&str>, input: &Path, output: &Path) -> Result<()> {
    let ctx = context_from_hex(key)?;
    let iv = parse_iv(iv)?;

    let data = std::fs::read(input).with_context(|| format!("reading {}", input.display()))?;

    let Ok(unwrapped) = wrap::unwrap(&ctx, &data, iv.as_ref()) else {
        bail!("integrity check failed: {} is not trustworthy", input.display());
    };

    std::fs::write(output, &unwrapped)
        .with_context(|| format!("writing {}", output.display()))?;
    Ok(())
}
