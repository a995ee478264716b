//! CLI Commands
//!
//! All muon CLI commands organized as separate modules.

mod seal;
mod wrap;

pub use seal::{open_file, seal_file};
pub use wrap::{unwrap_file, wrap_file};

use anyhow::{Context, Result};
use muon::Aes;

/// Decode a hex argument, naming it in the error message.
pub(crate) fn hex_arg(name: &str, value: &str) -> Result<Vec<u8>> {
    hex::decode(value).with_context(|| format!("{name} is not valid hex"))
}

/// Build a cipher context from a hex key argument.
pub(crate) fn context_from_hex(key: &str) -> Result<Aes> {
    let key = hex_arg("key", key)?;
    Aes::new(&key).map_err(|e| anyhow::anyhow!("{e}"))
}
