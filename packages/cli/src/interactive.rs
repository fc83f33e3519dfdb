//! Interactive prompts using dialoguer.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::io;
use std::path::Path;

use dialoguer::Confirm;

/// Ask the user to confirm copying `source` into `target`.
///
/// Defaults to "no".
///
/// # Errors
///
/// * If the prompt cannot be shown (for example, no terminal)
pub fn confirm_sync(source: &Path, target: &Path) -> io::Result<bool> {
    Ok(Confirm::new()
        .with_prompt(format!(
            "Copy {} to {}?",
            source.display(),
            target.display()
        ))
        .default(false)
        .interact()?)
}
