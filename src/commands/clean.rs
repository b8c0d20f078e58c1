//! Clean the public directory

use anyhow::Result;
use std::fs;

use crate::Galleria;

/// Remove the generated public directory
pub fn run(galleria: &Galleria) -> Result<()> {
    if galleria.public_dir.exists() {
        fs::remove_dir_all(&galleria.public_dir)?;
        tracing::info!("Deleted: {:?}", galleria.public_dir);
    } else {
        tracing::debug!("Nothing to clean at {:?}", galleria.public_dir);
    }

    Ok(())
}
