//! Create a new gallery manifest

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::Galleria;

/// Create an empty manifest for a new gallery and return its path
pub fn create_gallery(galleria: &Galleria, title: &str, path: Option<&str>) -> Result<PathBuf> {
    let target_dir = galleria.galleries_dir();

    let name = match path {
        Some(p) => p.to_string(),
        None => slug::slugify(title),
    };
    if name.is_empty() {
        anyhow::bail!("Cannot derive a file name from title {:?}", title);
    }

    let file_path = target_dir.join(format!("{}.yml", name));
    if file_path.exists() {
        anyhow::bail!("Gallery already exists: {:?}", file_path);
    }
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let content = format!(
        "title: {}\ndescription: ''\nimages: []\n",
        serde_yaml::to_string(title)?.trim_end()
    );

    fs::write(&file_path, content)?;
    println!("Created: {}", file_path.display());

    Ok(file_path)
}
