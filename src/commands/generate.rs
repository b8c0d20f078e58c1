//! Generate static files

use anyhow::Result;

use crate::content::loader::ManifestLoader;
use crate::generator::{GenerateStats, Generator};
use crate::Galleria;

/// Generate every gallery
pub fn run(galleria: &Galleria) -> Result<()> {
    run_with_stats(galleria).map(|_| ())
}

/// Generate every gallery and report what was written
pub fn run_with_stats(galleria: &Galleria) -> Result<GenerateStats> {
    let start = std::time::Instant::now();

    let manifests = ManifestLoader::new(galleria).load_manifests()?;
    tracing::info!("Loaded {} gallery manifests", manifests.len());

    let generator = Generator::new(galleria)?;
    let stats = generator.generate(&manifests)?;

    if stats.duplicates > 0 {
        tracing::warn!(
            "{} manifests were skipped because their slug is taken",
            stats.duplicates
        );
    }

    if stats.dropped_images > 0 {
        tracing::debug!(
            "Dropped {} images without a preview URL",
            stats.dropped_images
        );
    }

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} galleries ({} pages) in {:.2}s",
        stats.galleries,
        stats.pages,
        duration.as_secs_f64()
    );

    Ok(stats)
}
