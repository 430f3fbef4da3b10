//! Image discovery by probing sequentially numbered filenames.
//!
//! There is no directory listing to rely on, so each section is discovered by
//! probing `{root}/{prefix}{index}.{ext}` for `index = 1, 2, ...` and every
//! extension in order. A section ends after `miss_cutoff` consecutive indices
//! with no loadable extension, or at `max_index`.

use std::path::{Path, PathBuf};

use anyhow::{Result, ensure};
use tracing::{debug, info, instrument, trace};

use crate::gallery::{Gallery, ImageRef, Section};
use crate::probe::ImageProbe;

pub const DEFAULT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];
pub const DEFAULT_MAX_INDEX: u32 = 100;
pub const DEFAULT_MISS_CUTOFF: u32 = 5;

/// Options controlling the discovery scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Candidate extensions (lowercase, without dot), tried in this order.
    pub extensions: Vec<String>,
    /// Highest index probed per section (inclusive).
    pub max_index: u32,
    /// Consecutive missing indices that end a section.
    pub miss_cutoff: u32,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_owned()).collect(),
            max_index: DEFAULT_MAX_INDEX,
            miss_cutoff: DEFAULT_MISS_CUTOFF,
        }
    }
}

impl ScanOptions {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.extensions.is_empty(),
            "at least one extension is required"
        );
        for ext in &self.extensions {
            ensure!(!ext.is_empty(), "extensions must not be empty");
            ensure!(
                !ext.contains('.') && !ext.contains('/'),
                "extension {ext:?} must be given without dots or slashes"
            );
        }
        ensure!(self.max_index >= 1, "max-index must be at least 1");
        ensure!(self.miss_cutoff >= 1, "miss-cutoff must be at least 1");
        Ok(())
    }
}

/// Filename stem for `index` within a section, e.g. `A12`.
#[must_use]
pub fn candidate_name(prefix: &str, index: u32) -> String {
    format!("{prefix}{index}")
}

/// Scan one section. Probes are awaited one at a time.
#[instrument(skip_all, fields(section = %section.id, prefix = %section.prefix))]
pub async fn scan_section<P: ImageProbe>(
    probe: &P,
    root: &Path,
    section: &Section,
    opts: &ScanOptions,
) -> Vec<ImageRef> {
    let mut found = Vec::new();
    let mut misses = 0u32;
    let mut probes = 0usize;

    for index in 1..=opts.max_index {
        let name = candidate_name(&section.prefix, index);
        let mut hit: Option<PathBuf> = None;
        for ext in &opts.extensions {
            let path = root.join(format!("{name}.{ext}"));
            probes += 1;
            if probe.probe(&path).await {
                hit = Some(path);
                break;
            }
        }

        match hit {
            Some(path) => {
                debug!(path = %path.display(), "discovered");
                found.push(ImageRef {
                    path,
                    name,
                    section_id: section.id.clone(),
                });
                misses = 0;
            }
            None => {
                misses += 1;
                trace!(%name, misses, "no loadable extension");
                if misses >= opts.miss_cutoff {
                    break;
                }
            }
        }
    }

    info!(images = found.len(), probes, "section scan complete");
    found
}

/// Scan every section in order, one after the other.
pub async fn scan_gallery<P: ImageProbe>(
    probe: &P,
    root: &Path,
    sections: &[Section],
    opts: &ScanOptions,
) -> Gallery {
    let mut images = Vec::new();
    for section in sections {
        images.extend(scan_section(probe, root, section, opts).await);
    }
    info!(
        root = %root.display(),
        sections = sections.len(),
        images = images.len(),
        "discovery scan complete"
    );
    Gallery::new(sections.to_vec(), images)
}
