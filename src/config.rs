use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

use crate::gallery::Section;
use crate::scan::{DEFAULT_EXTENSIONS, DEFAULT_MAX_INDEX, DEFAULT_MISS_CUTOFF, ScanOptions};

const DEFAULT_IMAGE_ROOT: &str = "images";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Configuration {
    /// Directory holding `{prefix}{index}.{ext}` files.
    pub image_root: PathBuf,
    /// Gallery sections in display order.
    pub sections: Vec<Section>,
    /// Candidate extensions, tried in this order for every index.
    pub extensions: Vec<String>,
    /// Highest index probed per section.
    pub max_index: u32,
    /// Consecutive missing indices that end a section.
    pub miss_cutoff: u32,
    /// Section shown first; defaults to the first configured section.
    pub initial_section: Option<String>,
    /// Star-mode placement and animation ranges.
    pub star_mode: StarModeConfig,
}

impl Configuration {
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let s = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&s)?)
    }

    /// Validate invariants that cannot be expressed via serde defaults alone.
    pub fn validated(self) -> Result<Self> {
        ensure!(!self.sections.is_empty(), "at least one section is required");
        let mut ids = HashSet::new();
        for section in &self.sections {
            ensure!(!section.id.is_empty(), "section ids must not be empty");
            ensure!(
                !section.prefix.is_empty(),
                "section {} must have a non-empty prefix",
                section.id
            );
            ensure!(
                ids.insert(section.id.as_str()),
                "duplicate section id {}",
                section.id
            );
        }
        if let Some(initial) = &self.initial_section {
            ensure!(
                ids.contains(initial.as_str()),
                "initial-section {initial} is not a configured section"
            );
        }
        self.scan_options()
            .validate()
            .context("invalid scan configuration")?;
        self.star_mode
            .validate()
            .context("invalid star-mode configuration")?;
        Ok(self)
    }

    #[must_use]
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            extensions: self
                .extensions
                .iter()
                .map(|e| e.to_ascii_lowercase())
                .collect(),
            max_index: self.max_index,
            miss_cutoff: self.miss_cutoff,
        }
    }

    fn default_sections() -> Vec<Section> {
        vec![
            Section::new("losing-it", "A", "losing it"),
            Section::new("explore", "B", "explore"),
            Section::new("stars", "C", "STARS"),
            Section::new("more-stars", "D", "more stars"),
            Section::new("blue", "E", "blue"),
        ]
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            image_root: PathBuf::from(DEFAULT_IMAGE_ROOT),
            sections: Self::default_sections(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_owned()).collect(),
            max_index: DEFAULT_MAX_INDEX,
            miss_cutoff: DEFAULT_MISS_CUTOFF,
            initial_section: None,
            star_mode: StarModeConfig::default(),
        }
    }
}

/// Ranges for the randomized star-mode layout, in pixels and seconds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct StarModeConfig {
    /// Distance kept from the top/left viewport edges.
    pub margin: f32,
    /// Extra span withheld from the right/bottom edges.
    pub reserved: f32,
    pub min_size: f32,
    pub size_spread: f32,
    #[serde(with = "humantime_serde")]
    pub max_delay: Duration,
    #[serde(with = "humantime_serde")]
    pub min_duration: Duration,
    #[serde(with = "humantime_serde")]
    pub duration_spread: Duration,
    /// Quiet period after the last resize before stars are laid out again.
    #[serde(with = "humantime_serde")]
    pub resize_debounce: Duration,
}

impl StarModeConfig {
    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("margin", self.margin),
            ("reserved", self.reserved),
            ("min-size", self.min_size),
            ("size-spread", self.size_spread),
        ] {
            ensure!(
                value.is_finite() && value >= 0.0,
                "star-mode.{name} must be a non-negative number"
            );
        }
        ensure!(
            self.min_duration > Duration::ZERO,
            "star-mode.min-duration must be positive"
        );
        Ok(())
    }
}

impl Default for StarModeConfig {
    fn default() -> Self {
        Self {
            margin: 100.0,
            reserved: 200.0,
            min_size: 100.0,
            size_spread: 100.0,
            max_delay: Duration::from_secs(3),
            min_duration: Duration::from_secs(12),
            duration_spread: Duration::from_secs(8),
            resize_debounce: Duration::from_millis(250),
        }
    }
}
