use thiserror::Error;

/// Library error type for gallery operations.
///
/// Probe misses are not represented here; they are a normal scan outcome.
#[derive(Debug, Error)]
pub enum GalleryError {
    /// A section id that is not part of the configured gallery.
    #[error("unknown section: {0}")]
    UnknownSection(String),

    /// The gallery was built without any sections.
    #[error("gallery has no sections")]
    NoSections,
}
