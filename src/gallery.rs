//! Sections, discovered images and the currently selected section.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::GalleryError;

/// A named, ordered group of images sharing a filename prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Section {
    /// Unique key used for selection.
    pub id: String,
    /// Filename prefix, e.g. `A` for `A1.jpg`, `A2.png`, ...
    pub prefix: String,
    /// Title shown above the section's images.
    pub display_name: String,
}

impl Section {
    pub fn new(
        id: impl Into<String>,
        prefix: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            prefix: prefix.into(),
            display_name: display_name.into(),
        }
    }
}

/// One confirmed image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRef {
    pub path: PathBuf,
    /// `prefix` followed by the index, without extension.
    pub name: String,
    pub section_id: String,
}

/// Owned result of a discovery scan.
///
/// Images are ordered by section (configured order) and then by index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Gallery {
    sections: Vec<Section>,
    images: Vec<ImageRef>,
}

impl Gallery {
    pub(crate) fn new(sections: Vec<Section>, images: Vec<ImageRef>) -> Self {
        Self { sections, images }
    }

    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[must_use]
    pub fn images(&self) -> &[ImageRef] {
        &self.images
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    #[must_use]
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Images of one section, in discovery order.
    pub fn images_in<'a>(&'a self, section_id: &'a str) -> impl Iterator<Item = &'a ImageRef> {
        self.images
            .iter()
            .filter(move |img| img.section_id == section_id)
    }

    /// Per-section image totals in section order.
    #[must_use]
    pub fn counts(&self) -> Vec<(&str, usize)> {
        self.sections
            .iter()
            .map(|s| (s.id.as_str(), self.images_in(&s.id).count()))
            .collect()
    }
}

/// Selection state over a scanned gallery.
#[derive(Debug, Clone)]
pub struct GalleryView<'a> {
    gallery: &'a Gallery,
    current: usize,
}

impl<'a> GalleryView<'a> {
    /// Start on `initial`, or on the first section when `None`.
    ///
    /// # Errors
    /// Returns [`GalleryError::UnknownSection`] if `initial` is not a section id,
    /// and [`GalleryError::NoSections`] if the gallery has no sections at all.
    pub fn new(gallery: &'a Gallery, initial: Option<&str>) -> Result<Self, GalleryError> {
        if gallery.sections.is_empty() {
            return Err(GalleryError::NoSections);
        }
        let current = match initial {
            Some(id) => position_of(gallery, id)?,
            None => 0,
        };
        Ok(Self { gallery, current })
    }

    #[must_use]
    pub fn gallery(&self) -> &'a Gallery {
        self.gallery
    }

    #[must_use]
    pub fn current(&self) -> &'a Section {
        &self.gallery.sections[self.current]
    }

    /// Switch to another section. The selection is unchanged on error.
    ///
    /// # Errors
    /// Returns [`GalleryError::UnknownSection`] if `id` is not a section id.
    pub fn select(&mut self, id: &str) -> Result<&'a Section, GalleryError> {
        self.current = position_of(self.gallery, id)?;
        Ok(self.current())
    }

    /// Images of the selected section.
    pub fn visible_images(&self) -> impl Iterator<Item = &'a ImageRef> {
        self.gallery.images_in(&self.current().id)
    }

    /// `(section id, visible)` for every section; only the selected title is visible.
    pub fn title_visibility(&self) -> impl Iterator<Item = (&'a str, bool)> + '_ {
        self.gallery
            .sections
            .iter()
            .enumerate()
            .map(move |(i, s)| (s.id.as_str(), i == self.current))
    }
}

fn position_of(gallery: &Gallery, id: &str) -> Result<usize, GalleryError> {
    gallery
        .sections
        .iter()
        .position(|s| s.id == id)
        .ok_or_else(|| GalleryError::UnknownSection(id.to_owned()))
}
