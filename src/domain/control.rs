// SPDX-License-Identifier: MPL-2.0
//! Control-unit configuration types.
//!
//! A control unit describes one image-conditioning process: the image the
//! user attached, the derived image produced by a processor, and which
//! processor (if any) is applied.

use crate::domain::image::ImageName;
use std::fmt;

/// Stable, opaque identifier of a control unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitId(String);

impl UnitId {
    /// Creates a unit id from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UnitId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Processor applied to the control image to derive the processed variant.
///
/// `None` is a sentinel meaning no transformation was ever requested; the
/// processed layer is meaningless for such a unit and must stay hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessorKind {
    #[default]
    None,
    Canny,
    Depth,
    Mlsd,
    Pose,
    Scribble,
}

impl ProcessorKind {
    /// Whether this is the "no processing" sentinel.
    #[must_use]
    pub fn is_none(self) -> bool {
        matches!(self, ProcessorKind::None)
    }

    /// Human-readable label for settings UI.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ProcessorKind::None => "None",
            ProcessorKind::Canny => "Canny",
            ProcessorKind::Depth => "Depth",
            ProcessorKind::Mlsd => "M-LSD",
            ProcessorKind::Pose => "Pose",
            ProcessorKind::Scribble => "Scribble",
        }
    }
}

/// One control-net configuration entry.
///
/// Owned by the [`ControlStore`](crate::services::control_store::ControlStore);
/// the preview component reads it and emits change requests, never mutating
/// it directly.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlUnit {
    /// Stable identifier.
    pub id: UnitId,

    /// The unmodified image the user supplied as conditioning input.
    pub control_image: Option<ImageName>,

    /// The derived image produced by running the control image through the
    /// processor. Absent until a processing pass has completed.
    pub processed_image: Option<ImageName>,

    /// Which processor is applied to derive the processed image.
    pub processor: ProcessorKind,
}

impl ControlUnit {
    /// Creates a unit with no images attached and no processor.
    #[must_use]
    pub fn new(id: UnitId) -> Self {
        Self {
            id,
            control_image: None,
            processed_image: None,
            processor: ProcessorKind::default(),
        }
    }

    /// Sets the processor kind (builder style).
    #[must_use]
    pub fn with_processor(mut self, processor: ProcessorKind) -> Self {
        self.processor = processor;
        self
    }

    /// Sets the control image (builder style).
    #[must_use]
    pub fn with_control_image(mut self, name: ImageName) -> Self {
        self.control_image = Some(name);
        self
    }

    /// Sets the processed image (builder style).
    #[must_use]
    pub fn with_processed_image(mut self, name: ImageName) -> Self {
        self.processed_image = Some(name);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_unit_has_no_images() {
        let unit = ControlUnit::new(UnitId::new("u1"));
        assert!(unit.control_image.is_none());
        assert!(unit.processed_image.is_none());
        assert!(unit.processor.is_none());
    }

    #[test]
    fn builder_attaches_images_and_processor() {
        let unit = ControlUnit::new(UnitId::new("u1"))
            .with_processor(ProcessorKind::Canny)
            .with_control_image(ImageName::new("img-1"))
            .with_processed_image(ImageName::new("img-2"));

        assert_eq!(unit.processor, ProcessorKind::Canny);
        assert_eq!(unit.control_image, Some(ImageName::new("img-1")));
        assert_eq!(unit.processed_image, Some(ImageName::new("img-2")));
    }

    #[test]
    fn none_sentinel_is_detected() {
        assert!(ProcessorKind::None.is_none());
        assert!(!ProcessorKind::Depth.is_none());
    }

    #[test]
    fn unit_id_displays_raw_value() {
        let id = UnitId::new("unit-42");
        assert_eq!(id.to_string(), "unit-42");
        assert_eq!(id.as_str(), "unit-42");
    }
}
