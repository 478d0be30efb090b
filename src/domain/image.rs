// SPDX-License-Identifier: MPL-2.0
//! Image identifiers and resolved image resources.

use iced::widget::image;
use std::fmt;
use std::sync::Arc;

/// Opaque identifier of an image known to the fetch service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageName(String);

impl ImageName {
    /// Creates an image name from any string-like value.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ImageName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// The resolved form of an image identifier.
///
/// Holds a render handle plus the pixel dimensions. The RGBA bytes are kept
/// in an `Arc` so clones stay cheap while the cache and several preview
/// instances share the same resolution.
#[derive(Debug, Clone)]
pub struct ImageResource {
    /// The identifier this resource resolves.
    pub name: ImageName,
    /// Widget handle used by the layered view.
    pub handle: image::Handle,
    /// Pixel width.
    pub width: u32,
    /// Pixel height.
    pub height: u32,
    rgba_bytes: Arc<Vec<u8>>,
}

impl ImageResource {
    /// Creates a resource from raw RGBA pixels.
    #[must_use]
    pub fn from_rgba(name: ImageName, width: u32, height: u32, pixels: Vec<u8>) -> Self {
        let rgba_bytes = Arc::new(pixels);
        let handle = image::Handle::from_rgba(width, height, rgba_bytes.to_vec());
        Self {
            name,
            handle,
            width,
            height,
            rgba_bytes,
        }
    }

    /// Returns a reference to the RGBA bytes.
    #[must_use]
    pub fn rgba_bytes(&self) -> &[u8] {
        &self.rgba_bytes
    }

    /// Approximate memory footprint: width * height * 4 bytes per pixel.
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        (self.width as usize) * (self.height as usize) * 4
    }
}

// Resources are compared by identifier: the handle is a render-cycle
// convenience, not part of identity.
impl PartialEq for ImageResource {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ImageResource {}
