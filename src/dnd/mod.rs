// SPDX-License-Identifier: MPL-2.0
//! Typed payloads for the drag-and-drop subsystem.
//!
//! The panel never drives drag-and-drop itself; it only derives these
//! descriptors and hands them to the subsystem, which diffs them to decide
//! whether to re-bind handlers.

use crate::domain::{ImageResource, UnitId};

/// What kind of payload a drag carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    /// A resolved image.
    Image,
}

/// Drag-source descriptor. Constructed only when a resolved base image
/// exists; its absence means "dragging disabled" downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct DragPayload {
    /// Unit the drag originates from.
    pub source_id: UnitId,
    /// Payload discriminator.
    pub kind: DragKind,
    /// The image being dragged.
    pub image: ImageResource,
}

/// What a drop onto this component does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropAction {
    /// Attach the dropped image as the unit's control image.
    SetControlImage,
}

/// Context handed back to the drop handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropContext {
    pub unit_id: UnitId,
}

/// Drop-target descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct DropTarget {
    /// Unit receiving the drop.
    pub target_id: UnitId,
    /// Action performed on drop.
    pub action: DropAction,
    /// Context for the handler.
    pub context: DropContext,
}

/// Target descriptor for the upload pipeline: which unit a freshly uploaded
/// image should be attached to.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadDestination {
    /// Action performed once the upload completes.
    pub action: DropAction,
    /// Unit receiving the upload.
    pub unit_id: UnitId,
}
