// SPDX-License-Identifier: MPL-2.0
//! Memoized drag/drop/upload descriptor derivation.
//!
//! The drag-and-drop subsystem diffs descriptors by pointer identity to
//! decide whether to re-bind handlers, so each descriptor is recomputed only
//! when its declared dependencies change and is handed out as a shared
//! `Arc` otherwise.

use crate::dnd::{DragKind, DragPayload, DropAction, DropContext, DropTarget, UploadDestination};
use crate::domain::{ImageName, ImageResource, UnitId};
use std::sync::Arc;

/// Descriptor memos for one preview instance.
#[derive(Debug, Default)]
pub struct Bindings {
    draggable_key: Option<(UnitId, ImageName)>,
    draggable: Option<Arc<DragPayload>>,
    droppable_key: Option<UnitId>,
    droppable: Option<Arc<DropTarget>>,
    upload_key: Option<UnitId>,
    upload: Option<Arc<UploadDestination>>,
}

impl Bindings {
    /// Creates empty memos; populated on the first [`refresh`](Self::refresh).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes descriptors whose dependencies changed.
    ///
    /// - draggable depends on `(unit_id, base image name)` and is absent
    ///   without a resolved base image (absence means "dragging disabled"),
    /// - droppable and upload destination depend on `unit_id` only.
    pub fn refresh(&mut self, unit_id: &UnitId, base: Option<&ImageResource>) {
        if self.droppable_key.as_ref() != Some(unit_id) {
            self.droppable_key = Some(unit_id.clone());
            self.droppable = Some(Arc::new(DropTarget {
                target_id: unit_id.clone(),
                action: DropAction::SetControlImage,
                context: DropContext {
                    unit_id: unit_id.clone(),
                },
            }));
        }

        if self.upload_key.as_ref() != Some(unit_id) {
            self.upload_key = Some(unit_id.clone());
            self.upload = Some(Arc::new(UploadDestination {
                action: DropAction::SetControlImage,
                unit_id: unit_id.clone(),
            }));
        }

        match base {
            Some(image) => {
                let recompute = match &self.draggable_key {
                    Some((id, name)) => id != unit_id || name != &image.name,
                    None => true,
                };
                if recompute {
                    self.draggable_key = Some((unit_id.clone(), image.name.clone()));
                    self.draggable = Some(Arc::new(DragPayload {
                        source_id: unit_id.clone(),
                        kind: DragKind::Image,
                        image: image.clone(),
                    }));
                }
            }
            None => {
                self.draggable_key = None;
                self.draggable = None;
            }
        }
    }

    /// Drag-source descriptor, absent while no base image is resolved.
    #[must_use]
    pub fn draggable(&self) -> Option<Arc<DragPayload>> {
        self.draggable.clone()
    }

    /// Drop-target descriptor.
    #[must_use]
    pub fn droppable(&self) -> Option<Arc<DropTarget>> {
        self.droppable.clone()
    }

    /// Upload-destination descriptor.
    #[must_use]
    pub fn upload_destination(&self) -> Option<Arc<UploadDestination>> {
        self.upload.clone()
    }
}
