// SPDX-License-Identifier: MPL-2.0
//! Control-unit store and the events that mutate it.
//!
//! The preview panel never writes units directly: it hands a
//! [`ControlEvent`] to the surrounding application, which applies it here.
//! The only event the preview itself emits is `ImageChanged`.

use crate::domain::{ControlUnit, ImageName, ProcessorKind, UnitId};

/// Change requests against the control-unit configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    /// The control image was attached (`Some`) or detached (`None`).
    ///
    /// Detaching deliberately leaves `processed_image` as-is; the pipeline
    /// replaces it on the next processing pass.
    ImageChanged {
        unit_id: UnitId,
        image: Option<ImageName>,
    },
    /// The pipeline produced (or invalidated) the processed variant.
    ProcessedImageChanged {
        unit_id: UnitId,
        image: Option<ImageName>,
    },
    /// The user selected a different processor.
    ProcessorChanged {
        unit_id: UnitId,
        processor: ProcessorKind,
    },
}

/// Ordered collection of control units, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct ControlStore {
    units: Vec<ControlUnit>,
}

impl ControlStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a unit. Replaces an existing unit with the same id.
    pub fn add(&mut self, unit: ControlUnit) {
        if let Some(existing) = self.units.iter_mut().find(|u| u.id == unit.id) {
            *existing = unit;
        } else {
            self.units.push(unit);
        }
    }

    /// Looks up a unit by id.
    #[must_use]
    pub fn get(&self, id: &UnitId) -> Option<&ControlUnit> {
        self.units.iter().find(|u| &u.id == id)
    }

    /// All units in insertion order.
    #[must_use]
    pub fn units(&self) -> &[ControlUnit] {
        &self.units
    }

    /// Applies a change event to the named unit.
    ///
    /// Events for unknown units are logged and dropped; there is no unit to
    /// mutate and the panel re-derives everything from current state anyway.
    pub fn apply(&mut self, event: ControlEvent) {
        let unit_id = match &event {
            ControlEvent::ImageChanged { unit_id, .. }
            | ControlEvent::ProcessedImageChanged { unit_id, .. }
            | ControlEvent::ProcessorChanged { unit_id, .. } => unit_id.clone(),
        };

        let Some(unit) = self.units.iter_mut().find(|u| u.id == unit_id) else {
            log::warn!("control event for unknown unit {unit_id}");
            return;
        };

        match event {
            ControlEvent::ImageChanged { image, .. } => {
                unit.control_image = image;
            }
            ControlEvent::ProcessedImageChanged { image, .. } => {
                unit.processed_image = image;
            }
            ControlEvent::ProcessorChanged { processor, .. } => {
                unit.processor = processor;
            }
        }
    }
}
