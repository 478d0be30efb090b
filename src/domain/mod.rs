// SPDX-License-Identifier: MPL-2.0
//! Domain types shared across the panel: control-unit configuration and
//! resolved image resources.

pub mod control;
pub mod image;

pub use control::{ControlUnit, ProcessorKind, UnitId};
pub use image::{ImageName, ImageResource};
