// SPDX-License-Identifier: MPL-2.0
//! Dual-image control preview: load-state tracking, overlay visibility and
//! drag/drop data binding for one control unit.

pub mod bindings;
pub mod component;
pub mod view;
pub mod visibility;

pub use bindings::Bindings;
pub use component::{Effect, ImagePhase, Message, State};
pub use view::view;
pub use visibility::{show_processed_overlay, LayerStack, VisibilityInputs};
