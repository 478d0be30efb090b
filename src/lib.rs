// SPDX-License-Identifier: MPL-2.0
//! `iced_atelier` is the control-image panel of an image-generation
//! front-end, built with the Iced GUI framework.
//!
//! It demonstrates a dual-image overlay preview with asynchronous
//! load-state coordination through a shared deduplicating cache, a pure
//! overlay visibility policy, and typed drag/drop data binding.

pub mod app;
pub mod config;
pub mod dnd;
pub mod domain;
pub mod error;
pub mod services;
pub mod ui;
