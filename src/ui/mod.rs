// SPDX-License-Identifier: MPL-2.0
//! UI components of the panel.

pub mod board_dialog;
pub mod control_preview;
