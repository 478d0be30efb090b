// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::domain::{ImageName, ImageResource, UnitId};
use crate::error::Error;
use crate::services::image_cache::FetchTicket;
use crate::ui::board_dialog;
use crate::ui::control_preview;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    /// A preview panel message, addressed by unit.
    Preview {
        unit_id: UnitId,
        message: control_preview::Message,
    },
    /// A keyed image fetch completed.
    ImageFetched {
        ticket: FetchTicket,
        result: Result<ImageResource, Error>,
    },
    /// Open the board reassignment dialog for an image.
    OpenBoardDialog { image: ImageName },
    /// A board dialog message.
    BoardDialog(board_dialog::Message),
    /// The processing pipeline started or finished work on a unit.
    ProcessingStateChanged { unit_id: UnitId, pending: bool },
    /// The processing pipeline produced (or invalidated) a processed image.
    ProcessedImageReady {
        unit_id: UnitId,
        image: Option<ImageName>,
    },
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional backend base URL override (e.g. `http://127.0.0.1:9090`).
    pub backend: Option<String>,
    /// Optional gallery directory override for backend-less runs.
    pub gallery: Option<String>,
    /// Optional image identifier to attach to the first unit on startup.
    pub image: Option<String>,
}
