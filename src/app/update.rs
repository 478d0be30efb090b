// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.

use super::{App, Message};
use crate::services::control_store::ControlEvent;
use crate::ui::board_dialog;
use crate::ui::control_preview;
use iced::Task;

impl App {
    /// Routes one message and returns any follow-up work.
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Preview { unit_id, message } => {
                let effect = match self
                    .previews
                    .iter_mut()
                    .find(|p| p.unit_id() == &unit_id)
                {
                    Some(preview) => preview.handle(message),
                    None => control_preview::Effect::None,
                };
                match effect {
                    control_preview::Effect::Dispatch(event) => self.apply_event(event),
                    control_preview::Effect::None => Task::none(),
                }
            }

            Message::ImageFetched { ticket, result } => {
                if self.cache.apply(&ticket, result) {
                    // Descriptor memos key on the resolved base image, so a
                    // landed fetch may change them.
                    for preview in &mut self.previews {
                        preview.refresh_bindings(&self.cache);
                    }
                }
                Task::none()
            }

            Message::OpenBoardDialog { image } => {
                self.board_dialog = Some(board_dialog::State::new(
                    image,
                    None,
                    self.boards.all().to_vec(),
                ));
                Task::none()
            }

            Message::BoardDialog(message) => {
                let Some(dialog) = &mut self.board_dialog else {
                    return Task::none();
                };
                match dialog.handle(message) {
                    board_dialog::Effect::None => {}
                    board_dialog::Effect::Closed => {
                        self.board_dialog = None;
                    }
                    board_dialog::Effect::MoveToBoard { image, board } => {
                        // The move itself belongs to the gallery backend;
                        // the panel only reports the request.
                        log::info!("moving image {image} to board {}", board.as_str());
                        self.board_dialog = None;
                    }
                }
                Task::none()
            }

            Message::ProcessingStateChanged { unit_id, pending } => {
                if pending {
                    self.pending.mark(unit_id);
                } else {
                    self.pending.clear(&unit_id);
                }
                Task::none()
            }

            Message::ProcessedImageReady { unit_id, image } => {
                self.apply_event(ControlEvent::ProcessedImageChanged { unit_id, image })
            }
        }
    }
}
