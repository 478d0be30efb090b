// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.

use super::{App, Message};
use crate::ui::control_preview;
use iced::widget::{button, container, text, Column};
use iced::{Element, Length};

/// Height of one preview panel.
const PREVIEW_HEIGHT: f32 = 280.0;

impl App {
    /// Renders the panel list, or the board dialog while it is open.
    pub fn view(&self) -> Element<'_, Message> {
        if let Some(dialog) = &self.board_dialog {
            return dialog.view().map(Message::BoardDialog);
        }

        let mut panels = Column::new().spacing(16).padding(16);
        for preview in &self.previews {
            let layers = preview.evaluate(&self.cache, &self.pending);
            let unit_id = preview.unit_id().clone();

            let panel = control_preview::view(&layers).map(move |message| Message::Preview {
                unit_id: unit_id.clone(),
                message,
            });

            let board_button = button(text("Move to board...")).on_press_maybe(
                layers
                    .base
                    .as_ref()
                    .map(|base| Message::OpenBoardDialog {
                        image: base.name.clone(),
                    }),
            );

            panels = panels
                .push(
                    container(panel)
                        .width(Length::Fill)
                        .height(Length::Fixed(PREVIEW_HEIGHT)),
                )
                .push(board_button);
        }

        container(panels)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}
