// SPDX-License-Identifier: MPL-2.0
//! Confirmation dialog for moving an image to a different board.
//!
//! Simple form glue: pick a board, confirm, hand the move back to the
//! caller. The board list is supplied by the caller; this component never
//! queries the gallery itself.

use crate::domain::ImageName;
use crate::services::boards::{Board, BoardId};
use iced::widget::{button, column, container, pick_list, row, text};
use iced::{Element, Length};

/// Messages for the board dialog.
#[derive(Debug, Clone)]
pub enum Message {
    /// A board was picked from the list.
    BoardSelected(Board),
    /// The confirm button was pressed.
    ConfirmPressed,
    /// The cancel button was pressed.
    CancelPressed,
}

/// Effects produced by the dialog.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// No effect.
    None,
    /// The dialog was dismissed without action.
    Closed,
    /// Move `image` to `board`.
    MoveToBoard { image: ImageName, board: BoardId },
}

/// Dialog state. Presence of the dialog is modeled by the caller holding
/// `Option<State>`.
#[derive(Debug, Clone)]
pub struct State {
    image: ImageName,
    current_board: Option<BoardId>,
    boards: Vec<Board>,
    selected: Option<Board>,
}

impl State {
    /// Opens the dialog for `image`, currently on `current_board`.
    #[must_use]
    pub fn new(image: ImageName, current_board: Option<BoardId>, boards: Vec<Board>) -> Self {
        Self {
            image,
            current_board,
            boards,
            selected: None,
        }
    }

    /// The image being moved.
    #[must_use]
    pub fn image(&self) -> &ImageName {
        &self.image
    }

    /// The board the image currently sits on, if any.
    #[must_use]
    pub fn current_board(&self) -> Option<&BoardId> {
        self.current_board.as_ref()
    }

    /// The board picked so far.
    #[must_use]
    pub fn selected(&self) -> Option<&Board> {
        self.selected.as_ref()
    }

    /// Handles a dialog message.
    ///
    /// Confirming without a selection is a no-op; the confirm button is
    /// disabled until a board is picked.
    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::BoardSelected(board) => {
                self.selected = Some(board);
                Effect::None
            }
            Message::ConfirmPressed => match &self.selected {
                Some(board) => Effect::MoveToBoard {
                    image: self.image.clone(),
                    board: board.id.clone(),
                },
                None => Effect::None,
            },
            Message::CancelPressed => Effect::Closed,
        }
    }

    /// Renders the dialog body.
    #[must_use]
    pub fn view(&self) -> Element<'_, Message> {
        let confirm = button(text("Add to Board"))
            .on_press_maybe(self.selected.is_some().then_some(Message::ConfirmPressed));

        let body = column![
            text("Move Image to Board"),
            text("Moving this image to a board will remove it from its existing board."),
            pick_list(
                self.boards.clone(),
                self.selected.clone(),
                Message::BoardSelected,
            )
            .placeholder("Select Board"),
            row![
                button(text("Cancel")).on_press(Message::CancelPressed),
                confirm,
            ]
            .spacing(8),
        ]
        .spacing(12);

        container(body).width(Length::Shrink).padding(16).into()
    }
}
