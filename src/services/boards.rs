// SPDX-License-Identifier: MPL-2.0
//! Named image collections ("boards") and their minimal store.
//!
//! Just enough collaborator surface for the reassignment dialog; list
//! population and persistence live with the gallery backend.

use std::fmt;

/// Stable identifier of a board.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoardId(String);

impl BoardId {
    /// Creates a board id from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A named collection an image can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub id: BoardId,
    pub name: String,
}

impl Board {
    /// Creates a board.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: BoardId::new(id),
            name: name.into(),
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// All boards known to the panel.
#[derive(Debug, Clone, Default)]
pub struct BoardStore {
    boards: Vec<Board>,
}

impl BoardStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a board.
    pub fn add(&mut self, board: Board) {
        self.boards.push(board);
    }

    /// All boards in insertion order.
    #[must_use]
    pub fn all(&self) -> &[Board] {
        &self.boards
    }

    /// Looks up a board by id.
    #[must_use]
    pub fn find(&self, id: &BoardId) -> Option<&Board> {
        self.boards.iter().find(|b| &b.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_returns_added_board() {
        let mut store = BoardStore::new();
        store.add(Board::new("b1", "Portraits"));

        let found = store.find(&BoardId::new("b1")).unwrap();
        assert_eq!(found.name, "Portraits");
        assert!(store.find(&BoardId::new("b2")).is_none());
    }

    #[test]
    fn display_uses_board_name() {
        let board = Board::new("b1", "Portraits");
        assert_eq!(board.to_string(), "Portraits");
    }
}
