use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Playing,
    Won,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::Playing
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlipOutcome {
    Flipped,
    Won,
}

impl FlipOutcome {
    pub const fn is_win(self) -> bool {
        matches!(self, Self::Won)
    }
}

/// Holds the current board and applies moves to it one after the other.
///
/// Every flip reads the board produced by the previous flip and replaces it wholesale. Once the lights are all out
/// the game is over and further flips are refused.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayEngine {
    board: Board,
    state: GameState,
}

impl PlayEngine {
    pub fn new(board: Board) -> Self {
        let mut engine = Self {
            board,
            state: Default::default(),
        };
        if engine.board.has_won() {
            log::debug!("Board starts with every light off");
            engine.state = GameState::Won;
        }
        engine
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn is_lit(&self, coords: Coord2) -> bool {
        self.board.is_lit(coords)
    }

    pub fn lit_count(&self) -> CellCount {
        self.board.lit_count()
    }

    pub fn flip(&mut self, coords: Coord2) -> Result<FlipOutcome> {
        let coords = self.board.validate_coords(coords)?;
        self.check_playing()?;

        self.board = self.board.flip_cells_around(coords);
        log::trace!(
            "flipped around {:?}, {} lights on",
            coords,
            self.board.lit_count()
        );

        if self.board.has_won() {
            log::debug!("All lights are out");
            self.state = GameState::Won;
            Ok(FlipOutcome::Won)
        } else {
            Ok(FlipOutcome::Flipped)
        }
    }

    fn check_playing(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyWon)
        } else {
            Ok(())
        }
    }
}
