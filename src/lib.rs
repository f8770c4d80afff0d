use wasm_bindgen::prelude::*;

pub mod board;
pub mod game;
pub mod rules;
pub mod types;

pub use board::{Board, BoardError, Cells};
pub use game::{GameController, GameEvent, GameObserver, GameState, MoveOutcome, Phase};
pub use types::{CellState, Outcome, Player, Position, Status, StoneCount};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

/// A single game exposed to JavaScript. Each instance owns its own state.
#[wasm_bindgen]
pub struct ReversiGame {
    controller: GameController,
}

#[wasm_bindgen]
impl ReversiGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            controller: GameController::new(),
        }
    }

    /// Returns the serialized `MoveOutcome`. Illegal clicks come back as `Rejected`.
    pub fn place_stone(&mut self, row: u32, col: u32) -> Result<JsValue, JsValue> {
        let outcome = self.controller.place_stone(row as usize, col as usize);
        Ok(serde_wasm_bindgen::to_value(&outcome)?)
    }

    pub fn reset(&mut self) {
        self.controller.reset();
    }

    /// Row-major cells: 0=empty, 1=black, 2=white.
    pub fn board(&self) -> Vec<u8> {
        self.controller.board().to_array().to_vec()
    }

    pub fn status(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.controller.status())?)
    }

    pub fn legal_moves(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.controller.legal_moves())?)
    }

    pub fn is_pass(&self) -> bool {
        self.controller.is_pass()
    }
}

impl Default for ReversiGame {
    fn default() -> Self {
        Self::new()
    }
}
