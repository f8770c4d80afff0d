use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::board::{Board, Cells};
use crate::rules;
use crate::types::{Outcome, Player, Position, Status, StoneCount};

/// Notifications for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    StonePlaced {
        player: Player,
        position: Position,
        flipped: Vec<Position>,
    },
    /// `player` had no legal move and lost their turn.
    Passed { player: Player },
    GameOver { outcome: Outcome, count: StoneCount },
    Reset,
}

pub trait GameObserver: Send + Sync {
    fn notify(&self, event: &GameEvent);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl GameObserver for NoopObserver {
    fn notify(&self, _event: &GameEvent) {}
}

/// Why a `place_stone` call was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, thiserror::Error)]
pub enum RejectReason {
    #[error("game is already over")]
    GameOver,
    #[error("row/col out of range")]
    OutOfBounds,
    #[error("cell is occupied")]
    Occupied,
    #[error("illegal move")]
    NoBracket,
}

/// Result of a `place_stone` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MoveOutcome {
    Rejected(RejectReason),
    /// The move was played and the turn passed to the opponent.
    Played { flipped: Vec<Position> },
    /// The move was played but the opponent had no reply, so the mover goes again.
    PlayedWithPass {
        flipped: Vec<Position>,
        passed: Player,
    },
    GameOver {
        flipped: Vec<Position>,
        outcome: Outcome,
    },
}

impl MoveOutcome {
    pub fn is_accepted(&self) -> bool {
        !matches!(self, Self::Rejected(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingMove(Player),
    GameOver(Outcome),
}

/// Everything that changes during a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,
    pub current_player: Player,
    pub active: bool,
    /// Set once, when `active` turns false.
    pub outcome: Option<Outcome>,
}

impl GameState {
    /// Opening position with Black to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_player: Player::Black,
            active: true,
            outcome: None,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

pub struct GameController {
    state: GameState,
    is_pass: bool,
    flipped: Vec<Position>,
    observer: Box<dyn GameObserver>,
}

impl GameController {
    pub fn new() -> Self {
        Self::with_observer(Box::new(NoopObserver))
    }

    pub fn with_observer(observer: Box<dyn GameObserver>) -> Self {
        Self {
            state: GameState::new(),
            is_pass: false,
            flipped: Vec::new(),
            observer,
        }
    }

    /// Plays a stone for the current player.
    ///
    /// Illegal requests leave the game untouched and return
    /// [`MoveOutcome::Rejected`]; they are not errors.
    #[instrument(skip(self), fields(player = %self.state.current_player))]
    pub fn place_stone(&mut self, row: usize, col: usize) -> MoveOutcome {
        let position = match self.check_move(row, col) {
            Ok(position) => position,
            Err(reason) => {
                debug!(%reason, "move rejected");
                return MoveOutcome::Rejected(reason);
            }
        };

        let player = self.state.current_player;
        let flipped = rules::apply_move(&mut self.state.board, row, col, player);
        self.is_pass = false;
        self.flipped = flipped.clone();
        self.emit(GameEvent::StonePlaced {
            player,
            position,
            flipped: flipped.clone(),
        });

        let board = &self.state.board;
        if !rules::has_valid_move(board, Player::Black) && !rules::has_valid_move(board, Player::White)
        {
            let outcome = self.finish();
            return MoveOutcome::GameOver { flipped, outcome };
        }

        let opponent = player.opponent();
        if rules::has_valid_move(board, opponent) {
            self.state.current_player = opponent;
            return MoveOutcome::Played { flipped };
        }

        // Opponent is stuck: the turn comes back to the mover.
        if !rules::has_valid_move(board, player) {
            let outcome = self.finish();
            return MoveOutcome::GameOver { flipped, outcome };
        }

        self.is_pass = true;
        info!(passed = %opponent, "no valid moves, passing turn");
        self.emit(GameEvent::Passed { player: opponent });
        MoveOutcome::PlayedWithPass {
            flipped,
            passed: opponent,
        }
    }

    /// Restarts from the opening position, whatever the current phase.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.state = GameState::new();
        self.is_pass = false;
        self.flipped.clear();
        debug!("game reset");
        self.emit(GameEvent::Reset);
    }

    pub fn board_snapshot(&self) -> Cells {
        self.state.board.cells()
    }

    pub fn board(&self) -> &Board {
        &self.state.board
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> Status {
        let count = self.state.board.count_stones();
        Status {
            current_player: self.state.current_player,
            active: self.state.active,
            winner: self.state.outcome,
            black_count: count.black,
            white_count: count.white,
        }
    }

    pub fn phase(&self) -> Phase {
        match self.state.outcome {
            Some(outcome) if !self.state.active => Phase::GameOver(outcome),
            _ => Phase::AwaitingMove(self.state.current_player),
        }
    }

    /// Legal moves for the player to act; empty once the game is over.
    pub fn legal_moves(&self) -> Vec<Position> {
        if !self.state.active {
            return Vec::new();
        }
        rules::legal_moves(&self.state.board, self.state.current_player)
    }

    /// Stones flipped by the latest accepted move.
    pub fn last_flipped(&self) -> &[Position] {
        &self.flipped
    }

    /// Contract:
    /// - `true` when the latest accepted move made the opponent pass.
    /// - `false` after a normal move, at game over, and after reset.
    pub fn is_pass(&self) -> bool {
        self.is_pass
    }

    fn check_move(&self, row: usize, col: usize) -> Result<Position, RejectReason> {
        if !self.state.active {
            return Err(RejectReason::GameOver);
        }

        let position = u8::try_from(row)
            .ok()
            .zip(u8::try_from(col).ok())
            .and_then(|(row, col)| Position::new(row, col))
            .ok_or(RejectReason::OutOfBounds)?;

        if !self.state.board.get(row, col).is_ok_and(|cell| cell.is_empty()) {
            return Err(RejectReason::Occupied);
        }
        if !rules::is_valid_move(&self.state.board, row, col, self.state.current_player) {
            return Err(RejectReason::NoBracket);
        }

        Ok(position)
    }

    fn finish(&mut self) -> Outcome {
        let count = self.state.board.count_stones();
        let outcome = count.outcome();
        self.state.active = false;
        self.state.outcome = Some(outcome);
        info!(black = count.black, white = count.white, ?outcome, "game over");
        self.emit(GameEvent::GameOver { outcome, count });
        outcome
    }

    fn emit(&self, event: GameEvent) {
        self.observer.notify(&event);
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, current_player: Player) {
        self.state = GameState {
            board,
            current_player,
            active: true,
            outcome: None,
        };
        self.is_pass = false;
        self.flipped.clear();
    }
}

impl Default for GameController {
    fn default() -> Self {
        Self::new()
    }
}
