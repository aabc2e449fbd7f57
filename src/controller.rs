use shakmaty::Square;

use crate::feedback::{BoardFeedback, compute_feedback};
use crate::geometry::BoardGeometry;
use crate::rules::{
    BoardSnapshot, GameStatus, IllegalMoveError, MoveRequest, RulesEngine, ShakmatyRules,
};

/// Which piece, if any, the player has picked up with the last click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    PieceSelected(Square),
}

impl SelectionState {
    #[inline]
    pub fn selected(self) -> Option<Square> {
        match self {
            SelectionState::Idle => None,
            SelectionState::PieceSelected(square) => Some(square),
        }
    }
}

/// Result of a click that was not rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Click outside the board, or on an empty square with nothing selected.
    Ignored,
    Selected(Square),
    Deselected(Square),
    Moved { mv: MoveRequest, status: GameStatus },
}

/// A click the controller refused. Neither variant is fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ClickError {
    #[error(transparent)]
    IllegalMove(#[from] IllegalMoveError),
    #[error("game is over ({0}); start a new game")]
    GameOver(GameStatus),
}

/// Notifications for the presentation layer, in the order they happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    SnapshotChanged(BoardSnapshot),
    SelectionChanged(SelectionState),
    MoveRejected(MoveRequest),
    /// Sent once per game, when it first reaches a terminal status.
    GameOver(GameStatus),
}

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone)]
pub struct RenderFrame<'a> {
    pub snapshot: &'a BoardSnapshot,
    pub status: GameStatus,
    pub selection: SelectionState,
    pub feedback: BoardFeedback,
}

/// Turns pointer clicks into moves on a [`RulesEngine`].
///
/// The first click on an occupied square selects it, a second click on
/// the same square drops the selection, and a click anywhere else submits
/// the move. Selection always returns to idle after a submission.
pub struct MoveController<R = ShakmatyRules> {
    engine: R,
    geometry: BoardGeometry,
    snapshot: BoardSnapshot,
    selection: SelectionState,
    status: GameStatus,
    game_over_sent: bool,
    events: Vec<ControllerEvent>,
}

impl MoveController<ShakmatyRules> {
    /// New game from the starting position with the default layout.
    pub fn new() -> Self {
        Self::with_engine(ShakmatyRules::new(), BoardGeometry::default())
    }
}

impl Default for MoveController<ShakmatyRules> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RulesEngine> MoveController<R> {
    pub fn with_engine(engine: R, geometry: BoardGeometry) -> Self {
        let snapshot = engine.snapshot();
        let status = engine.status();
        Self {
            engine,
            geometry,
            snapshot,
            selection: SelectionState::Idle,
            status,
            game_over_sent: false,
            events: Vec::new(),
        }
    }

    #[inline]
    pub fn engine(&self) -> &R {
        &self.engine
    }

    #[inline]
    pub fn geometry(&self) -> &BoardGeometry {
        &self.geometry
    }

    pub fn set_geometry(&mut self, geometry: BoardGeometry) {
        self.geometry = geometry;
    }

    #[inline]
    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn snapshot(&self) -> &BoardSnapshot {
        &self.snapshot
    }

    pub fn frame(&self) -> RenderFrame<'_> {
        RenderFrame {
            snapshot: &self.snapshot,
            status: self.status,
            selection: self.selection,
            feedback: compute_feedback(self.selection, &self.engine),
        }
    }

    /// Take all events emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<ControllerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Handle a click at pixel coordinates relative to the board widget.
    pub fn handle_pointer(&mut self, x: i32, y: i32) -> Result<ClickOutcome, ClickError> {
        match self.geometry.resolve(x, y) {
            Some(square) => self.handle_click(square),
            None => {
                log::trace!("click at ({x}, {y}) is outside the board");
                Ok(ClickOutcome::Ignored)
            }
        }
    }

    /// Advance the selection state machine with a click on `square`.
    pub fn handle_click(&mut self, square: Square) -> Result<ClickOutcome, ClickError> {
        if self.status.is_terminal() {
            return Err(ClickError::GameOver(self.status));
        }

        match self.selection {
            SelectionState::Idle => {
                if !self.snapshot.is_occupied(square) {
                    return Ok(ClickOutcome::Ignored);
                }
                log::debug!("selected {square}");
                self.set_selection(SelectionState::PieceSelected(square));
                Ok(ClickOutcome::Selected(square))
            }
            SelectionState::PieceSelected(origin) if origin == square => {
                log::debug!("deselected {square}");
                self.set_selection(SelectionState::Idle);
                Ok(ClickOutcome::Deselected(square))
            }
            SelectionState::PieceSelected(origin) => self.submit(MoveRequest::new(origin, square)),
        }
    }

    /// Start a new game from the initial position.
    pub fn reset(&mut self) {
        self.snapshot = self.engine.reset();
        self.selection = SelectionState::Idle;
        self.status = GameStatus::InProgress;
        self.game_over_sent = false;
        log::info!("new game");
        self.events
            .push(ControllerEvent::SelectionChanged(SelectionState::Idle));
        self.events
            .push(ControllerEvent::SnapshotChanged(self.snapshot.clone()));
    }

    fn submit(&mut self, mv: MoveRequest) -> Result<ClickOutcome, ClickError> {
        let result = self.engine.apply_move(mv);
        self.set_selection(SelectionState::Idle);

        let snapshot = match result {
            Ok(snapshot) => snapshot,
            Err(err) => {
                log::debug!("{err}");
                self.events.push(ControllerEvent::MoveRejected(mv));
                return Err(err.into());
            }
        };

        log::info!("played {mv}");
        self.snapshot = snapshot;
        self.events
            .push(ControllerEvent::SnapshotChanged(self.snapshot.clone()));

        self.status = self.engine.status();
        if self.status.is_terminal() && !self.game_over_sent {
            log::info!("game over: {}", self.status);
            self.game_over_sent = true;
            self.events.push(ControllerEvent::GameOver(self.status));
        }

        Ok(ClickOutcome::Moved {
            mv,
            status: self.status,
        })
    }

    fn set_selection(&mut self, selection: SelectionState) {
        if self.selection != selection {
            self.selection = selection;
            self.events.push(ControllerEvent::SelectionChanged(selection));
        }
    }
}

impl<R: std::fmt::Debug> std::fmt::Debug for MoveController<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoveController")
            .field("engine", &self.engine)
            .field("selection", &self.selection)
            .field("status", &self.status)
            .field("pending_events", &self.events.len())
            .finish()
    }
}
