pub mod controller;
pub mod feedback;
pub mod geometry;
pub mod render;
pub mod rules;
pub mod terminal;

pub use controller::{
    ClickError, ClickOutcome, ControllerEvent, MoveController, RenderFrame, SelectionState,
};
pub use geometry::{BoardGeometry, resolve_square};
pub use rules::{
    BoardSnapshot, GameStatus, IllegalMoveError, MoveRequest, RulesEngine, ShakmatyRules,
};

/// Trait for presenting the board to the player.
///
/// Abstracts over the terminal front end and any windowing toolkit that
/// replays [`render::DrawList`]s. Receives the whole frame every time;
/// implementations keep no game state of their own.
pub trait BoardDisplay {
    /// Error type for display update failures.
    type Error: std::fmt::Debug + std::fmt::Display;

    /// Show the given frame on the display.
    fn show(&mut self, frame: &RenderFrame<'_>) -> Result<(), Self::Error>;
}
