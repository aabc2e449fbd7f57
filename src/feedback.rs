use shakmaty::Square;

use crate::controller::SelectionState;
use crate::rules::RulesEngine;

/// Type of highlight for an individual square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SquareFeedback {
    /// The selected piece
    Origin,
    /// Legal quiet move for the selected piece
    Destination,
    /// Legal capture for the selected piece
    Capture,
    /// King of the side to move, currently in check
    Check,
}

/// Highlights for the current board state.
///
/// Computed by [`compute_feedback`] and drawn by the renderer on top of the
/// board squares. Holds at most one entry per square.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardFeedback {
    squares: Vec<(Square, SquareFeedback)>,
}

impl BoardFeedback {
    /// Create empty feedback (no highlights)
    #[inline]
    pub const fn new() -> Self {
        Self {
            squares: Vec::new(),
        }
    }

    #[inline]
    pub fn squares(&self) -> &[(Square, SquareFeedback)] {
        &self.squares
    }

    /// Get feedback for a specific square, if any
    #[inline]
    pub fn get(&self, square: Square) -> Option<SquareFeedback> {
        self.squares
            .iter()
            .find(|(sq, _)| *sq == square)
            .map(|(_, feedback)| *feedback)
    }

    /// Set feedback for a square, replacing any existing entry.
    pub fn set(&mut self, square: Square, feedback: SquareFeedback) {
        match self.squares.iter_mut().find(|(sq, _)| *sq == square) {
            Some(entry) => entry.1 = feedback,
            None => self.squares.push((square, feedback)),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }
}

/// Compute highlights from the selection and the engine's position.
///
/// - Piece selected: origin plus its legal destinations and captures
/// - King in check: marked unless it is the selected piece
pub fn compute_feedback(selection: SelectionState, rules: &impl RulesEngine) -> BoardFeedback {
    let mut feedback = BoardFeedback::new();

    if let Some(king) = rules.checked_king() {
        feedback.set(king, SquareFeedback::Check);
    }

    if let Some(from) = selection.selected() {
        feedback.set(from, SquareFeedback::Origin);
        for target in rules.legal_targets(from) {
            let kind = if target.capture {
                SquareFeedback::Capture
            } else {
                SquareFeedback::Destination
            };
            feedback.set(target.square, kind);
        }
    }

    feedback
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::ShakmatyRules;

    fn rules_from_fen(fen: &str) -> ShakmatyRules {
        ShakmatyRules::from_fen(fen).expect("valid FEN")
    }

    #[test]
    fn test_no_feedback_when_idle() {
        let feedback = compute_feedback(SelectionState::Idle, &ShakmatyRules::new());

        assert!(feedback.is_empty());
    }

    #[test]
    fn test_show_destinations_for_selected_piece() {
        let feedback = compute_feedback(
            SelectionState::PieceSelected(Square::E2),
            &ShakmatyRules::new(),
        );

        assert_eq!(feedback.get(Square::E2), Some(SquareFeedback::Origin));
        assert_eq!(feedback.get(Square::E3), Some(SquareFeedback::Destination));
        assert_eq!(feedback.get(Square::E4), Some(SquareFeedback::Destination));
        assert_eq!(feedback.get(Square::D2), None);
    }

    #[test]
    fn test_distinguish_captures() {
        let rules = rules_from_fen("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 1");

        let feedback = compute_feedback(SelectionState::PieceSelected(Square::E4), &rules);

        assert_eq!(feedback.get(Square::E4), Some(SquareFeedback::Origin));
        assert_eq!(feedback.get(Square::E5), Some(SquareFeedback::Destination));
        assert_eq!(feedback.get(Square::D5), Some(SquareFeedback::Capture));
    }

    #[test]
    fn test_en_passant_is_a_capture() {
        let rules = rules_from_fen("rnbqkbnr/1pp1pppp/p7/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 1");

        let feedback = compute_feedback(SelectionState::PieceSelected(Square::E5), &rules);

        assert_eq!(feedback.get(Square::D6), Some(SquareFeedback::Capture));
        assert_eq!(feedback.get(Square::E6), Some(SquareFeedback::Destination));
    }

    #[test]
    fn test_opponent_piece_has_no_destinations() {
        let feedback = compute_feedback(
            SelectionState::PieceSelected(Square::E7),
            &ShakmatyRules::new(),
        );

        assert_eq!(feedback.squares(), &[(Square::E7, SquareFeedback::Origin)]);
    }

    #[test]
    fn test_check_marks_king() {
        let rules = rules_from_fen("rnbqkbnr/ppp2ppp/3p4/1B2p3/4P3/8/PPPP1PPP/RNBQK1NR b KQkq - 1 3");

        let feedback = compute_feedback(SelectionState::Idle, &rules);

        assert_eq!(feedback.get(Square::E8), Some(SquareFeedback::Check));
    }

    #[test]
    fn test_selected_king_in_check_shows_origin() {
        let rules = rules_from_fen("rnbqkbnr/ppp2ppp/3p4/1B2p3/4P3/8/PPPP1PPP/RNBQK1NR b KQkq - 1 3");

        let feedback = compute_feedback(SelectionState::PieceSelected(Square::E8), &rules);

        assert_eq!(feedback.get(Square::E8), Some(SquareFeedback::Origin));
        assert_eq!(feedback.get(Square::E7), Some(SquareFeedback::Destination));
    }

    #[test]
    fn test_set_replaces_existing_entry() {
        let mut feedback = BoardFeedback::new();
        feedback.set(Square::A1, SquareFeedback::Destination);
        feedback.set(Square::A1, SquareFeedback::Capture);

        assert_eq!(feedback.squares().len(), 1);
        assert_eq!(feedback.get(Square::A1), Some(SquareFeedback::Capture));
    }
}
