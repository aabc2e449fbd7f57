use std::fmt;

use shakmaty::{
    Board, CastlingMode, Chess, Color, EnPassantMode, File, Move, Piece, Position, PositionError,
    Role, Square,
    fen::{Fen, ParseFenError},
};

/// Halfmove clock at which the 75-move rule ends the game.
const SEVENTY_FIVE_MOVE_PLIES: u32 = 150;

/// A move as entered by two clicks: origin square, then destination square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
}

impl MoveRequest {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }
}

/// UCI-style notation, e.g. `e2e4`.
impl fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// Immutable copy of every piece on the board.
///
/// A new snapshot is taken from the engine after each applied move and
/// replaces the previous one wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot(Board);

impl BoardSnapshot {
    /// The standard starting position.
    pub fn initial() -> Self {
        Self(Chess::default().board().clone())
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.0.piece_at(square)
    }

    #[inline]
    pub fn is_occupied(&self, square: Square) -> bool {
        self.piece_at(square).is_some()
    }

    /// All occupied squares with their pieces.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::ALL
            .into_iter()
            .filter_map(|sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }
}

impl From<&Board> for BoardSnapshot {
    fn from(board: &Board) -> Self {
        Self(board.clone())
    }
}

/// Why a drawn game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawReason {
    InsufficientMaterial,
    SeventyFiveMoveRule,
}

/// Result state of the game after the last applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStatus {
    #[default]
    InProgress,
    Checkmate {
        winner: Color,
    },
    Stalemate,
    Draw(DrawReason),
}

impl GameStatus {
    /// Terminal statuses stay in effect until the game is reset.
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "in progress"),
            GameStatus::Checkmate {
                winner: Color::White,
            } => write!(f, "white wins by checkmate"),
            GameStatus::Checkmate {
                winner: Color::Black,
            } => write!(f, "black wins by checkmate"),
            GameStatus::Stalemate => write!(f, "draw by stalemate"),
            GameStatus::Draw(DrawReason::InsufficientMaterial) => {
                write!(f, "draw by insufficient material")
            }
            GameStatus::Draw(DrawReason::SeventyFiveMoveRule) => {
                write!(f, "draw by the 75-move rule")
            }
        }
    }
}

/// A legal destination for a piece, used for highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Target {
    pub square: Square,
    pub capture: bool,
}

/// The engine rejected a move; the position is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("illegal move {0}")]
pub struct IllegalMoveError(pub MoveRequest);

/// Failure to set up a position from FEN.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("invalid FEN: {0}")]
    Fen(#[from] ParseFenError),
    #[error("illegal position: {0}")]
    Position(#[from] PositionError<Chess>),
}

/// Chess rules as seen by the move controller.
///
/// The engine owns the canonical position. Implementations must leave the
/// position untouched when a move is rejected.
pub trait RulesEngine {
    /// Validate and play a move, returning the board after it.
    fn apply_move(&mut self, mv: MoveRequest) -> Result<BoardSnapshot, IllegalMoveError>;

    /// Status of the current position.
    fn status(&self) -> GameStatus;

    fn piece_at(&self, square: Square) -> Option<Piece>;

    /// Discard the game and return to the starting position.
    fn reset(&mut self) -> BoardSnapshot;

    /// Copy of the current board.
    fn snapshot(&self) -> BoardSnapshot;

    /// Legal destinations for the piece on `from`.
    fn legal_targets(&self, _from: Square) -> Vec<Target> {
        Vec::new()
    }

    /// Square of the side-to-move's king when it is in check.
    fn checked_king(&self) -> Option<Square> {
        None
    }
}

/// [`RulesEngine`] backed by a `shakmaty` position.
#[derive(Clone, Default)]
pub struct ShakmatyRules {
    position: Chess,
}

impl ShakmatyRules {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_position(position: Chess) -> Self {
        Self { position }
    }

    /// Load a position from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, SetupError> {
        let position: Chess = fen
            .trim()
            .parse::<Fen>()?
            .into_position(CastlingMode::Standard)?;
        Ok(Self::from_position(position))
    }

    #[inline]
    pub fn position(&self) -> &Chess {
        &self.position
    }

    /// Find the legal move a click pair stands for.
    ///
    /// Promotions only ever resolve to a queen since two clicks cannot
    /// choose a piece.
    fn find_move(&self, request: MoveRequest) -> Option<Move> {
        self.position
            .legal_moves()
            .into_iter()
            .filter(|mv| mv.promotion().is_none_or(|role| role == Role::Queen))
            .find(|mv| matches_request(mv, request))
    }
}

/// Whether `mv` is entered by clicking `request.from` then `request.to`.
fn matches_request(mv: &Move, request: MoveRequest) -> bool {
    match *mv {
        // Castling is entered as the king's two-square step or by moving
        // the king onto its own rook.
        Move::Castle { king, rook } => {
            king == request.from && (rook == request.to || castle_king_to(king, rook) == request.to)
        }
        _ => mv.from() == Some(request.from) && mv.to() == request.to,
    }
}

fn castle_king_to(king: Square, rook: Square) -> Square {
    let file = if rook.file() > king.file() {
        File::G
    } else {
        File::C
    };
    Square::from_coords(file, king.rank())
}

impl RulesEngine for ShakmatyRules {
    fn apply_move(&mut self, mv: MoveRequest) -> Result<BoardSnapshot, IllegalMoveError> {
        let legal = self.find_move(mv).ok_or(IllegalMoveError(mv))?;
        self.position.play_unchecked(legal);
        Ok(self.snapshot())
    }

    fn status(&self) -> GameStatus {
        let pos = &self.position;
        if pos.is_checkmate() {
            GameStatus::Checkmate { winner: !pos.turn() }
        } else if pos.is_stalemate() {
            GameStatus::Stalemate
        } else if pos.is_insufficient_material() {
            GameStatus::Draw(DrawReason::InsufficientMaterial)
        } else if pos.halfmoves() >= SEVENTY_FIVE_MOVE_PLIES {
            GameStatus::Draw(DrawReason::SeventyFiveMoveRule)
        } else {
            GameStatus::InProgress
        }
    }

    #[inline]
    fn piece_at(&self, square: Square) -> Option<Piece> {
        self.position.board().piece_at(square)
    }

    fn reset(&mut self) -> BoardSnapshot {
        self.position = Chess::default();
        self.snapshot()
    }

    fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::from(self.position.board())
    }

    fn legal_targets(&self, from: Square) -> Vec<Target> {
        self.position
            .legal_moves()
            .into_iter()
            .filter(|mv| mv.promotion().is_none_or(|role| role == Role::Queen))
            .filter_map(|mv| match mv {
                Move::Castle { king, rook } if king == from => Some(Target {
                    square: castle_king_to(king, rook),
                    capture: false,
                }),
                _ if mv.from() == Some(from) => Some(Target {
                    square: mv.to(),
                    capture: mv.is_capture(),
                }),
                _ => None,
            })
            .collect()
    }

    fn checked_king(&self) -> Option<Square> {
        if self.position.checkers().is_empty() {
            return None;
        }
        self.position.board().king_of(self.position.turn())
    }
}

impl fmt::Debug for ShakmatyRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fen = Fen::from_position(&self.position, EnPassantMode::Always);
        f.debug_struct("ShakmatyRules")
            .field("position", &format_args!("{fen}"))
            .finish()
    }
}
