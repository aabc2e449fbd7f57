use std::io::{self, Write};

use shakmaty::{Color, File, Piece, Rank, Role, Square};

use crate::BoardDisplay;
use crate::controller::RenderFrame;
use crate::feedback::SquareFeedback;

/// Terminal-based board display.
///
/// Renders a [`RenderFrame`] as an 8×8 grid of piece letters with ANSI
/// color-coded squares for highlights, followed by the game status.
#[derive(Debug, Default)]
pub struct TerminalDisplay;

impl TerminalDisplay {
    /// Create a new terminal display.
    pub fn new() -> Self {
        Self
    }
}

/// Error type for terminal display operations.
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("failed to write to terminal: {0}")]
    Io(#[from] io::Error),
}

impl BoardDisplay for TerminalDisplay {
    type Error = DisplayError;

    fn show(&mut self, frame: &RenderFrame<'_>) -> Result<(), Self::Error> {
        render_frame(&mut io::stdout(), frame)
    }
}

/// Render a frame to any writer. Extracted for testability.
pub(crate) fn render_frame(w: &mut impl Write, frame: &RenderFrame<'_>) -> Result<(), DisplayError> {
    for rank in Rank::ALL.iter().rev() {
        write!(w, " {} ", rank.char())?;
        for file in File::ALL {
            let square = Square::from_coords(file, *rank);
            let symbol = piece_symbol(frame.snapshot.piece_at(square));
            match highlight_code(frame.feedback.get(square)) {
                Some(code) => write!(w, "\x1b[{code}m {symbol} \x1b[0m")?,
                None => write!(w, " {symbol} ")?,
            }
        }
        writeln!(w)?;
    }
    writeln!(w, "    a  b  c  d  e  f  g  h")?;

    if frame.status.is_terminal() {
        writeln!(w)?;
        writeln!(w, "🏁 Game over: {}", frame.status)?;
    }
    w.flush()?;
    Ok(())
}

/// ANSI background code for a highlighted square.
fn highlight_code(feedback: Option<SquareFeedback>) -> Option<u8> {
    match feedback? {
        SquareFeedback::Destination => Some(44),
        SquareFeedback::Capture => Some(41),
        SquareFeedback::Origin => Some(42),
        SquareFeedback::Check => Some(45),
    }
}

/// FEN-style letter for a piece, `·` for an empty square.
fn piece_symbol(piece: Option<Piece>) -> char {
    let Some(piece) = piece else {
        return '·';
    };
    let letter = match piece.role {
        Role::Pawn => 'p',
        Role::Knight => 'n',
        Role::Bishop => 'b',
        Role::Rook => 'r',
        Role::Queen => 'q',
        Role::King => 'k',
    };
    match piece.color {
        Color::White => letter.to_ascii_uppercase(),
        Color::Black => letter,
    }
}
