//! Painting as data: a frame goes in, a list of draw commands comes out.
//!
//! The draw list is toolkit-agnostic. A windowing front end replays it
//! onto its canvas; tests inspect it directly.

use shakmaty::{File, Piece, Rank, Square};

use crate::controller::RenderFrame;
use crate::feedback::SquareFeedback;
use crate::geometry::BoardGeometry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

pub const FRAME_COLOR: Rgb = Rgb::new(200, 200, 200);
pub const LIGHT_SQUARE: Rgb = Rgb::new(240, 217, 181);
pub const DARK_SQUARE: Rgb = Rgb::new(181, 136, 99);
pub const LABEL_COLOR: Rgb = Rgb::new(0, 0, 0);
pub const ORIGIN_HIGHLIGHT: Rgb = Rgb::new(130, 151, 105);
pub const DESTINATION_HIGHLIGHT: Rgb = Rgb::new(100, 111, 64);
pub const CAPTURE_HIGHLIGHT: Rgb = Rgb::new(200, 80, 70);
pub const CHECK_HIGHLIGHT: Rgb = Rgb::new(230, 60, 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    FillRect { rect: Rect, color: Rgb },
    /// Piece sprite scaled to `rect`.
    Piece { rect: Rect, piece: Piece },
    Text { x: i32, y: i32, text: String, color: Rgb },
    /// Result popup shown once the game has ended.
    Overlay { text: String },
}

/// Ordered draw commands; later commands paint over earlier ones.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DrawList(Vec<DrawCommand>);

impl DrawList {
    #[inline]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn push(&mut self, command: DrawCommand) {
        self.0.push(command);
    }
}

/// Square colour; a1 is dark.
pub fn square_color(square: Square) -> Rgb {
    if (square.file() as u32 + square.rank() as u32) % 2 == 0 {
        DARK_SQUARE
    } else {
        LIGHT_SQUARE
    }
}

fn highlight_color(feedback: SquareFeedback) -> Rgb {
    match feedback {
        SquareFeedback::Origin => ORIGIN_HIGHLIGHT,
        SquareFeedback::Destination => DESTINATION_HIGHLIGHT,
        SquareFeedback::Capture => CAPTURE_HIGHLIGHT,
        SquareFeedback::Check => CHECK_HIGHLIGHT,
    }
}

fn square_rect(geometry: &BoardGeometry, square: Square) -> Rect {
    let (x, y) = geometry.square_origin(square);
    Rect {
        x,
        y,
        width: geometry.square_size,
        height: geometry.square_size,
    }
}

/// Produce the draw list for one frame.
pub fn render(frame: &RenderFrame<'_>, geometry: &BoardGeometry) -> DrawList {
    let mut list = DrawList::default();
    let board = geometry.board_size();
    let size = geometry.square_size as i32;

    list.push(DrawCommand::FillRect {
        rect: Rect {
            x: 0,
            y: 0,
            width: board + 2 * geometry.origin_x.max(0) as u32,
            height: board + 2 * geometry.origin_y.max(0) as u32,
        },
        color: FRAME_COLOR,
    });

    for square in Square::ALL {
        let rect = square_rect(geometry, square);
        list.push(DrawCommand::FillRect {
            rect,
            color: square_color(square),
        });
    }

    for &(square, feedback) in frame.feedback.squares() {
        list.push(DrawCommand::FillRect {
            rect: square_rect(geometry, square),
            color: highlight_color(feedback),
        });
    }

    push_labels(&mut list, geometry, size);

    for (square, piece) in frame.snapshot.pieces() {
        list.push(DrawCommand::Piece {
            rect: square_rect(geometry, square),
            piece,
        });
    }

    if frame.status.is_terminal() {
        list.push(DrawCommand::Overlay {
            text: frame.status.to_string(),
        });
    }

    list
}

/// File letters above and below the board, rank numbers on both sides.
fn push_labels(list: &mut DrawList, geometry: &BoardGeometry, size: i32) {
    let board = geometry.board_size() as i32;
    let (left, top) = (geometry.origin_x, geometry.origin_y);

    for file in File::ALL {
        let x = left + file as i32 * size + size / 2 - 7;
        for y in [top - 6, top + board + top / 2 + 4] {
            list.push(DrawCommand::Text {
                x,
                y,
                text: file.upper_char().to_string(),
                color: LABEL_COLOR,
            });
        }
    }

    for rank in Rank::ALL {
        let y = top + (7 - rank as i32) * size + size / 2 + 5;
        for x in [left / 2 - 3, left + board + left / 2 - 3] {
            list.push(DrawCommand::Text {
                x,
                y,
                text: rank.char().to_string(),
                color: LABEL_COLOR,
            });
        }
    }
}
