use shakmaty::{File, Rank, Square};

/// Side length of the board widget in the default layout.
pub const DEFAULT_WIDGET_SIZE: u32 = 640;

/// Total frame around the board (split evenly on both sides).
pub const DEFAULT_PADDING: u32 = 40;

/// Map a pointer position to the board square under it.
///
/// Pixel rows grow downward, so the top row is rank 8 and the left column
/// is file a. Returns `None` for clicks outside the 8x8 grid.
pub fn resolve_square(
    x: i32,
    y: i32,
    origin_x: i32,
    origin_y: i32,
    square_size: u32,
) -> Option<Square> {
    if square_size == 0 {
        return None;
    }
    let dx = i64::from(x) - i64::from(origin_x);
    let dy = i64::from(y) - i64::from(origin_y);
    // Truncating division would fold -1..0 into column 0.
    if dx < 0 || dy < 0 {
        return None;
    }

    let size = i64::from(square_size);
    let col = dx / size;
    let row = dy / size;
    if col > 7 || row > 7 {
        return None;
    }

    Some(Square::from_coords(
        File::new(col as u32),
        Rank::new(7 - row as u32),
    ))
}

/// Pixel layout of the board inside its widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardGeometry {
    pub origin_x: i32,
    pub origin_y: i32,
    pub square_size: u32,
}

impl Default for BoardGeometry {
    fn default() -> Self {
        Self::fit(DEFAULT_WIDGET_SIZE, DEFAULT_WIDGET_SIZE, DEFAULT_PADDING)
    }
}

impl BoardGeometry {
    #[inline]
    pub const fn new(origin_x: i32, origin_y: i32, square_size: u32) -> Self {
        Self {
            origin_x,
            origin_y,
            square_size,
        }
    }

    /// Center the largest board that fits in a `width` x `height` widget
    /// after leaving `padding` pixels for the frame.
    pub fn fit(width: u32, height: u32, padding: u32) -> Self {
        let board = width.min(height).saturating_sub(padding);
        let square_size = board / 8;
        let origin_x = (width.saturating_sub(board) / 2) as i32;
        let origin_y = (height.saturating_sub(board) / 2) as i32;
        Self::new(origin_x, origin_y, square_size)
    }

    /// Width and height of the 8x8 grid in pixels.
    #[inline]
    pub fn board_size(&self) -> u32 {
        self.square_size * 8
    }

    #[inline]
    pub fn resolve(&self, x: i32, y: i32) -> Option<Square> {
        resolve_square(x, y, self.origin_x, self.origin_y, self.square_size)
    }

    /// Top-left pixel of `square`.
    pub fn square_origin(&self, square: Square) -> (i32, i32) {
        let size = self.square_size as i32;
        let col = square.file() as i32;
        let row = 7 - square.rank() as i32;
        (self.origin_x + col * size, self.origin_y + row * size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    #[test]
    fn test_default_matches_widget_layout() {
        let geometry = BoardGeometry::default();

        assert_eq!(geometry, BoardGeometry::new(20, 20, 75));
        assert_eq!(geometry.board_size(), 600);
    }

    #[test]
    fn test_fit_centers_in_wide_widget() {
        let geometry = BoardGeometry::fit(1000, 440, 40);

        assert_eq!(geometry.square_size, 50);
        assert_eq!(geometry.origin_x, 300);
        assert_eq!(geometry.origin_y, 20);
    }

    #[test_case(20, 20, Square::A8; "top left corner")]
    #[test_case(619, 619, Square::H1; "bottom right corner")]
    #[test_case(20 + 4 * 75, 20 + 6 * 75, Square::E2; "e2")]
    #[test_case(20 + 4 * 75 + 74, 20 + 4 * 75 + 1, Square::E4; "inside e4")]
    fn test_resolve_inside(x: i32, y: i32, expected: Square) {
        assert_eq!(BoardGeometry::default().resolve(x, y), Some(expected));
    }

    #[test_case(19, 100; "left of board")]
    #[test_case(100, 19; "above board")]
    #[test_case(620, 100; "right of board")]
    #[test_case(100, 620; "below board")]
    #[test_case(-5, -5; "negative")]
    fn test_resolve_outside(x: i32, y: i32) {
        assert_eq!(BoardGeometry::default().resolve(x, y), None);
    }

    #[test]
    fn test_zero_square_size_resolves_nothing() {
        assert_eq!(resolve_square(0, 0, 0, 0, 0), None);
    }

    #[test]
    fn test_square_origin_inverts_resolve() {
        let geometry = BoardGeometry::default();
        for square in Square::ALL {
            let (x, y) = geometry.square_origin(square);
            assert_eq!(geometry.resolve(x, y), Some(square));
        }
    }

    proptest! {
        #[test]
        fn in_bounds_pixels_resolve_to_a_square(
            origin_x in -500i32..500,
            origin_y in -500i32..500,
            size in 1u32..200,
            fx in 0.0f64..1.0,
            fy in 0.0f64..1.0,
        ) {
            let dx = (fx * f64::from(size * 8)) as u32;
            let dy = (fy * f64::from(size * 8)) as u32;
            let square = resolve_square(
                origin_x + dx as i32,
                origin_y + dy as i32,
                origin_x,
                origin_y,
                size,
            );
            let square = square.expect("in-bounds click should resolve");
            prop_assert_eq!(square.file() as u32, dx / size);
            prop_assert_eq!(square.rank() as u32, 7 - dy / size);
        }

        #[test]
        fn out_of_bounds_pixels_resolve_to_none(
            x in -2000i32..2000,
            y in -2000i32..2000,
            size in 1u32..100,
        ) {
            let inside = (0..(size * 8) as i32).contains(&x) && (0..(size * 8) as i32).contains(&y);
            prop_assume!(!inside);
            prop_assert_eq!(resolve_square(x, y, 0, 0, size), None);
        }
    }
}
