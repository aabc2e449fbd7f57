use std::collections::VecDeque;

use shakmaty::Square;
use thiserror::Error;

/// Error when parsing a click script.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid square notation: '{0}'")]
pub struct ParseError(String);

/// A queue of square clicks read from a compact script.
///
/// New script can be appended at any time for interactive use.
#[derive(Debug, Clone, Default)]
pub struct ScriptedClicks {
    pending: VecDeque<Square>,
}

impl ScriptedClicks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and queue additional clicks.
    ///
    /// Format:
    /// - Squares are 2 characters (e.g., "e2", "a1"), one click each
    /// - Spaces and periods are separators and may be omitted
    ///
    /// Examples:
    /// - `"e2e4"` - Click e2, then e4
    /// - `"e2 e4. e7 e5."` - Two moves
    /// - `"e2e2"` - Select and deselect e2
    ///
    /// Nothing is queued if any square is invalid.
    pub fn push_script(&mut self, script: &str) -> Result<(), ParseError> {
        let clicks = parse_script(script)?;
        self.pending.extend(clicks);
        Ok(())
    }

    /// Pop the next click, if any.
    #[inline]
    pub fn tick(&mut self) -> Option<Square> {
        self.pending.pop_front()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pop all pending clicks, calling the provided callback for each.
    pub fn drain<F>(&mut self, mut on_click: F)
    where
        F: FnMut(Square),
    {
        while let Some(square) = self.tick() {
            on_click(square);
        }
    }
}

/// Parse a click script into the squares it names, in order.
fn parse_script(script: &str) -> Result<Vec<Square>, ParseError> {
    let mut clicks = Vec::new();
    let mut current_token = String::new();

    for ch in script.chars() {
        match ch {
            '.' => flush_token(&mut current_token, &mut clicks)?,
            c if c.is_whitespace() => flush_token(&mut current_token, &mut clicks)?,
            _ => {
                current_token.push(ch);

                // Squares are exactly 2 characters (e.g., "e2", "a1")
                if current_token.chars().count() == 2 {
                    flush_token(&mut current_token, &mut clicks)?;
                }
            }
        }
    }

    // Flush any remaining token
    flush_token(&mut current_token, &mut clicks)?;
    Ok(clicks)
}

/// Add current token to the clicks and clear it.
fn flush_token(token: &mut String, clicks: &mut Vec<Square>) -> Result<(), ParseError> {
    if !token.is_empty() {
        let square: Square = token
            .trim()
            .parse()
            .map_err(|_| ParseError(token.clone()))?;
        clicks.push(square);
        token.clear();
    }
    Ok(())
}
