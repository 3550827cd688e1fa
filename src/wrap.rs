use anyhow::{ensure, Result};

/// Lazily wrap `text` into segments of at most `width` characters, breaking
/// at word boundaries where possible and mid-word otherwise. The iterator
/// is `Clone`, so the sequence can be restarted from the original call.
pub fn wrap(text: &str, width: usize) -> Result<WrapSegments<'_>> {
    ensure!(width > 0, "wrap width must be positive");
    Ok(WrapSegments {
        rest: text,
        width,
        done: false,
    })
}

#[derive(Debug, Clone)]
pub struct WrapSegments<'a> {
    rest: &'a str,
    width: usize,
    done: bool,
}

impl<'a> Iterator for WrapSegments<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.done {
            return None;
        }
        let rest = self.rest;

        // Byte offset and char of the first width+1 character positions.
        // Fewer than that and the remainder fits on one line.
        let window: Vec<(usize, char)> = rest.char_indices().take(self.width + 1).collect();
        if window.len() <= self.width {
            self.done = true;
            return Some(rest);
        }

        // Nearest space at or before position `width`, position 0 excluded.
        if let Some(pos) = (1..=self.width).rev().find(|&i| window[i].1 == ' ') {
            let at = window[pos].0;
            let segment = &rest[..at];
            self.rest = &rest[at + 1..];
            return Some(segment);
        }

        // No boundary in the window: hard break after exactly `width` chars,
        // swallowing a single space that lands right after the break.
        let at = window[self.width].0;
        let segment = &rest[..at];
        let mut tail = &rest[at..];
        if let Some(stripped) = tail.strip_prefix(' ') {
            tail = stripped;
        }
        self.rest = tail;
        Some(segment)
    }
}
