//! Character text splitter.
//!
//! Splits on a fixed separator, then greedily merges the pieces back into
//! chunks of at most `chunk_size` characters, carrying up to
//! `chunk_overlap` characters of trailing pieces into the next chunk.
//! A single piece longer than `chunk_size` becomes its own oversized chunk.

use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct TextSplitter {
    separator: String,
    chunk_size: usize,
    chunk_overlap: usize,
}

impl Default for TextSplitter {
    fn default() -> Self {
        Self::new(1000, 100)
    }
}

impl TextSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            separator: "\n\n".into(),
            chunk_size,
            chunk_overlap: chunk_overlap.min(chunk_size),
        }
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Split `text` into overlapping chunks.
    pub fn split(&self, text: &str) -> Vec<String> {
        let pieces: Vec<&str> = if self.separator.is_empty() {
            vec![text]
        } else {
            text.split(self.separator.as_str()).collect()
        };
        let pieces = pieces.into_iter().map(str::trim).filter(|p| !p.is_empty());

        let sep_len = self.separator.chars().count();
        let mut chunks = Vec::new();
        let mut current: VecDeque<&str> = VecDeque::new();
        let mut total = 0usize;

        for piece in pieces {
            let len = piece.chars().count();
            let joined_len = |total: usize, current: &VecDeque<&str>| {
                total + len + if current.is_empty() { 0 } else { sep_len }
            };

            if joined_len(total, &current) > self.chunk_size && !current.is_empty() {
                chunks.push(self.join(&current));

                // Keep popping until the carry-over fits the overlap and
                // leaves room for the incoming piece.
                while total > self.chunk_overlap
                    || (joined_len(total, &current) > self.chunk_size && total > 0)
                {
                    let Some(front) = current.pop_front() else {
                        break;
                    };
                    total -= front.chars().count() + if current.is_empty() { 0 } else { sep_len };
                }
            }

            total += len + if current.is_empty() { 0 } else { sep_len };
            current.push_back(piece);
        }

        if !current.is_empty() {
            chunks.push(self.join(&current));
        }

        chunks
    }

    fn join(&self, pieces: &VecDeque<&str>) -> String {
        pieces
            .iter()
            .copied()
            .collect::<Vec<_>>()
            .join(&self.separator)
            .trim()
            .to_string()
    }
}
