//! Line-oriented statement segmentation.
//!
//! Splits a SQL text stream into candidate statements using line heuristics:
//! a statement is everything accumulated up to a line ending in `;`. Block
//! comments (`/* ... */`) and `--` line comments are stripped before
//! accumulation. This is deliberately not a SQL lexer: a terminator inside a
//! string literal is not special-cased, and a statement whose `;` is not at
//! end-of-line is never recognized. Known limitation, kept by contract.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::debug;

/// Pull-based statement reader over a buffered input stream.
///
/// Yields one raw candidate statement at a time; the whole file is never
/// held in memory beyond the statement currently being assembled.
pub struct Segmenter<R> {
    reader: R,
    /// Accumulator for the statement currently being assembled.
    buffer: String,
    /// Raw line buffer, reused across reads.
    line: String,
    /// True while scanning the inside of a `/* ... */` block.
    in_block_comment: bool,
}

impl Segmenter<BufReader<File>> {
    /// Open a SQL file for segmentation.
    pub fn from_path<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> Segmenter<R> {
    /// Create a segmenter over any buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: String::new(),
            line: String::new(),
            in_block_comment: false,
        }
    }

    /// Read lines until one complete candidate statement is assembled.
    ///
    /// Returns `Ok(None)` on end of stream. A non-empty unterminated buffer
    /// at end of stream is dropped.
    pub fn next_statement(&mut self) -> io::Result<Option<String>> {
        loop {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                if !self.buffer.is_empty() {
                    debug!(
                        "dropping unterminated trailing statement ({} bytes)",
                        self.buffer.len()
                    );
                    self.buffer.clear();
                }
                return Ok(None);
            }

            let line = self.line.trim();

            if line.starts_with("/*") {
                self.in_block_comment = true;
            }
            if self.in_block_comment {
                if line.contains("*/") {
                    self.in_block_comment = false;
                }
                continue;
            }

            if line.is_empty() || line.starts_with("--") {
                continue;
            }

            self.buffer.push_str(line);
            self.buffer.push('\n');

            if line.ends_with(';') {
                return Ok(Some(std::mem::take(&mut self.buffer)));
            }
        }
    }
}

impl<R: BufRead> Iterator for Segmenter<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_statement().transpose()
    }
}
