//! Reassembles protocol lines from unaligned byte chunks.
//!
//! Socket reads deliver whatever the kernel has buffered, so a single chunk
//! may hold several lines, half a line, or split a multi-byte character in
//! two. [`LineFramer`] accumulates chunks and hands back only complete lines,
//! keeping the trailing partial line for the next call.

use std::mem;

use thiserror::Error;

/// Two-byte sequence terminating every protocol line.
pub const LINE_TERMINATOR: &[u8; 2] = b"\r\n";

/// Upper bound on buffered bytes that have not yet formed a complete line.
pub const DEFAULT_MAX_LINE_BYTES: usize = 8 * 1024;

/// Errors raised while accumulating bytes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FramerError {
    /// The peer sent more bytes than allowed without terminating the line.
    #[error("line exceeds {max} bytes without a terminator ({pending} bytes pending)")]
    LineTooLong {
        /// Bytes buffered when the limit was hit.
        pending: usize,
        /// Configured limit.
        max: usize,
    },
}

/// Accumulation buffer that splits a byte stream into `\r\n` lines.
#[derive(Debug)]
pub struct LineFramer {
    buffer: Vec<u8>,
    max_line_bytes: usize,
}

impl Default for LineFramer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineFramer {
    /// Creates a framer with [`DEFAULT_MAX_LINE_BYTES`] as its limit.
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_line_bytes(DEFAULT_MAX_LINE_BYTES)
    }

    /// Creates a framer that rejects partial lines longer than `max`.
    #[must_use]
    pub fn with_max_line_bytes(max: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(max.clamp(1, DEFAULT_MAX_LINE_BYTES)),
            max_line_bytes: max.max(1),
        }
    }

    /// Appends a chunk received from the transport.
    ///
    /// # Errors
    ///
    /// Returns [`FramerError::LineTooLong`] when the unterminated tail grows
    /// beyond the configured limit. The buffer is discarded in that case,
    /// since the stream can no longer be trusted to realign.
    pub fn push(&mut self, chunk: &[u8]) -> Result<(), FramerError> {
        self.buffer.extend_from_slice(chunk);
        let pending = self.partial_len();
        if pending > self.max_line_bytes {
            self.buffer.clear();
            return Err(FramerError::LineTooLong {
                pending,
                max: self.max_line_bytes,
            });
        }
        Ok(())
    }

    /// Returns a lazy iterator over the complete lines currently buffered.
    ///
    /// Each line is removed from the buffer only when the iterator yields it,
    /// so dropping the iterator early leaves the remaining lines in place for
    /// the next call. Terminators are stripped and empty lines skipped.
    pub fn drain(&mut self) -> Lines<'_> {
        Lines { framer: self }
    }

    /// Number of bytes buffered but not yet yielded.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    fn partial_len(&self) -> usize {
        let complete = self
            .buffer
            .windows(LINE_TERMINATOR.len())
            .rposition(|window| window == LINE_TERMINATOR)
            .map_or(0, |index| index + LINE_TERMINATOR.len());
        self.buffer.len().saturating_sub(complete)
    }

    fn next_line(&mut self) -> Option<String> {
        loop {
            let position = self
                .buffer
                .windows(LINE_TERMINATOR.len())
                .position(|window| window == LINE_TERMINATOR)?;
            let rest = self.buffer.split_off(position + LINE_TERMINATOR.len());
            let mut line = mem::replace(&mut self.buffer, rest);
            line.truncate(position);
            if line.is_empty() {
                continue;
            }
            return Some(String::from_utf8_lossy(&line).into_owned());
        }
    }
}

/// Iterator returned by [`LineFramer::drain`].
#[derive(Debug)]
pub struct Lines<'a> {
    framer: &'a mut LineFramer,
}

impl Iterator for Lines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.framer.next_line()
    }
}
