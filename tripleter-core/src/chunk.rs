//! Streaming Chunk Reader
//!
//! Groups the lines of a (possibly huge) file into chunks of a fixed number
//! of lines, so the file strategies can hand out work without ever holding
//! the whole file in memory.
//!
//! ## Layout
//!
//! ```text
//! file:    line0\nline1\r\nline2\n ... line999\nline1000\n ...
//! chunk 0: "line0line1line2...line999"     (chunk_length lines, no separators)
//! chunk 1: "line1000..."                   (last chunk may be shorter)
//! ```
//!
//! ## Line rules
//!
//! - Terminators are `\n`, `\r\n` and a bare `\r`; they are not kept
//! - A trailing terminator does not start an extra empty line
//! - A leading UTF-8 byte order mark is skipped
//! - Invalid UTF-8 is replaced with U+FFFD
//!
//! ## Boundary carry
//!
//! Lines are glued together inside a chunk, so a triplet spanning two lines
//! of the same chunk is found. A triplet spanning two chunks is not, unless
//! [`ChunkReader::carry_boundary`] is enabled: each chunk then starts with the
//! last two characters of the previous chunk. Two characters cannot form a
//! triplet on their own, so nothing is counted twice.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use memchr::memchr2;
use smallvec::SmallVec;
use tracing::{debug, warn};
use tripleter_types::{Result, TripletError, TRIPLET_LENGTH};

const READ_BUFFER_BYTES: usize = 64 * 1024;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A group of consecutive lines, concatenated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    text: String,
    /// Byte length of the prefix carried over from the previous chunk.
    carried: usize,
    lines: usize,
}

impl Chunk {
    /// Full chunk text, including any carried prefix.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Chunk text without the carried prefix: exactly this chunk's lines.
    #[inline]
    pub fn body(&self) -> &str {
        &self.text[self.carried..]
    }

    /// Number of file lines in this chunk.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.lines
    }

    /// Consumes the chunk, returning its full text.
    pub fn into_text(self) -> String {
        self.text
    }
}

/// Lazy sequence of [`Chunk`]s read from a buffered source.
///
/// The reader owns the underlying handle; chunk boundaries are decided here,
/// on one thread, before any chunk is handed to a worker. After the first
/// error the iterator is exhausted.
pub struct ChunkReader<R> {
    reader: R,
    chunk_length: usize,
    carry_boundary: bool,
    carry: SmallVec<[char; TRIPLET_LENGTH - 1]>,
    line: Vec<u8>,
    /// A `\r` ended the previous line; swallow a directly following `\n`.
    skip_lf: bool,
    at_start: bool,
    emitted: usize,
    done: bool,
}

impl ChunkReader<BufReader<File>> {
    /// Opens `path` for chunked reading.
    ///
    /// # Errors
    ///
    /// Returns `TripletError::InvalidArgument` if `chunk_length` is zero,
    /// `TripletError::NotFound` if `path` is not an existing file, and
    /// `TripletError::Io` if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>, chunk_length: usize) -> Result<Self> {
        let path = path.as_ref();
        if chunk_length == 0 {
            return Err(TripletError::InvalidArgument(
                "chunk length must be at least 1 line",
            ));
        }
        if !path.is_file() {
            return Err(TripletError::NotFound(path.to_path_buf()));
        }

        let file = File::open(path)?;
        debug!(path = %path.display(), chunk_length, "opened file for chunked reading");
        Self::new(BufReader::with_capacity(READ_BUFFER_BYTES, file), chunk_length)
    }
}

impl<R: BufRead> ChunkReader<R> {
    /// Creates a chunk reader over any buffered source.
    ///
    /// # Errors
    ///
    /// Returns `TripletError::InvalidArgument` if `chunk_length` is zero.
    pub fn new(reader: R, chunk_length: usize) -> Result<Self> {
        if chunk_length == 0 {
            return Err(TripletError::InvalidArgument(
                "chunk length must be at least 1 line",
            ));
        }

        Ok(Self {
            reader,
            chunk_length,
            carry_boundary: false,
            carry: SmallVec::new(),
            line: Vec::with_capacity(256),
            skip_lf: false,
            at_start: true,
            emitted: 0,
            done: false,
        })
    }

    /// Enables or disables carrying the last two characters of each chunk
    /// into the next one.
    #[must_use]
    pub fn carry_boundary(mut self, enabled: bool) -> Self {
        self.carry_boundary = enabled;
        self
    }

    /// Reads the next line into `self.line`, without its terminator.
    ///
    /// Returns `false` once the source is exhausted.
    fn read_line(&mut self) -> io::Result<bool> {
        self.line.clear();
        let mut read_any = false;

        loop {
            let available = self.reader.fill_buf()?;
            if available.is_empty() {
                return Ok(read_any);
            }

            if self.skip_lf {
                self.skip_lf = false;
                if available[0] == b'\n' {
                    self.reader.consume(1);
                    continue;
                }
            }

            match memchr2(b'\n', b'\r', available) {
                Some(i) => {
                    self.line.extend_from_slice(&available[..i]);
                    self.skip_lf = available[i] == b'\r';
                    self.reader.consume(i + 1);
                    return Ok(true);
                }
                None => {
                    let n = available.len();
                    self.line.extend_from_slice(available);
                    self.reader.consume(n);
                    read_any = true;
                }
            }
        }
    }

    fn push_line(&mut self, text: &mut String) {
        let mut bytes = self.line.as_slice();
        if self.at_start {
            self.at_start = false;
            bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        }

        match std::str::from_utf8(bytes) {
            Ok(line) => text.push_str(line),
            Err(err) => {
                warn!(
                    chunk = self.emitted,
                    valid_up_to = err.valid_up_to(),
                    "invalid UTF-8 in input, replacing"
                );
                text.push_str(&String::from_utf8_lossy(bytes));
            }
        }
    }

    fn next_chunk(&mut self) -> Result<Option<Chunk>> {
        let mut text = String::new();
        if self.carry_boundary {
            text.extend(self.carry.iter());
        }
        let carried = text.len();
        let mut lines = 0usize;

        while lines < self.chunk_length {
            if !self.read_line()? {
                break;
            }
            self.push_line(&mut text);
            lines += 1;
        }

        if lines == 0 {
            return Ok(None);
        }

        if self.carry_boundary {
            let mut tail: SmallVec<[char; TRIPLET_LENGTH - 1]> =
                text.chars().rev().take(TRIPLET_LENGTH - 1).collect();
            tail.reverse();
            self.carry = tail;
        }

        debug!(
            chunk = self.emitted,
            lines,
            bytes = text.len(),
            carried,
            "chunk read"
        );
        self.emitted += 1;

        Ok(Some(Chunk {
            text,
            carried,
            lines,
        }))
    }
}

impl<R: BufRead> Iterator for ChunkReader<R> {
    type Item = Result<Chunk>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.next_chunk() {
            Ok(Some(chunk)) => Some(Ok(chunk)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl<R: BufRead> core::iter::FusedIterator for ChunkReader<R> {}

/// Opens `path` and returns its chunks.
///
/// Shorthand for [`ChunkReader::open`].
pub fn read_chunks(
    path: impl AsRef<Path>,
    chunk_length: usize,
) -> Result<ChunkReader<BufReader<File>>> {
    ChunkReader::open(path, chunk_length)
}
