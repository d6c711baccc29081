//! Pull-based trace sources.
//!
//! Fetch asks a [`TraceSource`] for one record at a time and treats `None` as
//! the end of the program. A malformed or truncated trace is reported by the
//! reader as end-of-stream (after logging a warning), never as a fault.

use crate::common::error::SimError;
use crate::trace::record::TraceRecord;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::iter::FusedIterator;
use std::path::Path;

/// A lazy, pull-based sequence of trace records.
pub trait TraceSource {
    /// Returns the next record, or `None` once the trace is exhausted.
    fn next_record(&mut self) -> Option<TraceRecord>;
}

impl<I> TraceSource for I
where
    I: Iterator<Item = TraceRecord>,
{
    #[inline]
    fn next_record(&mut self) -> Option<TraceRecord> {
        self.next()
    }
}

/// Line-oriented reader for text traces.
///
/// Blank lines are skipped. The first malformed line (or an I/O error, or a
/// register id outside the configured register file) ends the stream.
#[derive(Debug)]
pub struct TraceReader<R> {
    lines: Lines<R>,
    line_no: usize,
    reg_limit: Option<usize>,
    done: bool,
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
            reg_limit: None,
            done: false,
        }
    }

    /// Treats any register id `>= limit` as a malformed record.
    #[must_use]
    pub fn with_register_limit(mut self, limit: usize) -> Self {
        self.reg_limit = Some(limit);
        self
    }

    /// Parses the next non-blank line, or returns `None` on end/error.
    fn read_record(&mut self) -> Option<TraceRecord> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(err) => {
                    tracing::warn!(line = self.line_no + 1, %err, "trace read failed; ending trace");
                    return None;
                }
            };
            self.line_no += 1;

            if line.trim().is_empty() {
                continue;
            }

            let record = match line.parse::<TraceRecord>() {
                Ok(record) => record,
                Err(err) => {
                    tracing::warn!(line = self.line_no, %err, text = %line, "malformed trace record; ending trace");
                    return None;
                }
            };

            if let Some(limit) = self.reg_limit
                && let Some(reg) = record.registers().find(|r| r.index() >= limit)
            {
                tracing::warn!(
                    line = self.line_no,
                    reg = reg.index(),
                    limit,
                    "register id outside register file; ending trace"
                );
                return None;
            }

            return Some(record);
        }
    }
}

impl TraceReader<BufReader<File>> {
    /// Opens a trace file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = TraceRecord;

    fn next(&mut self) -> Option<TraceRecord> {
        if self.done {
            return None;
        }
        let record = self.read_record();
        self.done = record.is_none();
        record
    }
}

impl<R: BufRead> FusedIterator for TraceReader<R> {}
