//! Acquisition source port and adapters.
//!
//! On the bench the digitizer lives on a microcontroller that streams one
//! decimal code per line over serial. [`LineSource`] reads that stream;
//! [`ScriptedSource`] replays fixed codes.

use crate::error::{SourceError, SourceResult};
use crate::sample::RawSample;
use std::collections::VecDeque;
use std::io::BufRead;

/// Port for acquiring raw digitizer samples.
pub trait AcquisitionSource {
    /// Read the latest digitized value.
    ///
    /// A healthy source returns a code in `[0, DIGITIZER_MAX]`; a code of 0
    /// is the hardware's way of signalling a disconnected line and is a
    /// valid sample, not an error.
    fn read_raw(&mut self) -> SourceResult<RawSample>;
}

impl<S: AcquisitionSource + ?Sized> AcquisitionSource for &mut S {
    fn read_raw(&mut self) -> SourceResult<RawSample> {
        (**self).read_raw()
    }
}

impl<S: AcquisitionSource + ?Sized> AcquisitionSource for Box<S> {
    fn read_raw(&mut self) -> SourceResult<RawSample> {
        (**self).read_raw()
    }
}

/// Reads one decimal code per line from a byte stream.
///
/// Blank lines are skipped. End of stream is [`SourceError::Exhausted`].
///
/// Each call consumes the oldest unread line, so the "latest" value is the
/// next one in arrival order. A producer that emits faster than the sampling
/// cadence builds a backlog and reports fall behind; the producer should
/// print at most one code per interval.
pub struct LineSource<R: BufRead> {
    reader: R,
    buf: String,
    line: u64,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            line: 0,
        }
    }

    /// Number of lines consumed so far (including blank ones).
    pub fn lines_read(&self) -> u64 {
        self.line
    }
}

impl<R: BufRead> AcquisitionSource for LineSource<R> {
    fn read_raw(&mut self) -> SourceResult<RawSample> {
        loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                return Err(SourceError::Exhausted);
            }
            self.line += 1;

            let text = self.buf.trim();
            if text.is_empty() {
                continue;
            }

            let value = text.parse::<i64>().map_err(|source| SourceError::Parse {
                line: self.line,
                text: text.to_owned(),
                source,
            })?;
            return RawSample::try_from(value);
        }
    }
}

/// Replays a fixed sequence of samples, optionally forever.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    pending: VecDeque<RawSample>,
    script: Vec<RawSample>,
    repeat: bool,
}

impl ScriptedSource {
    /// Play `samples` once, then report [`SourceError::Exhausted`].
    pub fn new(samples: impl IntoIterator<Item = RawSample>) -> Self {
        let script: Vec<RawSample> = samples.into_iter().collect();
        Self {
            pending: script.iter().copied().collect(),
            script,
            repeat: false,
        }
    }

    /// Play `samples` in a loop.
    pub fn repeating(samples: impl IntoIterator<Item = RawSample>) -> Self {
        Self {
            repeat: true,
            ..Self::new(samples)
        }
    }

    /// Convenience constructor from raw codes.
    pub fn from_codes(codes: &[u16]) -> SourceResult<Self> {
        let samples = codes
            .iter()
            .map(|&code| RawSample::new(code))
            .collect::<SourceResult<Vec<_>>>()?;
        Ok(Self::new(samples))
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl AcquisitionSource for ScriptedSource {
    fn read_raw(&mut self) -> SourceResult<RawSample> {
        if self.pending.is_empty() && self.repeat {
            self.pending.extend(self.script.iter().copied());
        }
        self.pending.pop_front().ok_or(SourceError::Exhausted)
    }
}
