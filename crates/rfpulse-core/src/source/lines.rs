use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::{CaptureEvent, CaptureSource, SourceError};
use crate::PulseTrain;

/// Text capture: one pulse train per line, `#` comments and blank lines skipped.
pub struct LineSource<R> {
    reader: R,
    line: usize,
    buf: String,
}

impl LineSource<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: String::new(),
        }
    }
}

impl<R: BufRead> CaptureSource for LineSource<R> {
    fn next_train(&mut self) -> Result<Option<CaptureEvent>, SourceError> {
        loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;

            let text = self.buf.trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }
            let pulses = text.parse::<PulseTrain>().map_err(|source| SourceError::Parse {
                line: self.line,
                source,
            })?;
            return Ok(Some(CaptureEvent {
                line: self.line,
                pulses,
            }));
        }
    }
}
