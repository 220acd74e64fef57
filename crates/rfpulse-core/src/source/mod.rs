mod lines;

pub use lines::LineSource;

use thiserror::Error;

use crate::{PulseParseError, PulseTrain};

/// One captured pulse train and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureEvent {
    /// 1-based line (or record) number in the input.
    pub line: usize,
    pub pulses: PulseTrain,
}

pub trait CaptureSource {
    fn next_train(&mut self) -> Result<Option<CaptureEvent>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: PulseParseError,
    },
}
