use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::protocols::{PulseProtocol, decode_any};
use crate::source::{CaptureEvent, CaptureSource, LineSource, SourceError};
use crate::{CodecConfig, CodecError, FieldSet};

/// Current receive report schema version.
pub const REPORT_VERSION: u32 = 1;

/// Result of running a capture through the protocol decoders.
///
/// # Examples
/// ```
/// use rfpulse_core::ReceiveReport;
///
/// let report = ReceiveReport::new("capture.txt");
/// assert_eq!(report.report_version, rfpulse_core::REPORT_VERSION);
/// assert!(report.messages.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiveReport {
    pub report_version: u32,
    /// Input name as provided to the receiver.
    pub input: String,
    /// Pulse trains read from the input.
    pub frames_total: u64,
    /// Pulse trains accepted by at least one protocol.
    pub frames_decoded: u64,
    /// Decoded messages in input order.
    pub messages: Vec<ReceivedMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivedMessage {
    pub line: usize,
    pub protocol: String,
    pub message: FieldSet,
}

impl ReceiveReport {
    pub fn new(input: &str) -> Self {
        Self {
            report_version: REPORT_VERSION,
            input: input.to_string(),
            frames_total: 0,
            frames_decoded: 0,
            messages: Vec::new(),
        }
    }

    pub fn frames_rejected(&self) -> u64 {
        self.frames_total - self.frames_decoded
    }
}

#[derive(Debug, Error)]
pub enum ReceiveError {
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),
}

pub fn receive_file(
    path: &Path,
    config: &CodecConfig,
    protocol: Option<&dyn PulseProtocol>,
) -> Result<ReceiveReport, ReceiveError> {
    let source = LineSource::open(path)?;
    receive_source(&path.display().to_string(), source, config, protocol)
}

/// Decode every train of `source`, either with one protocol or with all.
pub fn receive_source<S: CaptureSource>(
    input: &str,
    mut source: S,
    config: &CodecConfig,
    protocol: Option<&dyn PulseProtocol>,
) -> Result<ReceiveReport, ReceiveError> {
    let mut report = ReceiveReport::new(input);

    while let Some(CaptureEvent { line, pulses }) = source.next_train()? {
        report.frames_total += 1;
        let decoded: Vec<(&str, FieldSet)> = match protocol {
            Some(protocol) => {
                if !protocol.validate(pulses.as_slice(), config) {
                    debug!("line {line}: {} rejected {} pulses", protocol.id(), pulses.len());
                    continue;
                }
                vec![(protocol.id(), protocol.decode(pulses.as_slice(), config)?)]
            }
            None => decode_any(pulses.as_slice(), config)
                .into_iter()
                .map(|decoded| (decoded.protocol, decoded.message))
                .collect(),
        };

        if decoded.is_empty() {
            debug!("line {line}: no protocol accepted {} pulses", pulses.len());
            continue;
        }
        report.frames_decoded += 1;
        report
            .messages
            .extend(decoded.into_iter().map(|(protocol, message)| ReceivedMessage {
                line,
                protocol: protocol.to_string(),
                message,
            }));
    }

    Ok(report)
}
