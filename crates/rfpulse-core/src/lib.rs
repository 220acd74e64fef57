//! rfpulse core library: pulse-train codecs for 433 MHz remote controls.
//!
//! This crate implements the codec layer used by the CLI and by any gateway
//! embedding it: capture sources feed protocol validators, accepted frames
//! are demodulated (layout/reader/parser) into field sets, and field sets are
//! modulated (writer) back into canonical pulse trains. Codecs are pure and
//! side-effect free; all I/O is isolated in `source` modules.
//!
//! Invariants:
//! - A rejected frame never yields a field set.
//! - Encoded frames always have the protocol's full raw length.
//! - Unit codes round-trip through encode and the captured form of the frame.
//!
//! Version française (résumé):
//! Cette crate fournit les codecs de trains d'impulsions : validation ->
//! démodulation (layout/reader/parser) -> champs ; champs -> modulation
//! (writer) -> train canonique. Aucune E/S, aucun état global.
//!
//! # Examples
//! ```
//! use rfpulse_core::{CodecConfig, EncodeRequest, State, find_protocol};
//!
//! let config = CodecConfig::default();
//! let protocol = find_protocol("mcvoice_rm1011b").expect("registered");
//! let sent = protocol.encode(&EncodeRequest::new(1234567, State::Off), &config)?;
//! let received = sent.pulses.skip_leading(1);
//! assert!(protocol.validate(received.as_slice(), &config));
//! assert_eq!(protocol.decode(received.as_slice(), &config)?.unitcode, 1234567);
//! # Ok::<(), rfpulse_core::CodecError>(())
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

mod config;
pub mod protocols;
mod pulse;
mod receive;
mod source;

pub use config::{CodecConfig, ConfigError, DEFAULT_PULSE_DIV};
pub use protocols::{
    Decoded, OptionArgument, OptionKind, OptionSpec, ProtocolInfo, PulseProtocol, ValueType,
    decode_any, find_protocol, registry,
};
pub use pulse::{PulseParseError, PulseTrain};
pub use receive::{
    REPORT_VERSION, ReceiveError, ReceiveReport, ReceivedMessage, receive_file, receive_source,
};
pub use source::{CaptureEvent, CaptureSource, LineSource, SourceError};

/// Device state carried in messages.
///
/// # Examples
/// ```
/// use rfpulse_core::State;
///
/// let state: State = "on".parse().unwrap();
/// assert_eq!(state, State::On);
/// assert_eq!(State::Off.to_string(), "off");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum State {
    On,
    Off,
}

impl State {
    pub fn as_str(&self) -> &'static str {
        match self {
            State::On => "on",
            State::Off => "off",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for State {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "on" => Ok(State::On),
            "off" => Ok(State::Off),
            other => Err(CodecError::InvalidArgument {
                name: "state",
                reason: format!("expected 'on' or 'off', got '{other}'"),
            }),
        }
    }
}

/// Semantic fields of one frame, as reported to the host.
///
/// # Examples
/// ```
/// use rfpulse_core::{FieldSet, State};
///
/// let fields = FieldSet { unitcode: 42, state: State::On };
/// let json = serde_json::to_value(fields).unwrap();
/// assert_eq!(json["unitcode"], 42);
/// assert_eq!(json["state"], "on");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSet {
    /// Device identifier within the protocol family.
    pub unitcode: u32,
    /// Requested or reported device state.
    pub state: State,
}

/// Arguments for an encode call; either field may still be unresolved.
///
/// # Examples
/// ```
/// use rfpulse_core::{EncodeRequest, State};
///
/// let args = serde_json::json!({ "unitcode": 1234567, "on": 1 });
/// let request = EncodeRequest::from_json(&args).unwrap();
/// assert_eq!(request.unitcode, Some(1234567));
/// assert_eq!(request.state, Some(State::On));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodeRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unitcode: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<State>,
}

impl EncodeRequest {
    pub fn new(unitcode: u32, state: State) -> Self {
        Self {
            unitcode: Some(unitcode),
            state: Some(state),
        }
    }

    /// Build a request from a gateway argument object.
    ///
    /// `unitcode` is a JSON number (rounded to the nearest integer); the state
    /// comes from the presence of an `off` or `on` member, `off` first. A
    /// `state` string member is accepted as well.
    pub fn from_json(args: &Value) -> Result<Self, CodecError> {
        let object = args.as_object().ok_or_else(|| CodecError::InvalidArgument {
            name: "arguments",
            reason: "expected a JSON object".to_string(),
        })?;

        let unitcode = match object.get("unitcode") {
            None | Some(Value::Null) => None,
            Some(value) => Some(unitcode_from_json(value)?),
        };

        let state = if object.get("off").is_some_and(Value::is_number) {
            Some(State::Off)
        } else if object.get("on").is_some_and(Value::is_number) {
            Some(State::On)
        } else {
            match object.get("state").and_then(Value::as_str) {
                Some(state) => Some(state.parse()?),
                None => None,
            }
        };

        Ok(Self { unitcode, state })
    }
}

fn unitcode_from_json(value: &Value) -> Result<u32, CodecError> {
    let number = value.as_f64().ok_or_else(|| CodecError::InvalidArgument {
        name: "unitcode",
        reason: format!("expected a number, got {value}"),
    })?;
    let rounded = number.round();
    if !rounded.is_finite() || rounded < 0.0 || rounded > f64::from(u32::MAX) {
        return Err(CodecError::InvalidArgument {
            name: "unitcode",
            reason: format!("{number} is not a valid unit code"),
        });
    }
    Ok(rounded as u32)
}

/// Output of a successful encode: what to radiate, and what to report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transmission {
    /// Protocol identifier that produced the frame.
    pub protocol: &'static str,
    /// Message the host attaches to the transmission.
    pub message: FieldSet,
    /// Full frame, header through footer.
    pub pulses: PulseTrain,
    /// Number of times the host should repeat the frame.
    pub repeats: u32,
}

/// Errors returned by the codec layer.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("invalid frame: {reason}")]
    InvalidFrame { reason: String },
    #[error("insufficient number of arguments: missing {field}")]
    MissingField { field: &'static str },
    #[error("unit code {value} out of range (max {max})")]
    UnitcodeOutOfRange { value: u32, max: u32 },
    #[error("invalid {name}: {reason}")]
    InvalidArgument { name: &'static str, reason: String },
    #[error("unknown protocol: {id}")]
    UnknownProtocol { id: String },
    #[error("pulse parse error: {0}")]
    Pulse(#[from] PulseParseError),
}

impl CodecError {
    pub fn is_invalid_frame(&self) -> bool {
        matches!(self, CodecError::InvalidFrame { .. })
    }
}
