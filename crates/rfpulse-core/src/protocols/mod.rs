//! Protocol codecs.
//!
//! Each protocol follows a layered structure:
//! - `layout`: frame positions and timing constants (source of truth)
//! - `reader`: safe pulse access and timing conventions
//! - `parser`: validation and demodulation (no direct pulse indexing)
//! - `writer`: modulation into a canonical frame
//! - `error`: explicit, actionable errors
//!
//! Codecs are pure and contain no I/O; the host owns capture, scheduling and
//! repeat transmission.

pub(crate) mod common;
pub mod mcvoice;

use log::debug;
use serde::Serialize;

use crate::{CodecConfig, CodecError, EncodeRequest, FieldSet, Transmission};

/// Polymorphic entry point the host uses for every protocol family.
pub trait PulseProtocol: Send + Sync {
    /// Stable protocol identifier (e.g., `mcvoice_rm1011b`).
    fn id(&self) -> &'static str;

    /// Cheap structural check on a captured train.
    fn validate(&self, pulses: &[u32], config: &CodecConfig) -> bool;

    /// Demodulate a captured train. Rejects trains that fail `validate`.
    fn decode(&self, pulses: &[u32], config: &CodecConfig) -> Result<FieldSet, CodecError>;

    /// Modulate a request into a full frame plus the message to report.
    fn encode(
        &self,
        request: &EncodeRequest,
        config: &CodecConfig,
    ) -> Result<Transmission, CodecError>;

    /// Metadata the host needs to capture, schedule and configure the protocol.
    fn describe(&self, config: &CodecConfig) -> ProtocolInfo;
}

static PROTOCOLS: &[&dyn PulseProtocol] = &[&mcvoice::McVoiceRm1011b];

/// All registered protocols, in registration order.
pub fn registry() -> &'static [&'static dyn PulseProtocol] {
    PROTOCOLS
}

/// Look up a protocol by identifier.
///
/// # Examples
/// ```
/// use rfpulse_core::find_protocol;
///
/// assert!(find_protocol("mcvoice_rm1011b").is_some());
/// assert!(find_protocol("unknown").is_none());
/// ```
pub fn find_protocol(id: &str) -> Option<&'static dyn PulseProtocol> {
    PROTOCOLS.iter().copied().find(|protocol| protocol.id() == id)
}

/// A frame accepted by one protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decoded {
    pub protocol: &'static str,
    pub message: FieldSet,
}

/// Offer a captured train to every registered protocol.
///
/// Protocols whose `validate` rejects the train are skipped; every protocol
/// that accepts and decodes it contributes one entry.
pub fn decode_any(pulses: &[u32], config: &CodecConfig) -> Vec<Decoded> {
    PROTOCOLS
        .iter()
        .filter(|protocol| protocol.validate(pulses, config))
        .filter_map(|protocol| match protocol.decode(pulses, config) {
            Ok(message) => Some(Decoded {
                protocol: protocol.id(),
                message,
            }),
            Err(err) => {
                debug!("{}: decode failed: {}", protocol.id(), err);
                None
            }
        })
        .collect()
}

/// Host-facing protocol description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProtocolInfo {
    pub id: &'static str,
    /// Device identifiers with their human-readable names.
    pub devices: Vec<DeviceInfo>,
    pub device_type: DeviceType,
    pub hardware: Hardware,
    /// Accepted raw frame length range (inclusive).
    pub min_raw_len: usize,
    pub max_raw_len: usize,
    /// Accepted inter-frame gap range, already scaled by the pulse divisor.
    pub min_gap_len: u32,
    pub max_gap_len: u32,
    /// Repeat count for each transmitted frame.
    pub tx_repeats: u32,
    pub options: Vec<OptionSpec>,
}

impl ProtocolInfo {
    pub fn option(&self, long: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|option| option.long == long)
    }

    /// Usage lines for the protocol's send options.
    pub fn help_lines(&self) -> Vec<String> {
        self.options
            .iter()
            .filter(|option| option.kind != OptionKind::GuiSetting)
            .map(OptionSpec::help_line)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    pub id: &'static str,
    pub name: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceType {
    Switch,
    Alarm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Hardware {
    Rf433,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionArgument {
    HasValue,
    NoValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionKind {
    DeviceId,
    DeviceState,
    GuiSetting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Number,
    String,
}

/// One command-line or configuration option of a protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short: Option<char>,
    pub long: &'static str,
    pub argument: OptionArgument,
    pub kind: OptionKind,
    pub value_type: ValueType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<&'static str>,
    /// Regular expression a supplied value must match in full.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<&'static str>,
    pub description: &'static str,
}

impl OptionSpec {
    /// Check a user-supplied value against the option's pattern.
    ///
    /// Options without a pattern accept anything.
    pub fn accepts(&self, value: &str) -> bool {
        let Some(pattern) = self.pattern else {
            return true;
        };
        match regex::Regex::new(pattern) {
            Ok(re) => re.is_match(value),
            Err(err) => {
                debug!("option {}: bad pattern {}: {}", self.long, pattern, err);
                false
            }
        }
    }

    pub fn help_line(&self) -> String {
        let short = self
            .short
            .map(|c| format!("-{c} "))
            .unwrap_or_default();
        let long = match self.argument {
            OptionArgument::HasValue => format!("--{}={}", self.long, self.long),
            OptionArgument::NoValue => format!("--{}", self.long),
        };
        format!("{short}{long:<24} {}", self.description)
    }
}
