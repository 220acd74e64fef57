//! McVoice RM1011B decoding and encoding.
//!
//! A frame is a header (long mark, short space), 24 payload bits of two
//! pulses each, and a footer (short mark, very long space). Each bit is a
//! short mark followed by a space; a space of about six base pulses is a 1,
//! three base pulses a 0. The payload is the unit code, most significant bit
//! first. The on/off state is not radiated: received frames report `off`.
//!
//! Receivers split the header mark off into the previous stream, so a
//! captured frame is one pulse shorter than a transmitted one and its last
//! pulse is the footer space. Validation checks only that length and that
//! the footer space lies within the scaled gap bounds.
//!
//! Version française (résumé):
//! Trame : en-tête, 24 bits (espace long = 1, court = 0, MSB d'abord), pied.
//! L'état on/off n'est pas transmis ; une trame reçue rapporte `off`.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;
pub mod writer;

pub use parser::{parse_frame, validate};
pub use writer::build_frame;

use super::{
    DeviceInfo, DeviceType, Hardware, OptionArgument, OptionKind, OptionSpec, ProtocolInfo,
    PulseProtocol, ValueType,
};
use crate::{CodecConfig, CodecError, EncodeRequest, FieldSet, Transmission};

#[derive(Debug, Clone, Copy, Default)]
pub struct McVoiceRm1011b;

impl PulseProtocol for McVoiceRm1011b {
    fn id(&self) -> &'static str {
        layout::PROTOCOL_ID
    }

    fn validate(&self, pulses: &[u32], config: &CodecConfig) -> bool {
        validate(pulses, config.pulse_div)
    }

    fn decode(&self, pulses: &[u32], config: &CodecConfig) -> Result<FieldSet, CodecError> {
        parse_frame(pulses, config.pulse_div).map_err(Into::into)
    }

    fn encode(
        &self,
        request: &EncodeRequest,
        _config: &CodecConfig,
    ) -> Result<Transmission, CodecError> {
        let message = writer::resolve_fields(request.unitcode, request.state)?;
        let pulses = writer::encode_fields(&message)?;
        Ok(Transmission {
            protocol: layout::PROTOCOL_ID,
            message,
            pulses,
            repeats: layout::TX_REPEATS,
        })
    }

    fn describe(&self, config: &CodecConfig) -> ProtocolInfo {
        let (min_gap_len, max_gap_len) = reader::gap_bounds(config.pulse_div);
        ProtocolInfo {
            id: layout::PROTOCOL_ID,
            devices: vec![DeviceInfo {
                id: layout::PROTOCOL_ID,
                name: layout::DEVICE_NAME,
            }],
            device_type: DeviceType::Switch,
            hardware: Hardware::Rf433,
            min_raw_len: layout::RAW_LENGTH,
            max_raw_len: layout::RAW_LENGTH,
            min_gap_len,
            max_gap_len,
            tx_repeats: layout::TX_REPEATS,
            options: options(),
        }
    }
}

fn options() -> Vec<OptionSpec> {
    vec![
        OptionSpec {
            short: Some('u'),
            long: "unitcode",
            argument: OptionArgument::HasValue,
            kind: OptionKind::DeviceId,
            value_type: ValueType::Number,
            default: None,
            pattern: Some(layout::UNITCODE_PATTERN),
            description: "control a device with this unitcode",
        },
        OptionSpec {
            short: Some('t'),
            long: "on",
            argument: OptionArgument::NoValue,
            kind: OptionKind::DeviceState,
            value_type: ValueType::String,
            default: None,
            pattern: None,
            description: "send an on signal",
        },
        OptionSpec {
            short: Some('f'),
            long: "off",
            argument: OptionArgument::NoValue,
            kind: OptionKind::DeviceState,
            value_type: ValueType::String,
            default: None,
            pattern: None,
            description: "send an off signal",
        },
        OptionSpec {
            short: None,
            long: "readonly",
            argument: OptionArgument::HasValue,
            kind: OptionKind::GuiSetting,
            value_type: ValueType::Number,
            default: Some("0"),
            pattern: Some(layout::READONLY_PATTERN),
            description: "hide the device controls in the GUI",
        },
    ]
}
