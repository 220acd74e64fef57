use log::error;

use super::error::McVoiceError;
use super::layout;
use crate::protocols::common::binary::dec_to_bin_fixed;
use crate::{FieldSet, PulseTrain, State};

pub struct FrameWriter {
    pulses: Vec<u32>,
}

impl FrameWriter {
    /// Frame of `RAW_LENGTH` pulses with every pair up to the footer low.
    pub fn new() -> Self {
        let mut writer = Self {
            pulses: vec![0; layout::RAW_LENGTH],
        };
        writer.write_low(0, layout::FILL_END);
        writer
    }

    fn write_low(&mut self, start: usize, end: usize) {
        for i in (start..=end).step_by(2) {
            self.pulses[i] = layout::SHORT_PULSE;
            self.pulses[i + 1] = layout::LOW_SPACE;
        }
    }

    fn write_high(&mut self, start: usize, end: usize) {
        for i in (start..=end).step_by(2) {
            self.pulses[i] = layout::SHORT_PULSE;
            self.pulses[i + 1] = layout::HIGH_SPACE;
        }
    }

    pub fn write_header(&mut self) {
        self.pulses[layout::HEADER_MARK_OFFSET] = layout::HEADER_MARK;
        self.pulses[layout::HEADER_SPACE_OFFSET] = layout::SHORT_PULSE;
    }

    pub fn write_unitcode(&mut self, unitcode: u32) -> Result<(), McVoiceError> {
        if unitcode > layout::MAX_UNITCODE {
            return Err(McVoiceError::UnitcodeOutOfRange {
                value: unitcode,
                bits: layout::BIN_ELEMENTS,
            });
        }
        let bits = dec_to_bin_fixed(unitcode, layout::BIN_ELEMENTS);
        for (position, bit) in bits.into_iter().enumerate() {
            let start = layout::PAYLOAD_OFFSET + position * 2;
            if bit == 1 {
                self.write_high(start, start + 1);
            } else {
                self.write_low(start, start + 1);
            }
        }
        Ok(())
    }

    pub fn write_footer(&mut self) {
        self.pulses[layout::FOOTER_MARK_OFFSET] = layout::SHORT_PULSE;
        self.pulses[layout::FOOTER_SPACE_OFFSET] = layout::FOOTER_SPACE;
    }

    pub fn finish(self) -> PulseTrain {
        PulseTrain::new(self.pulses)
    }
}

impl Default for FrameWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve request arguments into a field set.
pub fn resolve_fields(
    unitcode: Option<u32>,
    state: Option<State>,
) -> Result<FieldSet, McVoiceError> {
    match (unitcode, state) {
        (Some(unitcode), Some(state)) => Ok(FieldSet { unitcode, state }),
        (unitcode, _) => {
            error!("{}: insufficient number of arguments", layout::PROTOCOL_ID);
            let field = if unitcode.is_none() { "unitcode" } else { "state" };
            Err(McVoiceError::MissingField { field })
        }
    }
}

/// Modulate a field set into a full frame.
///
/// `state` is not radiated: the device only distinguishes unit codes, so the
/// state travels in the accompanying message.
pub fn encode_fields(fields: &FieldSet) -> Result<PulseTrain, McVoiceError> {
    let mut writer = FrameWriter::new();
    writer.write_header();
    writer.write_unitcode(fields.unitcode)?;
    writer.write_footer();
    Ok(writer.finish())
}

pub fn build_frame(
    unitcode: Option<u32>,
    state: Option<State>,
) -> Result<PulseTrain, McVoiceError> {
    encode_fields(&resolve_fields(unitcode, state)?)
}
