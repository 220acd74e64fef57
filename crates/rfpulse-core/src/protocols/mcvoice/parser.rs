use log::{debug, trace};

use super::error::McVoiceError;
use super::layout;
use super::reader::PulseReader;
use crate::protocols::common::binary::bin_to_dec_rev;
use crate::{FieldSet, State};

/// Frame-length and footer check run before any demodulation.
///
/// Only the length and the last pulse are inspected; payload pulses are not.
pub fn check_frame(pulses: &[u32], pulse_div: u32) -> Result<(), McVoiceError> {
    let reader = PulseReader::new(pulses);
    reader.require_exact_len(layout::CAPTURED_LENGTH)?;
    reader.require_footer(pulse_div)
}

pub fn validate(pulses: &[u32], pulse_div: u32) -> bool {
    match check_frame(pulses, pulse_div) {
        Ok(()) => true,
        Err(err) => {
            debug!("{}: rejected: {}", layout::PROTOCOL_ID, err);
            false
        }
    }
}

/// Demodulate a captured frame.
///
/// The payload carries only the unit code, so a received frame always
/// reports `off`.
pub fn parse_frame(pulses: &[u32], pulse_div: u32) -> Result<FieldSet, McVoiceError> {
    check_frame(pulses, pulse_div)?;

    let reader = PulseReader::new(pulses);
    let bits = reader.read_payload()?;
    trace!("{}: payload bits {:?}", layout::PROTOCOL_ID, bits);

    Ok(FieldSet {
        unitcode: bin_to_dec_rev(&bits),
        state: State::Off,
    })
}
