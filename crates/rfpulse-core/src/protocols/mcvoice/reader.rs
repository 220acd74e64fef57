use super::error::McVoiceError;
use super::layout;

pub struct PulseReader<'a> {
    pulses: &'a [u32],
}

impl<'a> PulseReader<'a> {
    pub fn new(pulses: &'a [u32]) -> Self {
        Self { pulses }
    }

    pub fn require_exact_len(&self, expected: usize) -> Result<(), McVoiceError> {
        if self.pulses.len() != expected {
            return Err(McVoiceError::InvalidLength {
                expected,
                actual: self.pulses.len(),
            });
        }
        Ok(())
    }

    pub fn read_pulse(&self, index: usize) -> Result<u32, McVoiceError> {
        self.pulses
            .get(index)
            .copied()
            .ok_or(McVoiceError::OutOfBounds {
                index,
                len: self.pulses.len(),
            })
    }

    pub fn read_last(&self) -> Result<u32, McVoiceError> {
        self.pulses.last().copied().ok_or(McVoiceError::OutOfBounds {
            index: 0,
            len: 0,
        })
    }

    /// Check the pulse next to the (split-off) footer against the gap bounds.
    pub fn require_footer(&self, pulse_div: u32) -> Result<(), McVoiceError> {
        let value = self.read_last()?;
        let (min, max) = gap_bounds(pulse_div);
        if value < min || value > max {
            return Err(McVoiceError::FooterOutOfRange { value, min, max });
        }
        Ok(())
    }

    /// Payload bit `position`, classified from its space duration.
    pub fn read_bit(&self, position: usize) -> Result<u8, McVoiceError> {
        let space = self.read_pulse(layout::CAPTURED_PAYLOAD_OFFSET + position * 2)?;
        Ok(u8::from(is_high_space(space)))
    }

    pub fn read_payload(&self) -> Result<[u8; layout::BIN_ELEMENTS], McVoiceError> {
        let mut bits = [0u8; layout::BIN_ELEMENTS];
        for (position, bit) in bits.iter_mut().enumerate() {
            *bit = self.read_bit(position)?;
        }
        Ok(bits)
    }
}

/// Inclusive gap bounds scaled by the host's pulse divisor.
pub fn gap_bounds(pulse_div: u32) -> (u32, u32) {
    (
        layout::MIN_PULSE_LENGTH.saturating_mul(pulse_div),
        layout::MAX_PULSE_LENGTH.saturating_mul(pulse_div),
    )
}

pub fn is_high_space(space: u32) -> bool {
    space > layout::HIGH_SPACE_MIN_EXCLUSIVE && space < layout::HIGH_SPACE_MAX_EXCLUSIVE
}

#[cfg(test)]
mod tests {
    use super::{PulseReader, gap_bounds, is_high_space};
    use crate::protocols::mcvoice::error::McVoiceError;
    use crate::protocols::mcvoice::layout;

    #[test]
    fn high_space_bounds_are_exclusive() {
        assert!(!is_high_space(layout::HIGH_SPACE_MIN_EXCLUSIVE));
        assert!(!is_high_space(layout::HIGH_SPACE_MAX_EXCLUSIVE));
        assert!(is_high_space(layout::HIGH_SPACE));
        assert!(!is_high_space(layout::LOW_SPACE));
    }

    #[test]
    fn gap_bounds_scale_with_divisor() {
        assert_eq!(gap_bounds(34), (15_300, 17_000));
        assert_eq!(gap_bounds(u32::MAX).1, u32::MAX);
    }

    #[test]
    fn require_exact_len_reports_both_lengths() {
        let pulses = [0u32; 3];
        let err = PulseReader::new(&pulses).require_exact_len(4).unwrap_err();
        assert_eq!(
            err,
            McVoiceError::InvalidLength {
                expected: 4,
                actual: 3,
            }
        );
    }

    #[test]
    fn read_last_on_empty_train() {
        let err = PulseReader::new(&[]).read_last().unwrap_err();
        assert!(matches!(err, McVoiceError::OutOfBounds { len: 0, .. }));
    }

    #[test]
    fn read_bit_uses_space_positions() {
        let pulses = [0, 0, layout::HIGH_SPACE, 0, layout::LOW_SPACE];
        let reader = PulseReader::new(&pulses);
        assert_eq!(reader.read_bit(0).unwrap(), 1);
        assert_eq!(reader.read_bit(1).unwrap(), 0);
        assert!(reader.read_bit(2).is_err());
    }
}
