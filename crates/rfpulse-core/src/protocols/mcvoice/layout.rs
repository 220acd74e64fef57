pub const PROTOCOL_ID: &str = "mcvoice_rm1011b";
pub const DEVICE_NAME: &str = "McVoice Smoke Alarm";

pub const MIN_PULSE_LENGTH: u32 = 450;
pub const MAX_PULSE_LENGTH: u32 = 500;
pub const AVG_PULSE_LENGTH: u32 = 475;
pub const PULSE_MULTIPLIER: u32 = 3;

/// Full frame, header mark through footer space.
pub const RAW_LENGTH: usize = 52;
/// Captured frame: the receiver splits off the leading header mark.
pub const CAPTURED_LENGTH: usize = RAW_LENGTH - 1;
/// Payload bits: captured frame minus the header space and the footer pair.
pub const BIN_ELEMENTS: usize = (RAW_LENGTH - 1 - 2) / 2;
pub const MAX_UNITCODE: u32 = (1 << BIN_ELEMENTS) - 1;

pub const TX_REPEATS: u32 = 35;

// Encoded frame positions.
pub const HEADER_MARK_OFFSET: usize = 0;
pub const HEADER_SPACE_OFFSET: usize = 1;
pub const PAYLOAD_OFFSET: usize = 2;
pub const FOOTER_MARK_OFFSET: usize = 50;
pub const FOOTER_SPACE_OFFSET: usize = 51;
/// Last encoded position covered by the low/zero fill.
pub const FILL_END: usize = 49;

// Captured frame positions: space of payload bit `n` is at `2n + 2`.
pub const CAPTURED_PAYLOAD_OFFSET: usize = 2;

pub const HEADER_MARK: u32 = AVG_PULSE_LENGTH * 17;
pub const SHORT_PULSE: u32 = AVG_PULSE_LENGTH * 2;
pub const LOW_SPACE: u32 = AVG_PULSE_LENGTH * PULSE_MULTIPLIER;
pub const HIGH_SPACE: u32 = AVG_PULSE_LENGTH * PULSE_MULTIPLIER * 2;
pub const FOOTER_SPACE: u32 = AVG_PULSE_LENGTH * 34;

/// A payload space strictly inside this range reads as a 1 bit.
pub const HIGH_SPACE_MIN_EXCLUSIVE: u32 = MIN_PULSE_LENGTH * 6;
pub const HIGH_SPACE_MAX_EXCLUSIVE: u32 = MAX_PULSE_LENGTH * 6;

pub const UNITCODE_PATTERN: &str = "^([0-9]{7})$";
pub const READONLY_PATTERN: &str = "^[10]{1}$";
