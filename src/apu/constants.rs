//! Shared APU lookup tables and timing constants

/// APU clock rate in Hz (NTSC CPU clock / 2)
pub const APU_FREQUENCY: f32 = 894_886.5;

/// Length counter lookup table
///
/// Maps the 5-bit length load value written to the channel's high register
/// onto the actual counter value.
pub const LENGTH_COUNTER_TABLE: [u8; 32] = [
    10, 254, 20, 2, 40, 4, 80, 6, 160, 8, 60, 10, 14, 12, 26, 14, 12, 16, 24, 18, 48, 20, 96, 22,
    192, 24, 72, 26, 16, 28, 32, 30,
];

/// Pulse duty cycles as waveform fractions
///
/// Index 3 is the negated 25% waveform; the sign selects the inverted
/// half of the cycle in the analytic pulse output.
pub const DUTY_FRACTIONS: [f32; 4] = [0.125, 0.250, 0.500, -0.250];

/// 32-step triangle sequence (15 down to 0, then 0 up to 15)
pub const TRIANGLE_SEQUENCE: [u8; 32] = [
    15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11,
    12, 13, 14, 15,
];
