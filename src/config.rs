// Centralize all configuration constants

/// Upper leg link length (m)
pub const L1: f32 = 0.09;
/// Lower leg link length (m)
pub const L2: f32 = 0.162;

/// Shortest virtual leg length the linkage can reach (m)
pub const MIN_LEG_LENGTH: f32 = 0.08;
/// Longest virtual leg length the linkage can reach (m)
pub const MAX_LEG_LENGTH: f32 = 0.25;

// Thread execution frequencies. The control loop itself is driven by the
// firmware executor; these document the rates the core is designed around.
pub const POSITION_CONTROL_FREQ_HZ: u32 = 100;
pub const IMU_FREQ_HZ: u32 = 400;

// Channel sizes
pub const COMMAND_CHANNEL_SIZE: usize = 4;
pub const EVENT_CHANNEL_SIZE: usize = 16;

/// Body pitch at which the backflip has rotated far enough to plant the
/// rear legs for landing (rad).
pub const FLIP_PITCH_THRESHOLD: f32 = 85.0 * core::f32::consts::PI / 180.0;

/// Upper bound on a whole flip (s). The rotation phase is gated on live
/// pitch and would otherwise wait forever after a failed launch.
pub const FLIP_WATCHDOG_S: f32 = 5.0;
