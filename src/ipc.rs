//! Cross-task shared state.
//!
//! Exactly three things cross task boundaries here: the live pitch scalar
//! (IMU task -> control loop), the maneuver command channel (command intake
//! -> control loop) and the diagnostic event channel (control loop ->
//! telemetry). Everything else is owned by the control loop.

use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex as RawMutex, channel::Channel};
use portable_atomic::{AtomicU32, Ordering};

use crate::config::{COMMAND_CHANNEL_SIZE, EVENT_CHANNEL_SIZE};
use crate::gait::GaitFault;
use crate::kinematics::ReachFault;
use crate::maneuver::Command;

/// Single-word handoff for the live body pitch (rad, positive nose-up).
///
/// The IMU task stores at its own rate; the control loop snapshots once per
/// tick. Both the raw value and the tare offset are single aligned words,
/// so reads are torn-free without any lock. The offset only ever changes on
/// a flip trigger.
pub struct PitchCell {
    raw: AtomicU32,
    offset: AtomicU32,
}

impl PitchCell {
    pub const fn new() -> Self {
        Self {
            raw: AtomicU32::new(0),
            offset: AtomicU32::new(0),
        }
    }

    /// Writer side (IMU task): publish the newest raw pitch.
    pub fn update(&self, pitch: f32) {
        self.raw.store(pitch.to_bits(), Ordering::Release);
    }

    /// Reader side (control loop): newest pitch relative to the last tare.
    pub fn read(&self) -> f32 {
        let raw = f32::from_bits(self.raw.load(Ordering::Acquire));
        let offset = f32::from_bits(self.offset.load(Ordering::Acquire));
        raw - offset
    }

    /// Zero the reference at the current pose. Invoked at flip trigger so
    /// subsequent feedback is relative to the pose at trigger time.
    pub fn tare(&self) {
        let raw = self.raw.load(Ordering::Acquire);
        self.offset.store(raw, Ordering::Release);
    }
}

impl Default for PitchCell {
    fn default() -> Self {
        Self::new()
    }
}

/// The one cross-task scalar: live pitch from the IMU task.
pub static LIVE_PITCH: PitchCell = PitchCell::new();

/// Maneuver commands posted from other tasks; drained by the control loop
/// at the start of each tick, so a mode/clock switch is always observed as
/// a single unit.
pub static COMMAND_CH: Channel<RawMutex, Command, COMMAND_CHANNEL_SIZE> = Channel::new();

/// Discrete, leveled diagnostic events.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Gait parameters failed validation; that tick's dispatch was skipped.
    GaitRejected(GaitFault),
    /// Kinematic domain error; gamma was clamped and the command still sent.
    LegReach { leg: u8, fault: ReachFault },
    /// The actuator interface reported a send failure. Not retried here.
    DispatchFailed { leg: u8 },
    JumpStarted,
    JumpComplete,
    FlipStarted,
    /// Flip rotation never crossed the pitch threshold inside the watchdog
    /// bound; the controller fell back to WALK.
    FlipWatchdogExpired,
    GaitSelected,
}

pub static EVENT_CH: Channel<RawMutex, Event, EVENT_CHANNEL_SIZE> = Channel::new();

/// Emit a diagnostic event. Observational only: dropped if the channel is
/// full, never blocks the control loop.
pub fn report(event: Event) {
    #[cfg(feature = "defmt")]
    match event {
        Event::GaitRejected(fault) => defmt::warn!("gait rejected: {}", fault),
        Event::LegReach { leg, fault } => defmt::warn!("leg {} reach: {}", leg, fault),
        Event::DispatchFailed { leg } => defmt::warn!("leg {} dispatch failed", leg),
        Event::JumpStarted => defmt::info!("jump started"),
        Event::JumpComplete => defmt::info!("jump complete"),
        Event::FlipStarted => defmt::info!("flip started"),
        Event::FlipWatchdogExpired => defmt::error!("flip watchdog expired"),
        Event::GaitSelected => defmt::info!("gait selected"),
    }
    let _ = EVENT_CH.try_send(event);
}

/// Post a maneuver command from another task. Dropped (benign) if the
/// intake queue is full; re-triggering is always safe.
pub fn post(command: Command) {
    let _ = COMMAND_CH.try_send(command);
}
