/*
 * Compile-time settings for the raceway light.
 *
 * The two phase durations are the only knobs the operator is expected to
 * touch. The poll intervals set how fast the light reacts to the override
 * switches and how fast the automatic cycle notices that it lost control.
 */

use embassy_time::Duration;

use crate::light::LightState;

pub const GREEN_PHASE: Duration = Duration::from_millis(120_000);
pub const RED_PHASE: Duration = Duration::from_millis(20_000);

// How often the phase scheduler re-checks the mode, both while it is parked
// and while it is holding a phase.
pub const SCHEDULER_POLL: Duration = Duration::from_millis(5);

// How often the override monitor samples the switches.
pub const SWITCH_POLL: Duration = Duration::from_millis(10);

pub const CHANNEL_CAPACITY: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTiming {
    pub green: Duration,
    pub red: Duration,
}

impl PhaseTiming {
    pub const DEFAULT: PhaseTiming = PhaseTiming {
        green: GREEN_PHASE,
        red: RED_PHASE,
    };

    pub const fn duration(&self, state: LightState) -> Duration {
        match state {
            LightState::Green => self.green,
            LightState::Red => self.red,
        }
    }
}

impl Default for PhaseTiming {
    fn default() -> Self {
        Self::DEFAULT
    }
}
