/*
 * The automatic cycle: green, then red, then green again, for as long as
 * nobody holds an override switch.
 *
 * The state machine is kept free of timers and channels. `poll` is told the
 * mode and the current time and answers with what to light (if anything) and
 * how long to sleep before asking again. The task at the bottom of this file
 * is the only part that actually waits.
 */

use core::cmp::min;

use embassy_sync::{blocking_mutex::raw::RawMutex, channel::Sender};
use embassy_time::{Duration, Instant, Timer};

use crate::config::{PhaseTiming, SCHEDULER_POLL};
use crate::light::LightState;
use crate::log::{debug, info};
use crate::mode::{Mode, ModeFlag};

/*
 * Counts down one phase. The timer is armed when a phase is entered and is
 * thrown away when the operator takes over, so time spent in a phase before
 * an override never carries over into the next automatic cycle.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTimer {
    deadline: Instant,
}

impl PhaseTimer {
    pub fn arm(start: Instant, duration: Duration) -> Self {
        PhaseTimer {
            deadline: start + duration,
        }
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.deadline.saturating_duration_since(now)
    }

    pub fn expired(&self, now: Instant) -> bool {
        now >= self.deadline
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    // Not driving the light, either because we just booted or because the
    // operator has it.
    Parked,
    Holding { phase: LightState, timer: PhaseTimer },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub drive: Option<LightState>,
    pub sleep: Duration,
}

#[derive(Debug)]
pub struct PhaseScheduler {
    timing: PhaseTiming,
    state: State,
}

impl PhaseScheduler {
    pub fn new(timing: PhaseTiming) -> Self {
        PhaseScheduler {
            timing,
            state: State::Parked,
        }
    }

    // The phase being held right now, `None` while parked.
    pub fn phase(&self) -> Option<LightState> {
        match self.state {
            State::Parked => None,
            State::Holding { phase, .. } => Some(phase),
        }
    }

    pub fn poll(&mut self, mode: Mode, now: Instant) -> Tick {
        match (mode, self.state) {
            (Mode::Manual, state) => {
                if let State::Holding { phase, .. } = state {
                    debug!("scheduler parked during {}", phase);
                }
                self.state = State::Parked;
                Tick {
                    drive: None,
                    sleep: SCHEDULER_POLL,
                }
            }
            // Coming back from an override always starts a fresh cycle.
            (Mode::Automatic, State::Parked) => self.enter(LightState::Green, now),
            (Mode::Automatic, State::Holding { phase, timer }) if timer.expired(now) => {
                self.enter(phase.other(), now)
            }
            (Mode::Automatic, State::Holding { timer, .. }) => Tick {
                drive: None,
                sleep: min(timer.remaining(now), SCHEDULER_POLL),
            },
        }
    }

    fn enter(&mut self, phase: LightState, now: Instant) -> Tick {
        let duration = self.timing.duration(phase);
        let timer = PhaseTimer::arm(now, duration);
        self.state = State::Holding { phase, timer };
        info!("phase {} for {} ms", phase, duration.as_millis());

        Tick {
            drive: Some(phase),
            sleep: min(duration, SCHEDULER_POLL),
        }
    }
}

pub async fn run_phase_scheduler<M: RawMutex, const N: usize>(
    mode: &ModeFlag,
    lights: Sender<'_, M, LightState, N>,
    timing: PhaseTiming,
) -> ! {
    let mut scheduler = PhaseScheduler::new(timing);

    loop {
        let tick = scheduler.poll(mode.get(), Instant::now());
        if let Some(phase) = tick.drive {
            lights.send(phase).await;
        }
        Timer::after(tick.sleep).await;
    }
}
