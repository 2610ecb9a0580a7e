/*
 * The override monitor watches the two manual switches.
 *
 * While either switch is held the operator owns the light: the monitor
 * publishes `Mode::Manual` and lights the requested color itself, every poll,
 * so whatever the automatic cycle wrote last is corrected within one poll.
 * Once both switches are released it publishes `Mode::Automatic` and leaves
 * the light alone; the phase scheduler picks it up from there.
 */

use core::convert::Infallible;

use embassy_sync::{blocking_mutex::raw::RawMutex, channel::Sender};
use embassy_time::Timer;
use embedded_hal::digital::InputPin;

use crate::config::SWITCH_POLL;
use crate::light::LightState;
use crate::log::info;
use crate::mode::{Mode, ModeFlag};
use crate::switches::{SwitchReading, Switches};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub mode: Mode,
    pub drive: Option<LightState>,
}

#[derive(Debug)]
pub struct OverrideMonitor {
    published: Mode,
}

impl OverrideMonitor {
    pub const fn new() -> Self {
        OverrideMonitor {
            published: Mode::Automatic,
        }
    }

    pub fn published(&self) -> Mode {
        self.published
    }

    pub fn poll(&mut self, reading: SwitchReading) -> Decision {
        let mode = Mode::from_reading(&reading);
        if mode != self.published {
            info!("mode {} -> {} ({})", self.published, mode, reading);
            self.published = mode;
        }

        Decision {
            mode,
            drive: reading.requested(),
        }
    }
}

impl Default for OverrideMonitor {
    fn default() -> Self {
        Self::new()
    }
}

pub async fn run_override_monitor<I, M, const N: usize>(
    mode: &ModeFlag,
    mut switches: Switches<I>,
    lights: Sender<'_, M, LightState, N>,
) -> !
where
    I: InputPin<Error = Infallible>,
    M: RawMutex,
{
    let mut monitor = OverrideMonitor::new();

    loop {
        let decision = monitor.poll(switches.read());
        mode.set(decision.mode);
        if let Some(color) = decision.drive {
            lights.send(color).await;
        }
        Timer::after(SWITCH_POLL).await;
    }
}
