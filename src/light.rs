/*
 * The light itself: two lamps, green and red, of which exactly one is lit.
 *
 * The lamp outputs are kept in an array indexed by the ordinal of the color,
 * so adding a color (amber, some day) is a matter of extending the enum. The
 * polarity of the outputs is a board concern and is handled here, so that the
 * rest of the program can just talk about asserted and de-asserted.
 */

use core::convert::Infallible;

use embassy_sync::{blocking_mutex::raw::RawMutex, channel::Receiver};
use embedded_hal::digital::OutputPin;
use enum_ordinalize::Ordinalize;

use crate::log::debug;

#[derive(Ordinalize, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(usize)]
pub enum LightState {
    Green,
    Red,
}

impl LightState {
    pub const fn other(self) -> Self {
        match self {
            LightState::Green => LightState::Red,
            LightState::Red => LightState::Green,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Asserted,
    DeAsserted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    ActiveHigh,
    ActiveLow,
}

impl Polarity {
    // Electrical level for a logical level: `true` means drive the pin high.
    pub const fn is_high(self, level: Level) -> bool {
        match (self, level) {
            (Polarity::ActiveHigh, Level::Asserted) | (Polarity::ActiveLow, Level::DeAsserted) => {
                true
            }
            (Polarity::ActiveHigh, Level::DeAsserted) | (Polarity::ActiveLow, Level::Asserted) => {
                false
            }
        }
    }

    pub const fn level(self, is_high: bool) -> Level {
        match (self, is_high) {
            (Polarity::ActiveHigh, true) | (Polarity::ActiveLow, false) => Level::Asserted,
            (Polarity::ActiveHigh, false) | (Polarity::ActiveLow, true) => Level::DeAsserted,
        }
    }
}

pub struct Light<P> {
    outputs: [P; LightState::VARIANT_COUNT],
    polarity: Polarity,
    shown: Option<LightState>,
}

impl<P> Light<P>
where
    P: OutputPin<Error = Infallible>,
{
    /*
     * Takes the lamp outputs in ordinal order: green, red. All lamps are
     * switched off here, the first `show` decides what is lit.
     */
    pub fn new(outputs: [P; LightState::VARIANT_COUNT], polarity: Polarity) -> Self {
        let mut light = Light {
            outputs,
            polarity,
            shown: None,
        };
        for state in LightState::VARIANTS {
            light.set_pin(*state, Level::DeAsserted);
        }
        light
    }

    /*
     * Light exactly one color. Everything else goes dark before the requested
     * lamp comes on, so there is never an instant with two lamps lit.
     */
    pub fn show(&mut self, state: LightState) {
        for other in LightState::VARIANTS.iter().filter(|other| **other != state) {
            self.set_pin(*other, Level::DeAsserted);
        }
        self.set_pin(state, Level::Asserted);
        self.shown = Some(state);
    }

    pub fn shown(&self) -> Option<LightState> {
        self.shown
    }

    pub fn set_pin(&mut self, color: LightState, level: Level) {
        let pin = &mut self.outputs[color.ordinal()];
        let Ok(()) = if self.polarity.is_high(level) {
            pin.set_high()
        } else {
            pin.set_low()
        };
    }
}

/*
 * The light is owned by this one task. Both the phase scheduler and the
 * override monitor send it colors, and every color is shown in one go, so the
 * two of them can never leave the lamps half switched.
 */
pub async fn run_light<P, M, const N: usize>(
    commands: Receiver<'_, M, LightState, N>,
    mut light: Light<P>,
) -> !
where
    P: OutputPin<Error = Infallible>,
    M: RawMutex,
{
    loop {
        let state = commands.receive().await;
        if light.shown() != Some(state) {
            debug!("light {}", state);
        }
        light.show(state);
    }
}

#[cfg(test)]
mod mock {
    use core::cell::RefCell;
    use core::convert::Infallible;
    use std::rc::Rc;
    use std::vec::Vec;

    use embedded_hal::digital::{ErrorType, OutputPin};
    use enum_ordinalize::Ordinalize;

    use super::LightState;

    // Every write, in order, across all pins of one bank.
    pub type WriteLog = Rc<RefCell<Vec<(LightState, bool)>>>;

    pub struct MockOutput {
        pub color: LightState,
        pub high: Rc<RefCell<[bool; LightState::VARIANT_COUNT]>>,
        pub log: WriteLog,
    }

    impl ErrorType for MockOutput {
        type Error = Infallible;
    }

    impl OutputPin for MockOutput {
        fn set_high(&mut self) -> Result<(), Infallible> {
            self.write(true);
            Ok(())
        }

        fn set_low(&mut self) -> Result<(), Infallible> {
            self.write(false);
            Ok(())
        }
    }

    impl MockOutput {
        fn write(&mut self, high: bool) {
            self.high.borrow_mut()[self.color.ordinal()] = high;
            self.log.borrow_mut().push((self.color, high));
        }
    }

    pub fn bank() -> (
        [MockOutput; LightState::VARIANT_COUNT],
        Rc<RefCell<[bool; LightState::VARIANT_COUNT]>>,
        WriteLog,
    ) {
        let high = Rc::new(RefCell::new([false; LightState::VARIANT_COUNT]));
        let log = WriteLog::default();
        let pin = |color| MockOutput {
            color,
            high: high.clone(),
            log: log.clone(),
        };
        (
            [pin(LightState::Green), pin(LightState::Red)],
            high,
            log,
        )
    }
}
