/*
 * The two manual override switches, one per color.
 *
 * Switches are sampled as raw levels, there is no debouncing and no edge
 * detection. A bouncing contact can at worst flip the mode for one poll, and
 * the light follows the switch as soon as it settles.
 */

use core::convert::Infallible;

use embedded_hal::digital::InputPin;
use enum_ordinalize::Ordinalize;

use crate::light::{LightState, Level, Polarity};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SwitchReading {
    pub green: bool,
    pub red: bool,
}

impl SwitchReading {
    pub const NONE: SwitchReading = SwitchReading {
        green: false,
        red: false,
    };

    pub const fn any(&self) -> bool {
        self.green || self.red
    }

    /*
     * The color the operator asks for, if any. With both switches held, red
     * wins: the red switch has always been evaluated last, and the light shows
     * whatever was evaluated last.
     */
    pub const fn requested(&self) -> Option<LightState> {
        match (self.green, self.red) {
            (_, true) => Some(LightState::Red),
            (true, false) => Some(LightState::Green),
            (false, false) => None,
        }
    }
}

pub struct Switches<I> {
    inputs: [I; LightState::VARIANT_COUNT],
    polarity: Polarity,
}

impl<I> Switches<I>
where
    I: InputPin<Error = Infallible>,
{
    // Inputs in ordinal order: green, red.
    pub fn new(inputs: [I; LightState::VARIANT_COUNT], polarity: Polarity) -> Self {
        Switches { inputs, polarity }
    }

    pub fn read_pin(&mut self, color: LightState) -> Level {
        let Ok(is_high) = self.inputs[color.ordinal()].is_high();
        self.polarity.level(is_high)
    }

    pub fn read(&mut self) -> SwitchReading {
        SwitchReading {
            green: self.read_pin(LightState::Green) == Level::Asserted,
            red: self.read_pin(LightState::Red) == Level::Asserted,
        }
    }
}

#[cfg(test)]
mod mock {
    use core::cell::Cell;
    use core::convert::Infallible;
    use std::rc::Rc;

    use embedded_hal::digital::{ErrorType, InputPin};

    // A switch whose level the test can flip while the `Switches` owns it.
    #[derive(Clone, Default)]
    pub struct MockInput {
        pub high: Rc<Cell<bool>>,
    }

    impl ErrorType for MockInput {
        type Error = Infallible;
    }

    impl InputPin for MockInput {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            Ok(self.high.get())
        }

        fn is_low(&mut self) -> Result<bool, Infallible> {
            Ok(!self.high.get())
        }
    }
}
