/*
 * Who owns the light: the automatic cycle or the operator.
 *
 * The override monitor is the only writer, the phase scheduler only reads. The
 * flag is a plain atomic: the scheduler picks up a change on its next poll,
 * and neither task ever waits for the other.
 */

use core::sync::atomic::{AtomicBool, Ordering};

use crate::switches::SwitchReading;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    Automatic,
    Manual,
}

impl Mode {
    pub const fn from_reading(reading: &SwitchReading) -> Self {
        if reading.any() {
            Mode::Manual
        } else {
            Mode::Automatic
        }
    }
}

pub struct ModeFlag {
    manual: AtomicBool,
}

impl ModeFlag {
    pub const fn new() -> Self {
        ModeFlag {
            manual: AtomicBool::new(false),
        }
    }

    pub fn get(&self) -> Mode {
        if self.manual.load(Ordering::Acquire) {
            Mode::Manual
        } else {
            Mode::Automatic
        }
    }

    pub fn set(&self, mode: Mode) {
        self.manual.store(mode == Mode::Manual, Ordering::Release);
    }
}

impl Default for ModeFlag {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_automatic() {
        assert_eq!(ModeFlag::new().get(), Mode::Automatic);
    }

    #[test]
    fn set_is_seen_by_get() {
        let flag = ModeFlag::new();
        flag.set(Mode::Manual);
        assert_eq!(flag.get(), Mode::Manual);
        flag.set(Mode::Manual);
        assert_eq!(flag.get(), Mode::Manual);
        flag.set(Mode::Automatic);
        assert_eq!(flag.get(), Mode::Automatic);
    }

    #[test]
    fn manual_iff_a_switch_is_asserted() {
        for green in [false, true] {
            for red in [false, true] {
                let mode = Mode::from_reading(&SwitchReading { green, red });
                assert_eq!(mode == Mode::Manual, green || red);
            }
        }
    }

    #[test]
    fn flag_is_shared_across_threads() {
        static FLAG: ModeFlag = ModeFlag::new();
        std::thread::spawn(|| FLAG.set(Mode::Manual))
            .join()
            .unwrap();
        assert_eq!(FLAG.get(), Mode::Manual);
    }
}
