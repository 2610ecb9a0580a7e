#![cfg_attr(not(test), no_std)]

//! Controller for the raceway crossing light.
//!
//! A two-color light that cycles green and red on its own, until an operator
//! holds one of the two override switches. Three tasks share the work:
//!
//! - [`trafficlight::run_phase_scheduler`] runs the automatic cycle,
//! - [`monitor::run_override_monitor`] samples the switches and owns [`mode::ModeFlag`],
//! - [`light::run_light`] owns the lamp outputs and shows what the other two send.
//!
//! Nothing in here knows about the board; see `io.rs` in the firmware binary.

mod log;

pub mod config;
pub mod light;
pub mod mode;
pub mod monitor;
pub mod switches;
pub mod trafficlight;

pub use config::PhaseTiming;
pub use light::{Level, Light, LightState, Polarity};
pub use mode::{Mode, ModeFlag};
pub use monitor::OverrideMonitor;
pub use switches::{SwitchReading, Switches};
pub use trafficlight::PhaseScheduler;
