#![no_std]
#![no_main]

use defmt::info;
use embassy_executor::Spawner;
use embassy_sync::channel::Channel;
use {defmt_rtt as _, panic_halt as _};

use raceway_light::ModeFlag;

mod io;
use io::{Board, LightChannel};

static LIGHTS: LightChannel = Channel::new();
static MODE: ModeFlag = ModeFlag::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    // A board that does not come up panics here, before any task touches the
    // lamps.
    let board = Board::init();
    info!("raceway light up, starting in {}", MODE.get());

    spawner
        .spawn(io::light_task(LIGHTS.receiver(), board.light))
        .unwrap();
    spawner
        .spawn(io::override_monitor_task(
            &MODE,
            board.switches,
            LIGHTS.sender(),
        ))
        .unwrap();
    spawner
        .spawn(io::phase_scheduler_task(&MODE, LIGHTS.sender()))
        .unwrap();
}
