/*
 * The I/O module for the raceway light.
 *
 * This is the only device-specific part of the program: it configures the
 * clocks, claims the lamp and switch pins of the STM32F103 board and wraps the
 * library's control loops in Embassy tasks. The tasks talk to each other
 * through the light channel and the mode flag that `main` hands them.
 */

use embassy_stm32::gpio::{Input, Level as PinLevel, Output, Pin, Pull, Speed};
use embassy_sync::{
    blocking_mutex::raw::ThreadModeRawMutex,
    channel::{Channel, Receiver, Sender},
};

use raceway_light::config::CHANNEL_CAPACITY;
use raceway_light::light::run_light;
use raceway_light::monitor::run_override_monitor;
use raceway_light::trafficlight::run_phase_scheduler;
use raceway_light::{Light, LightState, ModeFlag, PhaseTiming, Polarity, Switches};

pub type LightChannel = Channel<ThreadModeRawMutex, LightState, CHANNEL_CAPACITY>;
type LightSender = Sender<'static, ThreadModeRawMutex, LightState, CHANNEL_CAPACITY>;
type LightReceiver = Receiver<'static, ThreadModeRawMutex, LightState, CHANNEL_CAPACITY>;

pub struct Board {
    pub light: Light<Output<'static>>,
    pub switches: Switches<Input<'static>>,
}

impl Board {
    /*
     * Bring up clocks and GPIO. Lamps are PB8 (green) and PB9 (red), both
     * active-high and dark until the first phase. The override switches are
     * PB12 (green) and PB13 (red), pulled down and closing to 3V3.
     */
    pub fn init() -> Self {
        let peripherals = embassy_stm32::init(create_stm32_config());

        let light = Light::new(
            [
                Output::new(peripherals.PB8.degrade(), PinLevel::Low, Speed::Low),
                Output::new(peripherals.PB9.degrade(), PinLevel::Low, Speed::Low),
            ],
            Polarity::ActiveHigh,
        );

        let switches = Switches::new(
            [
                Input::new(peripherals.PB12.degrade(), Pull::Down),
                Input::new(peripherals.PB13.degrade(), Pull::Down),
            ],
            Polarity::ActiveHigh,
        );

        Board { light, switches }
    }
}

// 8 MHz crystal, PLL x9 to 72 MHz, APB1 at the 36 MHz it is limited to.
fn create_stm32_config() -> embassy_stm32::Config {
    let mut config = embassy_stm32::Config::default();
    {
        use embassy_stm32::{rcc::*, time::Hertz};
        config.rcc.hse = Some(Hse {
            freq: Hertz(8_000_000),
            mode: HseMode::Oscillator,
        });
        config.rcc.pll = Some(Pll {
            src: PllSource::HSE,
            prediv: PllPreDiv::DIV1,
            mul: PllMul::MUL9,
        });
        config.rcc.sys = Sysclk::PLL1_P;
        config.rcc.ahb_pre = AHBPrescaler::DIV1;
        config.rcc.apb1_pre = APBPrescaler::DIV2;
        config.rcc.apb2_pre = APBPrescaler::DIV1;
        config.rcc.adc_pre = ADCPrescaler::DIV6;
    }
    config
}

#[embassy_executor::task]
pub async fn light_task(commands: LightReceiver, light: Light<Output<'static>>) -> ! {
    run_light(commands, light).await
}

#[embassy_executor::task]
pub async fn override_monitor_task(
    mode: &'static ModeFlag,
    switches: Switches<Input<'static>>,
    lights: LightSender,
) -> ! {
    run_override_monitor(mode, switches, lights).await
}

#[embassy_executor::task]
pub async fn phase_scheduler_task(mode: &'static ModeFlag, lights: LightSender) -> ! {
    run_phase_scheduler(mode, lights, PhaseTiming::DEFAULT).await
}
