//! joylite-hw-interface
//!
//! Joystick → OLED marker + RGB LED firmware for the Raspberry Pi Pico 2.
//! Wires the two library crates into a live loop:
//!
//! 1. A button is pressed. Its GPIO raises a falling-edge interrupt, which
//!    wakes that button's task.
//! 2. The button task offers the edge to the shared `InputState`. Button A
//!    toggles LED actuation; the joystick button toggles the green LED and
//!    flashes the decorative border on the OLED.
//! 3. The control task samples both joystick axes every ~80 ms, redraws
//!    the marker in two 40 ms phases, logs a readout, and drives the red
//!    and blue LEDs when actuation is enabled.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{self, Adc};
use embassy_rp::bind_interrupts;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C1;
use embassy_rp::pwm::{self, Pwm};
use embassy_sync::mutex::Mutex;
use embassy_time::Instant;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use joylite::control::{
    ButtonId, ControlFrame, EdgeAction, InputState, JoystickSample, LedChannel, PwmOutput,
    ADC_CENTRE, MARKER_START, PWM_CLOCK_DIVIDER, PWM_WRAP,
};
use joylite_oled_display_rs::{
    draw_marker, flash_decoration, refresh_marker, DisplayConfig, OledDriver, OledError,
    SharedOled,
};

// ---------------------------------------------------------------------------
// Boot block and interrupt binding
// ---------------------------------------------------------------------------

/// Tell the RP2350 Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = embassy_rp::block::ImageDef::secure_exe();

bind_interrupts!(struct Irqs {
    I2C1_IRQ => i2c::InterruptHandler<I2C1>;
    ADC_IRQ_FIFO => adc::InterruptHandler;
});

// ---------------------------------------------------------------------------
// Static storage
// ---------------------------------------------------------------------------

/// Button state. Written by the two button tasks, read by the control task.
static INPUT_STATE: StaticCell<InputState> = StaticCell::new();

/// OLED shared by the control task (marker) and the joystick button task
/// (decoration flash).
static DISPLAY: StaticCell<SharedOled<OledI2c>> = StaticCell::new();

/// SSD1306 I2C address.
const OLED_ADDRESS: u8 = 0x3C;

/// I2C1 bus speed in Hz.
const I2C_FREQUENCY_HZ: u32 = 400_000;

// ---------------------------------------------------------------------------
// Type aliases
// ---------------------------------------------------------------------------

/// Concrete I2C type for the OLED display. It is the only device on I2C1.
type OledI2c = I2c<'static, I2C1, i2c::Async>;

// ---------------------------------------------------------------------------
// LED PWM
// ---------------------------------------------------------------------------

/// Red and blue LEDs on PWM slice 6: blue (GP12) is channel A, red (GP13)
/// is channel B.
struct LedPwm {
    pwm: Pwm<'static>,
    config: pwm::Config,
}

impl LedPwm {
    fn config() -> pwm::Config {
        let mut config = pwm::Config::default();
        // PWM_WRAP assumes a 125 MHz clk_sys; at the RP2350's 150 MHz default
        // this slice runs at 60 Hz rather than 50 Hz.
        config.divider = PWM_CLOCK_DIVIDER.into();
        config.top = PWM_WRAP;
        config.compare_a = 0;
        config.compare_b = 0;
        config.enable = true;
        config
    }
}

impl PwmOutput for LedPwm {
    fn set_duty(&mut self, channel: LedChannel, duty: u16) {
        match channel {
            LedChannel::Blue => self.config.compare_a = duty,
            LedChannel::Red => self.config.compare_b = duty,
        }
        self.pwm.set_config(&self.config);
    }
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// Edge handler for one button.
///
/// Sleeps until the pin falls (buttons are active-low with pull-ups), then
/// hands the edge to `InputState`. Only the joystick button carries the
/// green LED; it is `None` for button A.
#[embassy_executor::task(pool_size = 2)]
async fn button_task(
    button: ButtonId,
    mut pin: Input<'static>,
    mut aux_led: Option<Output<'static>>,
    state: &'static InputState,
    display: &'static SharedOled<OledI2c>,
) -> ! {
    info!("{} button task started", button);
    let config = DisplayConfig::default();

    loop {
        pin.wait_for_falling_edge().await;
        let now_us = Instant::now().as_micros();

        match state.handle_edge(button, now_us) {
            None => debug!("{} edge at {} us debounced", button, now_us),
            Some(EdgeAction::Actuation { enabled }) => {
                info!("LED actuation enabled={}", enabled);
            }
            Some(EdgeAction::Auxiliary { led_on }) => {
                if let Some(led) = aux_led.as_mut() {
                    led.set_level(Level::from(led_on));
                }
                if let Err(e) = flash_decoration(display, &config).await {
                    warn!("Decoration flash failed: {}", e);
                }
                info!("Green LED on={}", led_on);
            }
        }
    }
}

/// Fixed-cadence control loop: sample → map → render → log → actuate.
///
/// Never returns. One iteration takes two display phases (~80 ms) plus the
/// ADC conversions.
#[embassy_executor::task]
async fn control_task(
    mut adc: Adc<'static, adc::Async>,
    mut x_axis: adc::Channel<'static>,
    mut y_axis: adc::Channel<'static>,
    mut leds: LedPwm,
    state: &'static InputState,
    display: &'static SharedOled<OledI2c>,
) -> ! {
    let config = DisplayConfig::default();
    info!(
        "Control task started, refresh period {} ms",
        config.refresh_period_ms()
    );
    let mut last = JoystickSample::new(ADC_CENTRE, ADC_CENTRE);

    loop {
        // X before Y, matching the board's channel wiring.
        let x = read_axis(&mut adc, &mut x_axis, last.x).await;
        let y = read_axis(&mut adc, &mut y_axis, last.y).await;
        let sample = JoystickSample::new(x, y);
        last = sample;

        let frame = ControlFrame::from_sample(sample);

        refresh_marker(display, frame.marker, &config).await;

        info!("{}", frame.readout());

        frame.actuate(&mut leds, state.actuation_enabled());
    }
}

/// One conversion; falls back to `previous` if the ADC reports an error.
async fn read_axis(
    adc: &mut Adc<'static, adc::Async>,
    channel: &mut adc::Channel<'static>,
    previous: u16,
) -> u16 {
    match adc.read(channel).await {
        Ok(raw) => raw,
        Err(_) => {
            warn!("ADC conversion failed; keeping {}", previous);
            previous
        }
    }
}

/// Blank the panel and draw the centred start-up marker.
async fn show_start_marker(
    oled: &mut OledDriver<OledI2c>,
    config: &DisplayConfig,
) -> Result<(), OledError> {
    oled.clear();
    draw_marker(oled.frame_mut()?, MARKER_START, config)?;
    oled.flush().await
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("joylite-hw-interface starting");

    // —— Pin assignments ————————————————————————————————————————————————————
    // BTN_A    → GP5   (p.PIN_5)   active-low, pull-up enabled
    // BTN_JOY  → GP22  (p.PIN_22)  active-low, pull-up enabled
    // LED_G    → GP11  (p.PIN_11)  plain output
    // LED_B    → GP12  (p.PIN_12)  PWM slice 6 A
    // LED_R    → GP13  (p.PIN_13)  PWM slice 6 B
    // I2C_SDA  → GP14  (p.PIN_14)  I2C1
    // I2C_SCL  → GP15  (p.PIN_15)  I2C1
    // JOY_Y    → GP26  (p.PIN_26)  ADC0
    // JOY_X    → GP27  (p.PIN_27)  ADC1
    // ———————————————————————————————————————————————————————————————————————

    let aux_led = Output::new(p.PIN_11, Level::Low);
    let button_a = Input::new(p.PIN_5, Pull::Up);
    let button_joy = Input::new(p.PIN_22, Pull::Up);

    // —— Display ————————————————————————————————————————————————————————————

    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2C_FREQUENCY_HZ;
    let i2c = I2c::new_async(
        p.I2C1,
        p.PIN_15, // SCL
        p.PIN_14, // SDA
        Irqs,
        i2c_config,
    );

    let display_config = DisplayConfig::default();
    let mut oled = OledDriver::new(i2c, OLED_ADDRESS);
    unwrap!(oled.init().await);
    unwrap!(show_start_marker(&mut oled, &display_config).await);
    info!("OLED initialised");

    let display: &'static SharedOled<OledI2c> = DISPLAY.init(Mutex::new(oled));

    // —— Joystick ADC ———————————————————————————————————————————————————————

    let adc = Adc::new(p.ADC, Irqs, adc::Config::default());
    let x_axis = adc::Channel::new_pin(p.PIN_27, Pull::None);
    let y_axis = adc::Channel::new_pin(p.PIN_26, Pull::None);

    // —— LED PWM ————————————————————————————————————————————————————————————

    let pwm_config = LedPwm::config();
    let leds = LedPwm {
        pwm: Pwm::new_output_ab(p.PWM_SLICE6, p.PIN_12, p.PIN_13, pwm_config.clone()),
        config: pwm_config,
    };
    info!("LED PWM wrap={}", PWM_WRAP);

    // —— Shared state and tasks ————————————————————————————————————————————

    let state: &'static InputState = INPUT_STATE.init(InputState::new());

    spawner.spawn(unwrap!(button_task(
        ButtonId::Primary,
        button_a,
        None,
        state,
        display,
    )));
    spawner.spawn(unwrap!(button_task(
        ButtonId::Joystick,
        button_joy,
        Some(aux_led),
        state,
        display,
    )));
    spawner.spawn(unwrap!(control_task(adc, x_axis, y_axis, leds, state, display)));

    info!("All tasks spawned");
}
