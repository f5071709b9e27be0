//! Collision-alert firmware entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  CollisionInput   AlertSequencer    StatusPresenter          │
//! │  (SensorPort)     (AlertPort)       (StatusPort → SSD1306)   │
//! │  TelemetrySender  SimulatedGps                               │
//! │  (TelemetryPort)  (LocationPort)                             │
//! │                                                              │
//! │  ─────────────── Port Trait Boundary ───────────────         │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────┐      │
//! │  │        EventController (pure logic)                │      │
//! │  │  SensorState · edge classification · stats         │      │
//! │  └────────────────────────────────────────────────────┘      │
//! │                                                              │
//! │  GPIO ISR ──▶ COLLISION_EDGE ──▶ polling loop (500 ms)       │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::{debug, error, info};

use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::Hertz;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::nvs::EspDefaultNvsPartition;

use collision_alert::adapters::gps_sim::SimulatedGps;
use collision_alert::adapters::status_display::StatusPresenter;
use collision_alert::adapters::tcp::TcpNetwork;
use collision_alert::adapters::telemetry::TelemetrySender;
use collision_alert::adapters::text_display::TextDisplay;
use collision_alert::adapters::wifi;
use collision_alert::app::controller::{Collaborators, EventController};
use collision_alert::app::model::Coordinates;
use collision_alert::config;
use collision_alert::drivers::alert::AlertSequencer;
use collision_alert::drivers::collision_sensor::{COLLISION_EDGE, CollisionInput};
use collision_alert::drivers::gpio::{GpioInput, GpioOutput, LedcPwm};
use collision_alert::drivers::hw_init;
use collision_alert::drivers::oled;
use collision_alert::error::Error;
use collision_alert::pins;

/// Polls between periodic stats lines (~1 min at the default cadence).
const STATS_EVERY_POLLS: u64 = 120;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  CollisionAlert v{}                 ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = config::load_build_config().inspect_err(|e| error!("Config rejected: {}", e))?;
    config
        .wifi
        .validate()
        .map_err(Error::from)
        .inspect_err(|e| error!("Config rejected: {}", e))?;
    info!("Config: {:?}", config);

    // ── 3. Peripherals ────────────────────────────────────────
    hw_init::init_peripherals(config.buzzer_freq_hz)
        .map_err(Error::from)
        .inspect_err(|e| error!("HAL init failed: {}", e))?;
    hw_init::init_isr_service()
        .map_err(Error::from)
        .inspect_err(|e| error!("ISR service init failed: {}", e))?;

    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    // ── 4. WiFi (startup aborts without it) ───────────────────
    let _wifi = wifi::connect_station(&config.wifi, peripherals.modem, sysloop, nvs)
        .map_err(Error::from)
        .inspect_err(|e| error!("Startup aborted: {}", e))?;

    // ── 5. Status display ─────────────────────────────────────
    let i2c_config = I2cConfig::new().baudrate(Hertz(pins::I2C_FREQ_HZ));
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio15,
        peripherals.pins.gpio14,
        &i2c_config,
    )?;
    let panel = oled::open(i2c)
        .map_err(Error::from)
        .inspect_err(|e| error!("Display init failed: {}", e))?;
    info!(
        "Display: SSD1306 on I2C (SDA=GPIO{}, SCL=GPIO{})",
        pins::I2C_SDA_GPIO,
        pins::I2C_SCL_GPIO
    );

    // ── 6. Controller ─────────────────────────────────────────
    // SAFETY: esp_random has no preconditions once the RF subsystem is up.
    let seed = unsafe { esp_idf_sys::esp_random() };
    let reference = Coordinates::new(config.reference_latitude, config.reference_longitude);

    let io = Collaborators {
        sensor: CollisionInput::new(
            GpioInput::new(pins::COLLISION_SENSOR_GPIO),
            config.sensor_active_low,
        ),
        alert: AlertSequencer::new(
            LedcPwm::new(hw_init::LEDC_CH_BUZZER),
            GpioOutput::new(pins::LED_GPIO),
            FreeRtos,
            &config,
        ),
        status: StatusPresenter::new(TextDisplay::new(panel), config.display_line_height_px),
        telemetry: TelemetrySender::new(TcpNetwork::new(), config.telemetry.clone()),
        location: SimulatedGps::new(reference, seed),
    };
    let mut controller = EventController::new(&config, &COLLISION_EDGE, io);
    controller.start();

    info!("System ready. Polling every {} ms.", config.poll_interval_ms);

    // ── 7. Polling loop ───────────────────────────────────────
    loop {
        controller.reconcile();

        let stats = controller.stats();
        if stats.polls % STATS_EVERY_POLLS == 0 {
            debug!(
                "STATS | state={:?} polls={} transitions={} glitches={} read_failures={} cancelled={} telem_sent={} telem_failed={}",
                controller.state(),
                stats.polls,
                stats.transitions,
                stats.glitches_suppressed,
                stats.read_failures,
                stats.alerts_cancelled,
                controller.collaborators().telemetry.sent(),
                controller.collaborators().telemetry.failed(),
            );
        }

        FreeRtos::delay_ms(config.poll_interval_ms);
    }
}
