//! Alert sequencer: buzzer tone + blinking LED for a bounded time.
//!
//! The buzzer is a passive piezo on a PWM channel; the LED is a plain
//! digital output.  Blink timing comes from an `embedded-hal` delay, so
//! elapsed time is counted in blink cycles rather than read from a clock:
//! a cycle starts only while `elapsed < budget`.
//!
//! ## Release guarantee
//!
//! `run_alert` acquires both outputs through [`ActiveAlert`], whose `Drop`
//! switches them off on every exit path, unwinding included.
//!
//! Write failures are logged and ignored.

use core::time::Duration;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{Error as _, OutputPin};
use embedded_hal::pwm::{Error as _, SetDutyCycle};
use log::{debug, warn};

use crate::app::model::AlertOutcome;
use crate::app::ports::AlertPort;
use crate::config::SystemConfig;

pub struct AlertSequencer<B, L, D> {
    buzzer: B,
    led: L,
    delay: D,
    half_period_ms: u32,
    tone_duty_percent: u8,
    sounding: bool,
}

impl<B, L, D> AlertSequencer<B, L, D>
where
    B: SetDutyCycle,
    L: OutputPin,
    D: DelayNs,
{
    pub fn new(buzzer: B, led: L, delay: D, config: &SystemConfig) -> Self {
        Self {
            buzzer,
            led,
            delay,
            half_period_ms: config.blink_half_period_ms,
            tone_duty_percent: config.buzzer_duty_percent,
            sounding: false,
        }
    }

    /// Whether an alert currently holds the outputs.
    pub fn is_sounding(&self) -> bool {
        self.sounding
    }

    fn set_tone(&mut self, on: bool) {
        let result = if on {
            self.buzzer.set_duty_cycle_percent(self.tone_duty_percent)
        } else {
            self.buzzer.set_duty_cycle_fully_off()
        };
        if let Err(e) = result {
            warn!("buzzer PWM write failed: {:?}", e.kind());
        }
    }

    fn set_led(&mut self, on: bool) {
        let result = if on { self.led.set_high() } else { self.led.set_low() };
        if let Err(e) = result {
            warn!("alert LED write failed: {:?}", e.kind());
        }
    }

    fn release(&mut self) {
        self.set_tone(false);
        self.set_led(false);
        self.sounding = false;
    }
}

impl<B, L, D> AlertPort for AlertSequencer<B, L, D>
where
    B: SetDutyCycle,
    L: OutputPin,
    D: DelayNs,
{
    fn run_alert(&mut self, budget: Duration, cancel: &mut dyn FnMut() -> bool) -> AlertOutcome {
        let budget_ms = u32::try_from(budget.as_millis()).unwrap_or(u32::MAX);
        let cycle_ms = self.half_period_ms.saturating_mul(2);
        let mut alert = ActiveAlert::acquire(self);
        let mut elapsed_ms: u32 = 0;

        while elapsed_ms < budget_ms {
            if cancel() {
                return AlertOutcome::Cancelled { elapsed_ms };
            }
            alert.blink_once();
            elapsed_ms = elapsed_ms.saturating_add(cycle_ms);
        }

        debug!("alert ran {} ms", elapsed_ms);
        AlertOutcome::Completed
    }

    fn stop(&mut self) {
        self.release();
    }
}

/// Scoped ownership of buzzer + LED for one alert run.
struct ActiveAlert<'a, B, L, D>
where
    B: SetDutyCycle,
    L: OutputPin,
    D: DelayNs,
{
    seq: &'a mut AlertSequencer<B, L, D>,
}

impl<'a, B, L, D> ActiveAlert<'a, B, L, D>
where
    B: SetDutyCycle,
    L: OutputPin,
    D: DelayNs,
{
    fn acquire(seq: &'a mut AlertSequencer<B, L, D>) -> Self {
        seq.sounding = true;
        seq.set_tone(true);
        Self { seq }
    }

    fn blink_once(&mut self) {
        let half = self.seq.half_period_ms;
        self.seq.set_led(true);
        self.seq.delay.delay_ms(half);
        self.seq.set_led(false);
        self.seq.delay.delay_ms(half);
    }
}

impl<B, L, D> Drop for ActiveAlert<'_, B, L, D>
where
    B: SetDutyCycle,
    L: OutputPin,
    D: DelayNs,
{
    fn drop(&mut self) {
        self.seq.release();
    }
}
