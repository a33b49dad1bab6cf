// Lüfter/Buzzer-Ausgang über MCPWM0
//
// Der Peripherie-Takt wird auf 10 MHz geteilt, dadurch ist `wrap` direkt die
// Timer-Periode in Ticks und `duty` der Compare-Wert des Operators.

use esp_core::{ActuatorAdapter, ActuatorError};
use esp_hal::mcpwm::PeripheralClockConfig;
use esp_hal::mcpwm::operator::PwmPin;
use esp_hal::mcpwm::timer::{PwmWorkingMode, Timer};
use esp_hal::peripherals::MCPWM0;

/// PWM-Ausgang für Lüfter/Buzzer
///
/// Die Periode wird nur neu programmiert wenn sich `wrap` ändert, damit der
/// 100 ms Regel-Tick keine Glitches am Ausgang erzeugt.
pub struct McpwmFanOutput<'d> {
    timer: Timer<0, MCPWM0<'d>>,
    pin: PwmPin<'d, MCPWM0<'d>, 0, true>,
    clock: PeripheralClockConfig,
    current_wrap: Option<u16>,
}

impl<'d> McpwmFanOutput<'d> {
    /// # Parameter
    /// - `timer`: MCPWM0 Timer 0 (Operator 0 muss bereits daran gebunden sein)
    /// - `pin`: Ausgang A von Operator 0
    /// - `clock`: Peripherie-Takt (10 MHz, siehe `config::PWM_CLOCK_MHZ`)
    pub fn new(
        timer: Timer<0, MCPWM0<'d>>,
        pin: PwmPin<'d, MCPWM0<'d>, 0, true>,
        clock: PeripheralClockConfig,
    ) -> Self {
        Self {
            timer,
            pin,
            clock,
            current_wrap: None,
        }
    }
}

impl<'d> ActuatorAdapter for McpwmFanOutput<'d> {
    fn set_output(&mut self, wrap: u32, duty: u32) -> Result<(), ActuatorError> {
        // Hardware-Zähler sind 16 Bit breit
        let wrap = u16::try_from(wrap).map_err(|_| ActuatorError::OutOfRange)?;
        let duty = u16::try_from(duty).map_err(|_| ActuatorError::OutOfRange)?;
        if duty > wrap {
            return Err(ActuatorError::OutOfRange);
        }

        if self.current_wrap != Some(wrap) {
            let timer_config =
                self.clock
                    .timer_clock_with_prescaler(wrap, PwmWorkingMode::Increase, 0);
            self.timer.start(timer_config);
            self.current_wrap = Some(wrap);
        }

        self.pin.set_timestamp(duty);
        Ok(())
    }
}
