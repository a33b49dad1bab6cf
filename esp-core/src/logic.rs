//! Pure Business Logic Functions
//!
//! Zustandsautomat und PWM-Mapping ohne Hardware-Dependencies (testbar!)

use rgb::RGB8;

use crate::traits::{ActuatorAdapter, ActuatorError, SensorAdapter, SensorError};
use crate::types::{DeviceState, FanCommand, FanMode, FanState, PwmOutput};

/// Höchste Lüfter-Geschwindigkeit
pub const MAX_SPEED: u8 = 255;

/// PWM-Takt in Hz: `wrap` wird in Ticks dieses Taktes angegeben
pub const PWM_TICK_HZ: u32 = 10_000_000;

/// Frequenz bei Geschwindigkeit 0 in Hz
pub const BASE_FREQUENCY_HZ: u32 = 300;

/// Frequenz-Zuwachs pro Geschwindigkeits-Stufe in Hz
pub const FREQUENCY_PER_STEP_HZ: u32 = 2;

/// Untergrenze für `wrap` (verhindert entartete Perioden)
pub const MIN_WRAP: u32 = 100;

/// Duty-Cycle = wrap / DUTY_DIVISOR (fest 10 %)
pub const DUTY_DIVISOR: u32 = 10;

/// Temperatur bei voller Geschwindigkeit in °C
pub const TEMPERATURE_FULL_SCALE_C: f32 = 50.0;

/// Helligkeit der Status-LED (0-255), gedimmt für Augenschonung
pub const STATUS_LED_BRIGHTNESS: u8 = 10;

/// Fehler während eines Regel-Ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlError {
    Sensor(SensorError),
    Actuator(ActuatorError),
}

impl From<SensorError> for ControlError {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

impl From<ActuatorError> for ControlError {
    fn from(e: ActuatorError) -> Self {
        Self::Actuator(e)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ControlError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            ControlError::Sensor(e) => defmt::write!(fmt, "Sensor({})", e),
            ControlError::Actuator(e) => defmt::write!(fmt, "Actuator({})", e),
        }
    }
}

// ============================================================================
// Zustandsautomat
// ============================================================================

impl DeviceState {
    /// Abgeleiteter Zustand `Off` / `OnManual` / `OnAutomatic`
    pub fn fan_state(&self) -> FanState {
        match (self.power, self.mode) {
            (false, _) => FanState::Off,
            (true, FanMode::Manual) => FanState::OnManual,
            (true, FanMode::Automatic) => FanState::OnAutomatic,
        }
    }

    /// Wendet ein Kommando an
    ///
    /// Gibt `true` zurück wenn sich der Zustand geändert hat.
    /// `StatusQuery`, `Malformed` und `Unknown` ändern nie etwas.
    pub fn apply(&mut self, command: FanCommand) -> bool {
        let before = *self;

        match command {
            FanCommand::SetPowerOn => self.power = true,
            FanCommand::SetPowerOff => {
                self.power = false;
                self.speed = 0;
            }
            FanCommand::SetSpeed(n) => self.speed = clamp_speed(n),
            FanCommand::SetAutoOn => self.mode = FanMode::Automatic,
            FanCommand::SetAutoOff => self.mode = FanMode::Manual,
            FanCommand::StatusQuery | FanCommand::Malformed | FanCommand::Unknown => {}
        }

        *self != before
    }

    /// Übernimmt einen Sensorwert (nur im Automatik-Modus sinnvoll)
    pub fn update_from_sample(&mut self, raw: u16, full_scale: u16) {
        self.speed = sample_to_speed(raw, full_scale);
        self.last_temperature_estimate = temperature_estimate(self.speed);
    }
}

/// Klemmt eine beliebige Eingabe auf [0, 255]
pub fn clamp_speed(n: u32) -> u8 {
    u8::try_from(n).unwrap_or(MAX_SPEED)
}

// ============================================================================
// Aktor-Mapping
// ============================================================================

/// Normalisiert einen Rohwert aus `[0, full_scale]` auf `[0, 255]`
///
/// Für einen 12-Bit ADC (`full_scale = 4095`) entspricht das `raw / 16`.
/// Werte oberhalb von `full_scale` werden geklemmt.
///
/// ```
/// # use esp_core::sample_to_speed;
/// assert_eq!(sample_to_speed(2048, 4095), 128);
/// assert_eq!(sample_to_speed(4095, 4095), 255);
/// ```
pub fn sample_to_speed(raw: u16, full_scale: u16) -> u8 {
    let raw = u32::from(raw.min(full_scale));
    let span = u32::from(full_scale) + 1;
    clamp_speed(raw * (u32::from(MAX_SPEED) + 1) / span)
}

/// Simulierte Temperatur: `(speed / 255) * 50.0`
pub fn temperature_estimate(speed: u8) -> f32 {
    (f32::from(speed) / f32::from(MAX_SPEED)) * TEMPERATURE_FULL_SCALE_C
}

/// Berechnet `(wrap, duty)` für eine Geschwindigkeit
///
/// - `frequency = 300 + 2 * speed`
/// - `wrap = max(100, 10_000_000 / frequency)`
/// - `duty = wrap / 10`
pub fn compute_pwm_output(speed: u8) -> PwmOutput {
    let frequency = BASE_FREQUENCY_HZ + u32::from(speed) * FREQUENCY_PER_STEP_HZ;
    let wrap = (PWM_TICK_HZ / frequency).max(MIN_WRAP);
    PwmOutput {
        wrap,
        duty: wrap / DUTY_DIVISOR,
    }
}

impl PwmOutput {
    /// Ausgang komplett aus: Duty 0 (Periode wie bei Geschwindigkeit 0)
    pub fn off() -> Self {
        PwmOutput {
            duty: 0,
            ..compute_pwm_output(0)
        }
    }
}

/// Ein Regel-Tick
///
/// 1. Aus → Duty 0
/// 2. An + Automatik → Sensorwert lesen, Geschwindigkeit und Temperatur ableiten
/// 3. PWM berechnen und an den Aktor geben
///
/// Ein Sensorfehler bricht den Tick vor dem Ansteuern ab; der Aktor behält
/// seine letzte Konfiguration.
pub fn control_tick<S: SensorAdapter, A: ActuatorAdapter>(
    state: &mut DeviceState,
    sensor: &mut S,
    actuator: &mut A,
) -> Result<PwmOutput, ControlError> {
    let output = if !state.power {
        PwmOutput::off()
    } else {
        if state.mode == FanMode::Automatic {
            let raw = sensor.read_raw_sample()?;
            state.update_from_sample(raw, sensor.full_scale());
        }
        compute_pwm_output(state.speed)
    };

    actuator.set_output(output.wrap, output.duty)?;
    Ok(output)
}

/// Farbe der Status-LED je nach Lüfter-Zustand
///
/// - Aus: Blau (Server aktiv, Lüfter steht)
/// - Manuell: Grün
/// - Automatik: Gelb
pub fn status_color(state: &DeviceState) -> RGB8 {
    let b = STATUS_LED_BRIGHTNESS;
    match state.fan_state() {
        FanState::Off => RGB8 { r: 0, g: 0, b },
        FanState::OnManual => RGB8 { r: 0, g: b, b: 0 },
        FanState::OnAutomatic => RGB8 { r: b, g: b, b: 0 },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_power_on_keeps_mode() {
        let mut state = DeviceState::new();
        state.mode = FanMode::Automatic;
        assert!(state.apply(FanCommand::SetPowerOn));
        assert_eq!(state.fan_state(), FanState::OnAutomatic);
    }

    #[test]
    fn test_apply_power_off_resets_speed() {
        let mut state = DeviceState {
            power: true,
            speed: 200,
            ..DeviceState::new()
        };
        assert!(state.apply(FanCommand::SetPowerOff));
        assert!(!state.power);
        assert_eq!(state.speed, 0);
        assert_eq!(state.fan_state(), FanState::Off);
    }

    #[test]
    fn test_apply_speed_clamps() {
        let mut state = DeviceState::new();
        state.apply(FanCommand::SetSpeed(300));
        assert_eq!(state.speed, 255);
        state.apply(FanCommand::SetSpeed(17));
        assert_eq!(state.speed, 17);
        // Geschwindigkeit ändert weder Modus noch Power
        assert!(!state.power);
        assert_eq!(state.mode, FanMode::Manual);
    }

    #[test]
    fn test_apply_noop_commands() {
        let mut state = DeviceState::new();
        assert!(!state.apply(FanCommand::StatusQuery));
        assert!(!state.apply(FanCommand::Malformed));
        assert!(!state.apply(FanCommand::Unknown));
        assert_eq!(state, DeviceState::new());
    }

    #[test]
    fn test_auto_toggle_independent_of_power() {
        let mut state = DeviceState::new();
        state.apply(FanCommand::SetAutoOn);
        assert_eq!(state.mode, FanMode::Automatic);
        assert_eq!(state.fan_state(), FanState::Off);
        assert!(!state.apply(FanCommand::SetAutoOn));
    }

    #[test]
    fn test_sample_to_speed_12bit() {
        assert_eq!(sample_to_speed(0, 4095), 0);
        assert_eq!(sample_to_speed(15, 4095), 0);
        assert_eq!(sample_to_speed(16, 4095), 1);
        assert_eq!(sample_to_speed(2048, 4095), 128);
        assert_eq!(sample_to_speed(4095, 4095), 255);
        assert_eq!(sample_to_speed(u16::MAX, 4095), 255);
    }

    #[test]
    fn test_sample_to_speed_other_ranges() {
        // 10-Bit Sensor
        assert_eq!(sample_to_speed(1023, 1023), 255);
        assert_eq!(sample_to_speed(512, 1023), 128);
        // 8-Bit Sensor: 1:1
        assert_eq!(sample_to_speed(77, 255), 77);
    }

    #[test]
    fn test_temperature_estimate() {
        assert_eq!(temperature_estimate(0), 0.0);
        assert_eq!(temperature_estimate(255), 50.0);
        let t = temperature_estimate(128);
        assert!(t > 25.09 && t < 25.11);
    }

    #[test]
    fn test_compute_pwm_output() {
        assert_eq!(
            compute_pwm_output(0),
            PwmOutput {
                wrap: 33_333,
                duty: 3_333
            }
        );
        assert_eq!(
            compute_pwm_output(255),
            PwmOutput {
                wrap: 12_345,
                duty: 1_234
            }
        );
        assert_eq!(
            compute_pwm_output(100),
            PwmOutput {
                wrap: 20_000,
                duty: 2_000
            }
        );
    }

    #[test]
    fn test_pwm_off() {
        let off = PwmOutput::off();
        assert_eq!(off.duty, 0);
        assert_eq!(off.wrap, 33_333);
    }

    #[test]
    fn test_status_color() {
        let mut state = DeviceState::new();
        assert_eq!(status_color(&state), RGB8 { r: 0, g: 0, b: 10 });
        state.apply(FanCommand::SetPowerOn);
        assert_eq!(status_color(&state), RGB8 { r: 0, g: 10, b: 0 });
        state.apply(FanCommand::SetAutoOn);
        assert_eq!(status_color(&state), RGB8 { r: 10, g: 10, b: 0 });
    }
}
