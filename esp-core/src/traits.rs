//! Hardware Abstraction Traits
//!
//! Diese Traits definieren Schnittstellen für Hardware-Zugriff
//! ohne konkrete Implementierung.

use rgb::RGB8;

/// Fehler-Typ für Sensor-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    ReadFailed,
}

/// Fehler-Typ für Aktor-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// `wrap`/`duty` passen nicht in die Register der Hardware
    OutOfRange,
    WriteFailed,
}

/// Fehler-Typ für LED-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedError {
    WriteFailed,
}

/// Trait für den analogen Sensor
///
/// # Implementierungen
/// - **Production:** AdcSensor (ESP32-C6 ADC1, 12 Bit)
/// - **Testing:** MockSensor (feste Werte)
pub trait SensorAdapter {
    /// Liest einen Rohwert (kurz blockierend erlaubt)
    fn read_raw_sample(&mut self) -> Result<u16, SensorError>;

    /// Größter möglicher Rohwert
    ///
    /// Der Aktor-Mapper leitet daraus den Teiler auf [0, 255] ab.
    fn full_scale(&self) -> u16 {
        4095
    }
}

/// Trait für den PWM-Ausgang (Lüfter / Buzzer)
///
/// # Implementierungen
/// - **Production:** McpwmFanOutput (ESP32-C6 MCPWM0, 10 MHz Takt)
/// - **Testing:** MockActuator (zeichnet Aufrufe auf)
pub trait ActuatorAdapter {
    /// Setzt Periodenlänge (`wrap`) und aktive Ticks (`duty`)
    fn set_output(&mut self, wrap: u32, duty: u32) -> Result<(), ActuatorError>;
}

/// Trait für SmartLED Hardware-Zugriff
///
/// Abstrahiert den Zugriff auf RGB LEDs (WS2812/Neopixel).
///
/// # Implementierungen
/// - **Production:** RmtLedWriter (ESP32 RMT Peripheral)
/// - **Testing:** MockLedWriter (in-memory Mock)
pub trait SmartLedWriter: Send {
    /// Schreibt eine RGB-Farbe auf die LED
    ///
    /// # Fehlerbehandlung
    /// Gibt `LedError::WriteFailed` zurück wenn Hardware-Zugriff fehlschlägt
    fn write(&mut self, color: RGB8) -> Result<(), LedError>;
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for SensorError {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "ReadFailed")
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ActuatorError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            ActuatorError::OutOfRange => defmt::write!(fmt, "OutOfRange"),
            ActuatorError::WriteFailed => defmt::write!(fmt, "WriteFailed"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for LedError {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "WriteFailed")
    }
}
