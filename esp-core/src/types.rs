//! Core Types für die Lüfter-Steuerung
//!
//! Datenstrukturen ohne Hardware-Dependencies

/// Betriebs-Modus des Lüfters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FanMode {
    /// Geschwindigkeit kommt vom Browser (Slider)
    #[default]
    Manual,
    /// Geschwindigkeit wird bei jedem Tick aus dem Sensorwert abgeleitet
    Automatic,
}

/// Abgeleiteter Zustand aus `(power, mode)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanState {
    Off,
    OnManual,
    OnAutomatic,
}

/// Gesamter Gerätezustand
///
/// Existiert genau einmal (im `FanController`) und lebt so lange wie die Firmware.
/// Wird nicht persistiert.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceState {
    /// `true` = Lüfter bestromt
    pub power: bool,
    pub mode: FanMode,
    /// Aktuelle Soll-Intensität, immer in [0, 255]
    pub speed: u8,
    /// Simulierte Temperatur in °C, nur im Automatik-Modus aktuell
    pub last_temperature_estimate: f32,
}

impl DeviceState {
    /// Startzustand nach dem Booten: aus, manuell, Geschwindigkeit 0
    pub const fn new() -> Self {
        Self {
            power: false,
            mode: FanMode::Manual,
            speed: 0,
            last_temperature_estimate: 0.0,
        }
    }

    pub fn is_auto(&self) -> bool {
        self.mode == FanMode::Automatic
    }
}

impl Default for DeviceState {
    fn default() -> Self {
        Self::new()
    }
}

/// Kommando aus einer HTTP-Request-Zeile
///
/// Wird vom Request-Parser erzeugt und auf den `DeviceState` angewendet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanCommand {
    /// `GET /fan_on`
    SetPowerOn,
    /// `GET /fan_off` (setzt auch die Geschwindigkeit auf 0)
    SetPowerOff,
    /// `GET /fan_speed=<n>`, `n` ungeklemmt (Klemmung passiert beim Zuweisen)
    SetSpeed(u32),
    /// `GET /auto_fan_on`
    SetAutoOn,
    /// `GET /auto_fan_off`
    SetAutoOff,
    /// `GET /status` - keine Zustandsänderung
    StatusQuery,
    /// `GET /fan_speed=` ohne Ziffern - keine Zustandsänderung
    Malformed,
    /// Nichts erkannt - keine Zustandsänderung
    Unknown,
}

/// PWM-Konfiguration für den Aktor
///
/// - `wrap`: Periodenlänge in PWM-Ticks (Zählerendwert)
/// - `duty`: Anzahl Ticks pro Periode, in denen der Ausgang aktiv ist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PwmOutput {
    pub wrap: u32,
    pub duty: u32,
}

/// Momentaufnahme für den `/status` JSON-Endpoint
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StatusReport {
    pub power: bool,
    pub auto: bool,
    pub speed: u8,
    /// Temperatur, auf eine Nachkommastelle gerundet
    pub temp: f32,
}

impl StatusReport {
    pub fn from_state(state: &DeviceState) -> Self {
        // Auf Zehntel runden ohne libm (f32::round gibt es in no_std nicht)
        let tenths = (state.last_temperature_estimate * 10.0 + 0.5) as u32;
        Self {
            power: state.power,
            auto: state.is_auto(),
            speed: state.speed,
            temp: tenths as f32 / 10.0,
        }
    }
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for FanMode {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            FanMode::Manual => defmt::write!(fmt, "Manuell"),
            FanMode::Automatic => defmt::write!(fmt, "Auto"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for FanState {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            FanState::Off => defmt::write!(fmt, "Off"),
            FanState::OnManual => defmt::write!(fmt, "OnManual"),
            FanState::OnAutomatic => defmt::write!(fmt, "OnAutomatic"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DeviceState {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "DeviceState {{ power: {}, mode: {}, speed: {}, temp: {} }}",
            self.power,
            self.mode,
            self.speed,
            self.last_temperature_estimate
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for FanCommand {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            FanCommand::SetPowerOn => defmt::write!(fmt, "SetPowerOn"),
            FanCommand::SetPowerOff => defmt::write!(fmt, "SetPowerOff"),
            FanCommand::SetSpeed(n) => defmt::write!(fmt, "SetSpeed({})", n),
            FanCommand::SetAutoOn => defmt::write!(fmt, "SetAutoOn"),
            FanCommand::SetAutoOff => defmt::write!(fmt, "SetAutoOff"),
            FanCommand::StatusQuery => defmt::write!(fmt, "StatusQuery"),
            FanCommand::Malformed => defmt::write!(fmt, "Malformed"),
            FanCommand::Unknown => defmt::write!(fmt, "Unknown"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PwmOutput {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "PwmOutput {{ wrap: {}, duty: {} }}", self.wrap, self.duty)
    }
}
