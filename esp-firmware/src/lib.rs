// Library-Root: Wiederverwendbare Logik und Module
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

use core::cell::RefCell;

// Module
pub mod config;
pub mod hal;
pub mod tasks;

// Re-exports von esp-core
pub use esp_core::{
    ActuatorAdapter, DeviceState, FanCommand, FanController, FanState, SensorAdapter,
    SmartLedWriter,
};

// Embassy Sync-Typen
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

// ============================================================================
// Type-Aliase für geteilte Zustände
// ============================================================================

/// Der eine FanController der Firmware
///
/// HTTP-Task (Kommandos + Rendern) und Control-Task (Sensor-Tick) greifen
/// über kurze, synchrone Critical Sections zu. Kommando und Rendern laufen
/// im selben Lock, daher spiegelt jede Antwort ihr eigenes Kommando wider.
pub type SharedController = Mutex<CriticalSectionRawMutex, RefCell<FanController>>;

/// Signal: Netzwerk hat eine IP-Adresse (DHCP-Task → Status-LED-Task)
pub type NetworkReadySignal = Signal<CriticalSectionRawMutex, ()>;

/// Erstellt den geteilten Controller im Startzustand
pub const fn new_shared_controller() -> SharedController {
    Mutex::new(RefCell::new(FanController::new()))
}
