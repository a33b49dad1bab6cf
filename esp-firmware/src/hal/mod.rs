// Hardware Abstraction Layer (HAL) Module
//
// Dieses Modul kapselt Hardware-Zugriffe hinter den Traits aus esp-core,
// damit die Regel-Logik ohne Hardware testbar bleibt.

pub mod fan_output;
pub mod led_writer;
pub mod sensor;

pub use fan_output::McpwmFanOutput;
pub use led_writer::RmtLedWriter;
pub use sensor::AdcSensor;
