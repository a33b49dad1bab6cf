// Task-Modul: Enthält alle Embassy Tasks
//
// Jeder Task läuft asynchron und unabhängig.
// Geteilt wird nur der FanController (Mutex) und das Netzwerk-Ready-Signal.

pub mod button;
pub mod control;
pub mod http;
pub mod status_led;
pub mod wifi;

// Re-export Tasks für einfachen Import
pub use button::maintenance_button_task;
pub use control::control_task;
pub use http::http_server_task;
pub use status_led::status_led_task;
pub use wifi::{connection_task, dhcp_task, net_task};
