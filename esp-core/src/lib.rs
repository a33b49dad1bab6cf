//! ESP Core - Platform-agnostic Logic and Traits
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert nur Traits, den Gerätezustand und Pure Functions.

#![no_std]

pub mod controller;
pub mod logic;
pub mod parser;
pub mod render;
pub mod traits;
pub mod types;

// Re-exports für einfachen Zugriff
pub use controller::FanController;
pub use logic::{
    ControlError, clamp_speed, compute_pwm_output, control_tick, sample_to_speed, status_color,
    temperature_estimate,
};
pub use render::{HTML_BUFFER_SIZE, HttpResponse, INTERNAL_ERROR_RESPONSE, RenderError, render_page};
pub use traits::{
    ActuatorAdapter, ActuatorError, LedError, SensorAdapter, SensorError, SmartLedWriter,
};
pub use types::{DeviceState, FanCommand, FanMode, FanState, PwmOutput, StatusReport};

#[cfg(feature = "serde")]
pub use render::render_status_json;
