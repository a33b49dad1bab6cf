//! FanController - Besitzer des `DeviceState`
//!
//! Bündelt Parser, Zustandsautomat, Renderer und Regel-Tick hinter einer
//! Schnittstelle. Die Firmware legt genau eine Instanz hinter einen Mutex.

use rgb::RGB8;

use crate::logic::{ControlError, control_tick, status_color};
use crate::render::{CONTENT_TYPE_HTML, HttpResponse, RenderError, render_page};
use crate::traits::{ActuatorAdapter, SensorAdapter};
use crate::types::{DeviceState, FanCommand, PwmOutput};

#[derive(Debug, Default)]
pub struct FanController {
    state: DeviceState,
}

impl FanController {
    pub const fn new() -> Self {
        Self {
            state: DeviceState::new(),
        }
    }

    /// Controller mit vorgegebenem Zustand (für Tests)
    pub const fn with_state(state: DeviceState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    /// Verarbeitet einen rohen HTTP-Request
    ///
    /// Das Kommando wird sofort angewendet, die Antwort danach aus dem neuen
    /// Zustand gerendert. Unbekannte oder kaputte Requests ändern nichts und
    /// bekommen trotzdem die normale Seite.
    pub fn handle_request<const N: usize>(
        &mut self,
        request: &[u8],
    ) -> Result<(FanCommand, HttpResponse<N>), RenderError> {
        let command = FanCommand::parse(request);
        self.state.apply(command);
        let response = self.render(command)?;
        Ok((command, response))
    }

    /// Antwort für ein Kommando, ohne den Zustand zu verändern
    pub fn render<const N: usize>(&self, command: FanCommand) -> Result<HttpResponse<N>, RenderError> {
        match command {
            FanCommand::StatusQuery => self.status_response(),
            _ => self.page_response(),
        }
    }

    fn page_response<const N: usize>(&self) -> Result<HttpResponse<N>, RenderError> {
        Ok(HttpResponse {
            content_type: CONTENT_TYPE_HTML,
            body: render_page(&self.state)?,
        })
    }

    #[cfg(feature = "serde")]
    fn status_response<const N: usize>(&self) -> Result<HttpResponse<N>, RenderError> {
        Ok(HttpResponse {
            content_type: crate::render::CONTENT_TYPE_JSON,
            body: crate::render::render_status_json(&self.state)?,
        })
    }

    // Ohne serde gibt es keinen JSON-Endpoint, `/status` liefert die Seite
    #[cfg(not(feature = "serde"))]
    fn status_response<const N: usize>(&self) -> Result<HttpResponse<N>, RenderError> {
        self.page_response()
    }

    /// Ein Regel-Tick (siehe `control_tick`)
    pub fn tick<S: SensorAdapter, A: ActuatorAdapter>(
        &mut self,
        sensor: &mut S,
        actuator: &mut A,
    ) -> Result<PwmOutput, ControlError> {
        control_tick(&mut self.state, sensor, actuator)
    }

    /// Farbe der Status-LED für den aktuellen Zustand
    pub fn status_color(&self) -> RGB8 {
        status_color(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::HTML_BUFFER_SIZE;
    use crate::types::FanMode;

    #[test]
    fn test_handle_request_read_after_write() {
        let mut controller = FanController::new();
        let (cmd, response) = controller
            .handle_request::<HTML_BUFFER_SIZE>(b"GET /fan_speed=77 HTTP/1.1\r\n\r\n")
            .unwrap();
        assert_eq!(cmd, FanCommand::SetSpeed(77));
        assert_eq!(response.content_type, CONTENT_TYPE_HTML);
        assert!(response.body.contains("value=\"77\""));
    }

    #[test]
    fn test_handle_request_unknown_still_renders() {
        let mut controller = FanController::new();
        let (cmd, response) = controller
            .handle_request::<HTML_BUFFER_SIZE>(b"GET /favicon.ico HTTP/1.1\r\n\r\n")
            .unwrap();
        assert_eq!(cmd, FanCommand::Unknown);
        assert_eq!(*controller.state(), DeviceState::new());
        assert!(response.body.contains("<p>Zustand: Aus</p>"));
    }

    #[test]
    fn test_render_error_keeps_command_effect() {
        let mut controller = FanController::new();
        let result = controller.handle_request::<32>(b"GET /auto_fan_on HTTP/1.1");
        assert_eq!(result, Err(RenderError::BufferFull));
        assert_eq!(controller.state().mode, FanMode::Automatic);
    }
}
