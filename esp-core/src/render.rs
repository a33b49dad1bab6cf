//! Response-Renderer: `DeviceState` → HTTP-Antwort
//!
//! Der Body wird pro Request frisch in einen `heapless::String<N>` geschrieben.
//! `N` ist die feste Obergrenze; passt die Seite nicht hinein, gibt es
//! `RenderError::BufferFull` statt abgeschnittener Ausgabe.

use core::fmt::Write;

use heapless::String;

use crate::types::DeviceState;

/// Body-Obergrenze auf dem Gerät in Bytes
pub const HTML_BUFFER_SIZE: usize = 4096;

/// Obergrenze für Status-Zeile + Header
pub const HEAD_BUFFER_SIZE: usize = 128;

pub const CONTENT_TYPE_HTML: &str = "text/html";
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Antwort wenn das Rendern fehlschlägt
pub const INTERNAL_ERROR_RESPONSE: &[u8] = b"HTTP/1.1 500 Internal Server Error\r\n\
Content-Type: text/plain\r\n\
Content-Length: 21\r\n\
Connection: close\r\n\
\r\n\
Internal Server Error";

/// Fehler beim Rendern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderError {
    /// Ausgabe größer als der Buffer
    BufferFull,
}

impl From<core::fmt::Error> for RenderError {
    fn from(_: core::fmt::Error) -> Self {
        RenderError::BufferFull
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for RenderError {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "BufferFull")
    }
}

/// Fertige HTTP-Antwort (immer `200 OK`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse<const N: usize> {
    pub content_type: &'static str,
    pub body: String<N>,
}

impl<const N: usize> HttpResponse<N> {
    /// Status-Zeile und Header inklusive Leerzeile
    pub fn head(&self) -> Result<String<HEAD_BUFFER_SIZE>, RenderError> {
        let mut head = String::new();
        write!(
            head,
            "HTTP/1.1 200 OK\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            self.content_type,
            self.body.len()
        )?;
        Ok(head)
    }
}

// ============================================================================
// HTML-Bausteine
// ============================================================================

const PAGE_START: &str = "<!DOCTYPE html><html><head><meta charset=\"utf-8\">\
<title>L&uuml;ftersteuerung</title><style>\
body{font-family:Arial;text-align:center;margin-top:50px;}\
button,input[type='range']{font-size:20px;margin:10px;}\
</style>";

const MANUAL_SCRIPT_START: &str = "<script>let selectedSpeed=";

const MANUAL_SCRIPT_END: &str = ";\
function setSpeed(v){selectedSpeed=v;document.getElementById('speed_display').innerText=v;}\
function sendSpeed(){fetch('/fan_speed='+selectedSpeed);alert('Geschwindigkeit gesendet: '+selectedSpeed);}\
</script>";

const AUTO_SCRIPT: &str = "<script>\
function werteAktualisieren(){fetch('/status').then(r=>r.json()).then(d=>{\
document.getElementById('temp_display').innerText=d.temp.toFixed(1);\
document.getElementById('speed_display').innerText=d.speed;\
});}\
</script>";

const BODY_START: &str = "</head><body><h1>L&uuml;ftersteuerung</h1>";

const POWER_FORMS: &str = "<form action=\"/fan_on\"><button>L&uuml;fter einschalten</button></form>\
<form action=\"/fan_off\"><button>L&uuml;fter ausschalten</button></form>";

const AUTO_ON_FORM: &str =
    "<form action=\"/auto_fan_on\"><button>Automatik aktivieren</button></form>";

const AUTO_OFF_FORM: &str =
    "<form action=\"/auto_fan_off\"><button>Automatik deaktivieren</button></form>";

const SEND_BUTTON: &str =
    "<button onclick=\"sendSpeed()\" type=\"button\">Geschwindigkeit senden</button>";

// Ohne JSON-Endpoint lädt der Button einfach die ganze Seite neu
#[cfg(feature = "serde")]
const REFRESH_CONTROL: &str =
    "<button onclick=\"werteAktualisieren()\" type=\"button\">Werte aktualisieren</button>";
#[cfg(not(feature = "serde"))]
const REFRESH_CONTROL: &str =
    "<form action=\"/status\"><button>Werte aktualisieren</button></form>";

const PAGE_END: &str = "</body></html>";

fn power_label(state: &DeviceState) -> &'static str {
    if state.power { "Ein" } else { "Aus" }
}

/// Rendert die Steuerseite passend zum Modus
///
/// - Manuell: Slider für die Geschwindigkeit + Automatik-Schalter
/// - Automatik: Temperatur + Geschwindigkeit + Rückweg in den manuellen Modus
///
/// Verändert den Zustand nicht.
pub fn render_page<const N: usize>(state: &DeviceState) -> Result<String<N>, RenderError> {
    let mut html = String::new();
    if state.is_auto() {
        render_auto(&mut html, state)?;
    } else {
        render_manual(&mut html, state)?;
    }
    Ok(html)
}

fn render_manual<const N: usize>(
    html: &mut String<N>,
    state: &DeviceState,
) -> Result<(), RenderError> {
    html.write_str(PAGE_START)?;
    write!(html, "{}{}{}", MANUAL_SCRIPT_START, state.speed, MANUAL_SCRIPT_END)?;
    html.write_str(BODY_START)?;
    write!(
        html,
        "<p>Zustand: {}</p><p>Automatikmodus: Deaktiviert</p>",
        power_label(state)
    )?;
    html.write_str(POWER_FORMS)?;
    html.write_str(AUTO_ON_FORM)?;
    write!(
        html,
        "<p>Geschwindigkeit: <span id='speed_display'>{speed}</span></p>\
<input type=\"range\" min=\"0\" max=\"255\" value=\"{speed}\" oninput=\"setSpeed(this.value)\"><br>",
        speed = state.speed
    )?;
    html.write_str(SEND_BUTTON)?;
    html.write_str(PAGE_END)?;
    Ok(())
}

fn render_auto<const N: usize>(
    html: &mut String<N>,
    state: &DeviceState,
) -> Result<(), RenderError> {
    html.write_str(PAGE_START)?;
    html.write_str(AUTO_SCRIPT)?;
    html.write_str(BODY_START)?;
    write!(
        html,
        "<p>Zustand: {}</p><p>Automatikmodus: Aktiviert</p>",
        power_label(state)
    )?;
    html.write_str(POWER_FORMS)?;
    html.write_str(AUTO_OFF_FORM)?;
    write!(
        html,
        "<p>Simulierte Temperatur: <b><span id='temp_display'>{:.1}</span> &deg;C</b></p>\
<p>Automatische Geschwindigkeit: <span id='speed_display'>{}</span></p>",
        state.last_temperature_estimate, state.speed
    )?;
    html.write_str(REFRESH_CONTROL)?;
    html.write_str(PAGE_END)?;
    Ok(())
}

/// Rendert `{"power":..,"auto":..,"speed":..,"temp":..}` für `/status`
#[cfg(feature = "serde")]
pub fn render_status_json<const N: usize>(state: &DeviceState) -> Result<String<N>, RenderError> {
    use crate::types::StatusReport;

    let report = StatusReport::from_state(state);

    // Zwischenbuffer: serde-json-core schreibt in einen Slice
    let mut buffer = [0u8; 96];
    let n = serde_json_core::to_slice(&report, &mut buffer).map_err(|_| RenderError::BufferFull)?;
    let json = core::str::from_utf8(&buffer[..n]).map_err(|_| RenderError::BufferFull)?;

    let mut out = String::new();
    out.write_str(json)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FanMode;

    fn manual(power: bool, speed: u8) -> DeviceState {
        DeviceState {
            power,
            speed,
            ..DeviceState::new()
        }
    }

    #[test]
    fn test_render_manual_page() {
        let html: String<HTML_BUFFER_SIZE> = render_page(&manual(true, 120)).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<p>Zustand: Ein</p>"));
        assert!(html.contains("Automatikmodus: Deaktiviert"));
        assert!(html.contains("<span id='speed_display'>120</span>"));
        assert!(html.contains("value=\"120\""));
        assert!(html.contains("action=\"/auto_fan_on\""));
        assert!(!html.contains("temp_display"));
        assert!(html.ends_with("</body></html>"));
    }

    #[test]
    fn test_render_auto_page() {
        let state = DeviceState {
            power: true,
            mode: FanMode::Automatic,
            speed: 128,
            last_temperature_estimate: 25.098,
        };
        let html: String<HTML_BUFFER_SIZE> = render_page(&state).unwrap();
        assert!(html.contains("Automatikmodus: Aktiviert"));
        assert!(html.contains("<span id='temp_display'>25.1</span>"));
        assert!(html.contains("<span id='speed_display'>128</span>"));
        assert!(html.contains("action=\"/auto_fan_off\""));
        assert!(!html.contains("type=\"range\""));
    }

    #[test]
    fn test_render_is_ascii() {
        let html: String<HTML_BUFFER_SIZE> = render_page(&manual(false, 0)).unwrap();
        assert!(html.is_ascii());
    }

    #[test]
    fn test_render_buffer_full() {
        let result: Result<String<64>, _> = render_page(&manual(false, 0));
        assert_eq!(result, Err(RenderError::BufferFull));
    }

    #[test]
    fn test_head() {
        let mut body: String<16> = String::new();
        body.write_str("hallo").unwrap();
        let response = HttpResponse {
            content_type: CONTENT_TYPE_HTML,
            body,
        };
        assert_eq!(
            response.head().unwrap().as_str(),
            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 5\r\nConnection: close\r\n\r\n"
        );
    }

    #[test]
    fn test_internal_error_length() {
        let body_start = INTERNAL_ERROR_RESPONSE
            .windows(4)
            .position(|w| w == b"\r\n\r\n")
            .unwrap()
            + 4;
        assert_eq!(INTERNAL_ERROR_RESPONSE.len() - body_start, 21);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_render_status_json() {
        let state = DeviceState {
            power: true,
            mode: FanMode::Automatic,
            speed: 128,
            last_temperature_estimate: 25.098,
        };
        let json: String<128> = render_status_json(&state).unwrap();
        assert_eq!(
            json.as_str(),
            "{\"power\":true,\"auto\":true,\"speed\":128,\"temp\":25.1}"
        );
    }
}
