//! Request-Parser: HTTP Request-Zeile → `FanCommand`
//!
//! Die Erkennung ist bewusst locker: jedes Muster wird als Teilstring in der
//! ersten Zeile des Requests gesucht, das erste Treffer-Muster gewinnt.
//! Arbeitet direkt auf Bytes, damit beliebige (auch ungültige UTF-8) Eingaben
//! nie zu einem Panic führen.

use crate::types::FanCommand;

/// Präfix des Geschwindigkeits-Kommandos, danach folgen die Ziffern
const SPEED_PATTERN: &[u8] = b"GET /fan_speed=";

/// Wie ein Muster in ein Kommando übersetzt wird
#[derive(Clone, Copy)]
enum Action {
    Fixed(FanCommand),
    ParseSpeed,
}

/// Muster in Prioritäts-Reihenfolge (erster Treffer gewinnt)
const PATTERNS: [(&[u8], Action); 6] = [
    (b"GET /fan_on", Action::Fixed(FanCommand::SetPowerOn)),
    (b"GET /fan_off", Action::Fixed(FanCommand::SetPowerOff)),
    (SPEED_PATTERN, Action::ParseSpeed),
    (b"GET /auto_fan_on", Action::Fixed(FanCommand::SetAutoOn)),
    (b"GET /auto_fan_off", Action::Fixed(FanCommand::SetAutoOff)),
    (b"GET /status", Action::Fixed(FanCommand::StatusQuery)),
];

impl FanCommand {
    /// Übersetzt einen rohen HTTP-Request in ein Kommando
    ///
    /// Nur die Request-Zeile (bis zum ersten `\n`) wird ausgewertet.
    ///
    /// # Beispiele
    ///
    /// ```
    /// # use esp_core::FanCommand;
    /// let cmd = FanCommand::parse(b"GET /fan_speed=120 HTTP/1.1\r\nHost: luefter\r\n\r\n");
    /// assert_eq!(cmd, FanCommand::SetSpeed(120));
    /// ```
    pub fn parse(request: &[u8]) -> Self {
        let line = request_line(request);

        for (pattern, action) in PATTERNS {
            let Some(pos) = find(line, pattern) else {
                continue;
            };
            return match action {
                Action::Fixed(command) => command,
                Action::ParseSpeed => parse_speed(&line[pos + pattern.len()..]),
            };
        }

        FanCommand::Unknown
    }
}

/// Erste Zeile ohne abschließendes `\r`
fn request_line(request: &[u8]) -> &[u8] {
    let line = match request.iter().position(|&b| b == b'\n') {
        Some(end) => &request[..end],
        None => request,
    };
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Position des ersten Vorkommens von `needle` in `haystack`
fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Liest die führenden Dezimalziffern (saturierend, kein Overflow)
fn parse_speed(digits: &[u8]) -> FanCommand {
    let mut value: u32 = 0;
    let mut seen_digit = false;

    for &b in digits.iter().take_while(|b| b.is_ascii_digit()) {
        seen_digit = true;
        value = value.saturating_mul(10).saturating_add(u32::from(b - b'0'));
    }

    if seen_digit {
        FanCommand::SetSpeed(value)
    } else {
        FanCommand::Malformed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_power_commands() {
        assert_eq!(
            FanCommand::parse(b"GET /fan_on HTTP/1.1"),
            FanCommand::SetPowerOn
        );
        assert_eq!(
            FanCommand::parse(b"GET /fan_off HTTP/1.1"),
            FanCommand::SetPowerOff
        );
    }

    #[test]
    fn test_parse_auto_commands() {
        assert_eq!(
            FanCommand::parse(b"GET /auto_fan_on HTTP/1.1"),
            FanCommand::SetAutoOn
        );
        assert_eq!(
            FanCommand::parse(b"GET /auto_fan_off HTTP/1.1"),
            FanCommand::SetAutoOff
        );
    }

    #[test]
    fn test_parse_speed() {
        assert_eq!(
            FanCommand::parse(b"GET /fan_speed=120 HTTP/1.1"),
            FanCommand::SetSpeed(120)
        );
        // Ziffern enden am ersten Nicht-Ziffer-Zeichen (wie atoi)
        assert_eq!(
            FanCommand::parse(b"GET /fan_speed=42abc HTTP/1.1"),
            FanCommand::SetSpeed(42)
        );
    }

    #[test]
    fn test_parse_speed_without_digits_is_malformed() {
        assert_eq!(
            FanCommand::parse(b"GET /fan_speed= HTTP/1.1"),
            FanCommand::Malformed
        );
        assert_eq!(
            FanCommand::parse(b"GET /fan_speed=-5 HTTP/1.1"),
            FanCommand::Malformed
        );
        assert_eq!(FanCommand::parse(b"GET /fan_speed="), FanCommand::Malformed);
    }

    #[test]
    fn test_parse_speed_saturates() {
        assert_eq!(
            FanCommand::parse(b"GET /fan_speed=99999999999999999999 HTTP/1.1"),
            FanCommand::SetSpeed(u32::MAX)
        );
    }

    #[test]
    fn test_parse_status_and_unknown() {
        assert_eq!(
            FanCommand::parse(b"GET /status HTTP/1.1"),
            FanCommand::StatusQuery
        );
        assert_eq!(
            FanCommand::parse(b"GET /favicon.ico HTTP/1.1"),
            FanCommand::Unknown
        );
        assert_eq!(FanCommand::parse(b""), FanCommand::Unknown);
    }

    #[test]
    fn test_parse_only_request_line() {
        let request = b"GET / HTTP/1.1\r\nReferer: http://luefter/fan_on\r\nX: GET /fan_on\r\n\r\n";
        assert_eq!(FanCommand::parse(request), FanCommand::Unknown);
    }

    #[test]
    fn test_parse_substring_first_match_wins() {
        // Query-String enthält ein späteres Muster - das frühere gewinnt
        assert_eq!(
            FanCommand::parse(b"GET /fan_off?next=GET /fan_on HTTP/1.1"),
            FanCommand::SetPowerOn
        );
        // Teilstring irgendwo in der Zeile
        assert_eq!(
            FanCommand::parse(b"xxGET /auto_fan_off HTTP/1.1"),
            FanCommand::SetAutoOff
        );
    }

    #[test]
    fn test_parse_requires_get() {
        assert_eq!(
            FanCommand::parse(b"POST /fan_on HTTP/1.1"),
            FanCommand::Unknown
        );
    }

    #[test]
    fn test_parse_invalid_utf8() {
        assert_eq!(
            FanCommand::parse(&[0xff, 0xfe, b'G', b'E', b'T', 0x80]),
            FanCommand::Unknown
        );
        assert_eq!(
            FanCommand::parse(b"GET /fan_speed=7\xff\xfe HTTP/1.1"),
            FanCommand::SetSpeed(7)
        );
    }
}
