// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen
#![allow(dead_code)]

// ============================================================================
// Pin-Zuordnung (ESP32-C6 DevKit)
// ============================================================================
//
// Die Pins selbst werden in main.rs über `peripherals.GPIOx` verdrahtet,
// die Nummern hier dienen als Dokumentation.

/// GPIO-Pin für die RGB Status-LED (WS2812/Neopixel, onboard)
pub const STATUS_LED_GPIO_PIN: u8 = 8;

/// GPIO-Pin für den Lüfter/Buzzer (MCPWM0 Operator 0, Ausgang A)
pub const FAN_PWM_GPIO_PIN: u8 = 4;

/// GPIO-Pin für den analogen Sensor (ADC1 Kanal 2, Joystick-X / Poti)
pub const SENSOR_ADC_GPIO_PIN: u8 = 2;

/// GPIO-Pin für den Wartungs-Button (BOOT-Taster, Strapping-Pin)
pub const MAINTENANCE_BUTTON_GPIO_PIN: u8 = 9;

// ============================================================================
// Status-LED Konfiguration
// ============================================================================

/// RMT Taktfrequenz in MHz
/// 80 MHz ist optimal für WS2812 LED-Timing
pub const RMT_CLOCK_MHZ: u32 = 80;

/// Abfrage-Intervall für die Status-LED in Millisekunden
pub const STATUS_LED_POLL_MS: u64 = 250;

// ============================================================================
// Regelung / PWM Konfiguration
// ============================================================================

/// Periode des Regel-Ticks in Millisekunden
pub const CONTROL_TICK_MS: u64 = 100;

/// MCPWM Peripherie-Takt in MHz (ein Timer-Tick = 100 ns)
/// Muss zu `esp_core::logic::PWM_TICK_HZ` passen
pub const PWM_CLOCK_MHZ: u32 = 10;

// ============================================================================
// WiFi Konfiguration
// ============================================================================

/// WiFi SSID (Netzwerk-Name)
/// Wird zur Build-Zeit aus der Environment Variable WIFI_SSID geladen
/// Setze diese in .env file (siehe .env.example)
pub const WIFI_SSID: &str = env!(
    "WIFI_SSID",
    "WiFi SSID nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// WiFi Passwort
/// Wird zur Build-Zeit aus der Environment Variable WIFI_PASSWORD geladen
/// Setze diese in .env file (siehe .env.example)
pub const WIFI_PASSWORD: &str = env!(
    "WIFI_PASSWORD",
    "WiFi Password nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// Wartezeit nach fehlgeschlagenem Verbindungsversuch in Sekunden
pub const WIFI_RETRY_DELAY_SECS: u64 = 5;

/// Heap-Größe für WiFi (Bytes)
/// WiFi benötigt dynamischen Speicher für Pakete
pub const WIFI_HEAP_SIZE: usize = 65536; // 64 KB

/// Zusätzliche Heap-Größe (Bytes)
pub const EXTRA_HEAP_SIZE: usize = 36864; // 36 KB

// ============================================================================
// HTTP Server Konfiguration
// ============================================================================

/// HTTP Port
pub const HTTP_PORT: u16 = 80;

/// Buffer für einen eingehenden Request in Bytes
/// Nur die Request-Zeile wird ausgewertet, Header dürfen abgeschnitten werden
pub const HTTP_REQUEST_BUFFER_SIZE: usize = 1024;

/// Obergrenze für den Response-Body in Bytes
pub const HTTP_BODY_BUFFER_SIZE: usize = esp_core::HTML_BUFFER_SIZE;

/// TCP RX Buffer-Größe in Bytes
/// Für eingehende TCP-Daten vom Client
pub const TCP_RX_BUFFER_SIZE: usize = 1024;

/// TCP TX Buffer-Größe in Bytes
/// Für ausgehende TCP-Daten zum Client
pub const TCP_TX_BUFFER_SIZE: usize = 4096;

/// Timeout für eine einzelne Verbindung in Sekunden
pub const HTTP_SOCKET_TIMEOUT_SECS: u64 = 5;
