// Status-LED Task - Zeigt Netzwerk- und Lüfter-Zustand über die RGB LED
use defmt::{error, info};
use embassy_time::{Duration, Timer};
use esp_hal_smartled::smart_led_buffer;
use rgb::RGB8;

use crate::config::{RMT_CLOCK_MHZ, STATUS_LED_POLL_MS};
use crate::hal::RmtLedWriter;
use crate::{NetworkReadySignal, SharedController};
use esp_core::SmartLedWriter;

/// Status-LED Logik - Testbare Business Logic ohne Hardware-Abhängigkeit
///
/// - Bis zur IP-Adresse bleibt die LED dunkel
/// - Danach zeigt sie den Lüfter-Zustand (Blau = Aus, Grün = Manuell,
///   Gelb = Automatik)
///
/// Geschrieben wird nur bei einer Farbänderung.
pub async fn status_led_logic<L: SmartLedWriter>(
    mut led: L,
    controller: &'static SharedController,
    network_ready: &'static NetworkReadySignal,
) -> ! {
    if led.write(RGB8::default()).is_err() {
        error!("LED: Failed to clear status LED");
    }

    network_ready.wait().await;
    info!("LED: Network ready, showing fan state");

    let mut shown: Option<RGB8> = None;
    loop {
        let color = controller.lock(|cell| cell.borrow().status_color());

        if shown != Some(color) {
            match led.write(color) {
                Ok(()) => shown = Some(color),
                Err(_) => error!("LED: Failed to write status color"),
            }
        }

        Timer::after(Duration::from_millis(STATUS_LED_POLL_MS)).await;
    }
}

/// Status-LED Task - Embassy Task für parallele Ausführung
///
/// Übernimmt die RMT-Initialisierung und ruft dann `status_led_logic()` auf.
///
/// # Parameter
/// - `gpio8`: GPIO8 Peripheral für LED-Datenleitung
/// - `rmt_peripheral`: RMT Peripheral für präzises Timing
/// - `controller`: Geteilter FanController (nur lesend)
/// - `network_ready`: Signal vom DHCP-Task
#[embassy_executor::task]
pub async fn status_led_task(
    gpio8: esp_hal::peripherals::GPIO8<'static>,
    rmt_peripheral: esp_hal::peripherals::RMT<'static>,
    controller: &'static SharedController,
    network_ready: &'static NetworkReadySignal,
) {
    // Buffer für SmartLED Daten erstellen (1 LED)
    let mut rmt_buffer = smart_led_buffer!(1);

    let led = match RmtLedWriter::new(gpio8, rmt_peripheral, RMT_CLOCK_MHZ, &mut rmt_buffer) {
        Ok(led) => led,
        Err(e) => {
            error!("LED: RMT init failed: {}", e);
            return;
        }
    };

    status_led_logic(led, controller, network_ready).await
}
