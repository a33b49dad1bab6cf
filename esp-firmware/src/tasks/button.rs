// Wartungs-Button Task - BOOT-Taster löst einen Neustart aus
use defmt::{info, warn};
use embassy_time::{Duration, Timer};
use esp_hal::gpio::Input;

use crate::config::MAINTENANCE_BUTTON_GPIO_PIN;

/// Wartungs-Button Task
///
/// Wartet auf eine fallende Flanke am BOOT-Taster (GPIO9, Pull-Up) und
/// startet den Chip neu. Wird der Taster während des Neustarts gehalten,
/// bleibt der ESP32-C6 im Download-Modus und kann neu geflasht werden.
#[embassy_executor::task]
pub async fn maintenance_button_task(mut button: Input<'static>) {
    info!("BTN: Maintenance button on GPIO{} armed", MAINTENANCE_BUTTON_GPIO_PIN);

    button.wait_for_falling_edge().await;
    warn!("BTN: Pressed, restarting (keep holding for download mode)");

    // Log-Ausgabe noch rausschreiben lassen
    Timer::after(Duration::from_millis(100)).await;

    esp_hal::system::software_reset();
}
