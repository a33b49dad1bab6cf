// Regel-Task - Sensor lesen, Zustand aktualisieren, PWM ansteuern
use defmt::{debug, info, warn};
use embassy_time::{Duration, Ticker};

use crate::SharedController;
use crate::config::CONTROL_TICK_MS;
use crate::hal::{AdcSensor, McpwmFanOutput};
use esp_core::{ActuatorAdapter, FanState, PwmOutput, SensorAdapter};

/// Nach so vielen Fehlern in Folge wird erneut geloggt
const ERROR_LOG_EVERY: u32 = 50;

/// Regel-Logik - Testbare Business Logic ohne Hardware-Abhängigkeit
///
/// Läuft alle `CONTROL_TICK_MS` Millisekunden:
/// - Aus → Ausgang auf Duty 0
/// - Automatik → Sensor lesen, Geschwindigkeit + Temperatur ableiten
/// - PWM aus der aktuellen Geschwindigkeit berechnen und setzen
///
/// Der Tick läuft komplett im Lock des Controllers, HTTP-Kommandos landen
/// also immer vor oder nach einem Tick, nie mittendrin.
///
/// # Trait-basierte Abstraktion
/// `S: SensorAdapter` und `A: ActuatorAdapter` sind im Production-Code
/// ADC bzw. MCPWM, in Tests Mocks.
pub async fn control_logic<S: SensorAdapter, A: ActuatorAdapter>(
    controller: &'static SharedController,
    mut sensor: S,
    mut actuator: A,
) -> ! {
    let mut ticker = Ticker::every(Duration::from_millis(CONTROL_TICK_MS));
    let mut last_state: Option<FanState> = None;
    let mut last_output: Option<PwmOutput> = None;
    let mut consecutive_errors: u32 = 0;

    loop {
        let result = controller.lock(|cell| {
            let mut fan = cell.borrow_mut();
            fan.tick(&mut sensor, &mut actuator)
                .map(|output| (output, *fan.state()))
        });

        match result {
            Ok((output, state)) => {
                if consecutive_errors > 0 {
                    info!("CTRL: Recovered after {} failed ticks", consecutive_errors);
                    consecutive_errors = 0;
                }

                let fan_state = state.fan_state();
                if last_state != Some(fan_state) {
                    info!("CTRL: {} (speed {})", fan_state, state.speed);
                    last_state = Some(fan_state);
                }

                // Im Automatik-Modus ändert sich die Ausgabe ständig → nur debug
                if last_output != Some(output) {
                    debug!("CTRL: Output {} (speed {})", output, state.speed);
                    last_output = Some(output);
                }
            }
            Err(e) => {
                if consecutive_errors % ERROR_LOG_EVERY == 0 {
                    warn!("CTRL: Tick failed: {} ({} in a row)", e, consecutive_errors + 1);
                }
                consecutive_errors = consecutive_errors.saturating_add(1);
            }
        }

        ticker.next().await;
    }
}

/// Regel-Task - Embassy Task für parallele Ausführung
///
/// # Parameter
/// - `controller`: Geteilter FanController
/// - `sensor`: ADC-Sensor (Joystick / Poti)
/// - `output`: MCPWM-Ausgang für Lüfter/Buzzer
#[embassy_executor::task]
pub async fn control_task(
    controller: &'static SharedController,
    sensor: AdcSensor<'static>,
    output: McpwmFanOutput<'static>,
) {
    info!("CTRL: Control loop started ({} ms tick)", CONTROL_TICK_MS);
    control_logic(controller, sensor, output).await
}
