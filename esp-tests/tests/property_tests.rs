//! Property-Tests für Parser, Zustandsautomat und PWM-Mapping
//!
//! Laufen nur auf dem Host, proptest gibt es nicht für den ESP32-C6.

use esp_core::{
    DeviceState, FanCommand, FanController, HTML_BUFFER_SIZE, PwmOutput, clamp_speed,
    compute_pwm_output, sample_to_speed,
};
use proptest::prelude::*;

fn arb_command() -> impl Strategy<Value = FanCommand> {
    prop_oneof![
        Just(FanCommand::SetPowerOn),
        Just(FanCommand::SetPowerOff),
        any::<u32>().prop_map(FanCommand::SetSpeed),
        Just(FanCommand::SetAutoOn),
        Just(FanCommand::SetAutoOff),
        Just(FanCommand::StatusQuery),
        Just(FanCommand::Malformed),
        Just(FanCommand::Unknown),
    ]
}

// ── Parser ───────────────────────────────────────────────────

proptest! {
    /// Beliebige Bytes führen nie zu einem Panic
    #[test]
    fn parse_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
        let _ = FanCommand::parse(&bytes);
    }

    /// Jede Ziffernfolge ergibt eine Geschwindigkeit, Überlauf sättigt
    #[test]
    fn parse_speed_digits(n in any::<u64>()) {
        let request = format!("GET /fan_speed={n} HTTP/1.1\r\n\r\n");
        let expected = u32::try_from(n).unwrap_or(u32::MAX);
        prop_assert_eq!(FanCommand::parse(request.as_bytes()), FanCommand::SetSpeed(expected));
    }

    /// Header-Zeilen können kein Kommando auslösen
    #[test]
    fn headers_are_ignored(header in "[a-zA-Z_/=: ]{0,64}") {
        let request = format!("GET /index.html HTTP/1.1\r\nX-Test: GET /fan_on {header}\r\n\r\n");
        prop_assert_eq!(FanCommand::parse(request.as_bytes()), FanCommand::Unknown);
    }
}

// ── Zustandsautomat ──────────────────────────────────────────

proptest! {
    /// Geschwindigkeit bleibt immer in [0, 255] und ist nach SetSpeed geklemmt
    #[test]
    fn speed_is_clamped(n in any::<u32>()) {
        let mut state = DeviceState::new();
        state.apply(FanCommand::SetSpeed(n));
        prop_assert_eq!(u32::from(state.speed), n.min(255));
        prop_assert_eq!(state.speed, clamp_speed(n));
    }

    /// Nach beliebigen Kommandofolgen gilt: aus → Geschwindigkeit 0 nach SetPowerOff
    #[test]
    fn power_off_always_zeroes_speed(commands in proptest::collection::vec(arb_command(), 0..32)) {
        let mut state = DeviceState::new();
        for command in commands {
            state.apply(command);
        }
        state.apply(FanCommand::SetPowerOff);
        prop_assert!(!state.power);
        prop_assert_eq!(state.speed, 0);
    }

    /// Jede Antwort passt in den Gerätebuffer
    #[test]
    fn every_page_fits(
        power in any::<bool>(),
        auto in any::<bool>(),
        speed in any::<u8>(),
        command in arb_command(),
    ) {
        let mut state = DeviceState::new();
        if power {
            state.apply(FanCommand::SetPowerOn);
        }
        if auto {
            state.apply(FanCommand::SetAutoOn);
        }
        state.update_from_sample(u16::from(speed), 255);

        let controller = FanController::with_state(state);
        prop_assert!(controller.render::<HTML_BUFFER_SIZE>(command).is_ok());
    }
}

// ── Aktor-Mapping ────────────────────────────────────────────

proptest! {
    /// Duty ist immer wrap / 10 und wrap nie kleiner als 100
    #[test]
    fn pwm_output_bounds(speed in any::<u8>()) {
        let PwmOutput { wrap, duty } = compute_pwm_output(speed);
        prop_assert!(wrap >= 100);
        prop_assert!(wrap <= u32::from(u16::MAX));
        prop_assert_eq!(duty, wrap / 10);
        prop_assert_eq!(compute_pwm_output(speed), PwmOutput { wrap, duty });
    }

    /// Höhere Geschwindigkeit → kürzere (oder gleiche) Periode
    #[test]
    fn pwm_wrap_is_monotonic(a in any::<u8>(), b in any::<u8>()) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(compute_pwm_output(hi).wrap <= compute_pwm_output(lo).wrap);
    }

    /// Sensorwerte landen immer in [0, 255] und sind monoton
    #[test]
    fn sample_mapping_monotonic(a in any::<u16>(), b in any::<u16>(), full_scale in 255u16..=u16::MAX) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(sample_to_speed(lo, full_scale) <= sample_to_speed(hi, full_scale));
        prop_assert_eq!(sample_to_speed(full_scale, full_scale), 255);
    }
}
