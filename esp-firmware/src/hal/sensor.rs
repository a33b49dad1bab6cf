// Analoger Sensor über ADC1 (Joystick-X / Potentiometer)
//
// Simuliert einen Temperaturfühler. ESP32-C6 ADC: 12 Bit, Rohwerte 0..=4095.

use esp_core::{SensorAdapter, SensorError};
use esp_hal::Blocking;
use esp_hal::analog::adc::{Adc, AdcPin};
use esp_hal::peripherals::{ADC1, GPIO2};

/// Größter Rohwert des 12-Bit ADC
pub const ADC_FULL_SCALE: u16 = 4095;

pub struct AdcSensor<'d> {
    adc: Adc<'d, ADC1<'d>, Blocking>,
    pin: AdcPin<GPIO2<'d>, ADC1<'d>>,
}

impl<'d> AdcSensor<'d> {
    pub fn new(adc: Adc<'d, ADC1<'d>, Blocking>, pin: AdcPin<GPIO2<'d>, ADC1<'d>>) -> Self {
        Self { adc, pin }
    }
}

impl<'d> SensorAdapter for AdcSensor<'d> {
    fn read_raw_sample(&mut self) -> Result<u16, SensorError> {
        // Oneshot-Konvertierung: wenige µs Busy-Wait
        nb::block!(self.adc.read_oneshot(&mut self.pin)).map_err(|_| SensorError::ReadFailed)
    }

    fn full_scale(&self) -> u16 {
        ADC_FULL_SCALE
    }
}
