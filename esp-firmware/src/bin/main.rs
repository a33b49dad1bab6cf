// Keine Standard-Bibliothek verwenden (Embedded System)
#![no_std]
// Kein normaler main() Einstiegspunkt (wird von esp_rtos bereitgestellt)
#![no_main]
// Verbiete mem::forget - gefährlich bei ESP HAL Types mit DMA-Buffern
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
// Verbiete große Stack-Frames (Stack ist auf Embedded Systemen begrenzt)
#![deny(clippy::large_stack_frames)]

// Heap Allocator (WiFi benötigt dynamischen Speicher)
extern crate alloc;

// Embassy Async Runtime
use embassy_executor::Spawner;
use embassy_net::{Config as NetConfig, Stack, StackResources};
use embassy_time::{Duration, Timer};

// ESP32-C6 HAL
use esp_hal::analog::adc::{Adc, AdcConfig, Attenuation};
use esp_hal::clock::CpuClock;
use esp_hal::gpio::{Input, InputConfig, Pull};
use esp_hal::mcpwm::operator::PwmPinConfig;
use esp_hal::mcpwm::{McPwm, PeripheralClockConfig};
use esp_hal::rng::Rng;
use esp_hal::time::Rate;
use esp_hal::timer::timg::TimerGroup;

// Backtrace bei Panic und println!() Support
use {esp_backtrace as _, esp_println as _};

// Projekt-Module und Konfiguration
use esp_luefter_steuerung::config::{EXTRA_HEAP_SIZE, PWM_CLOCK_MHZ, WIFI_HEAP_SIZE};
use esp_luefter_steuerung::hal::{AdcSensor, McpwmFanOutput};
use esp_luefter_steuerung::tasks::{
    connection_task, control_task, dhcp_task, http_server_task, maintenance_button_task, net_task,
    status_led_task,
};
use esp_luefter_steuerung::{NetworkReadySignal, SharedController, new_shared_controller};

// ESP-IDF App Descriptor - erforderlich für den Bootloader!
// Ohne diesen schlägt das Flashen mit "ESP-IDF App Descriptor missing" fehl
esp_bootloader_esp_idf::esp_app_desc!();

/// Main Entry Point
///
/// Initialisiert Hardware, WiFi, startet Embassy Runtime und spawnt Tasks.
/// Danach schläft main() - alle Arbeit läuft in Tasks.
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    // ESP32-C6 Konfiguration: CPU auf maximale Taktfrequenz (160 MHz)
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Heap Allocator initialisieren (WiFi braucht dynamischen Speicher!)
    // Zwei Bereiche: reclaimed RAM (64 KB) + extra (36 KB) = 100 KB total
    esp_alloc::heap_allocator!(
        #[esp_hal::ram(reclaimed)]
        size: WIFI_HEAP_SIZE
    );
    esp_alloc::heap_allocator!(size: EXTRA_HEAP_SIZE);

    // Embassy Runtime initialisieren (Timer + Software Interrupt)
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_interrupt =
        esp_hal::interrupt::software::SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_interrupt.software_interrupt0);

    // Geteilter Zustand: FanController + Netzwerk-Signal
    static CONTROLLER: static_cell::StaticCell<SharedController> = static_cell::StaticCell::new();
    let controller = &*CONTROLLER.init(new_shared_controller());

    static NETWORK_READY: static_cell::StaticCell<NetworkReadySignal> =
        static_cell::StaticCell::new();
    let network_ready = &*NETWORK_READY.init(NetworkReadySignal::new());

    // Lüfter/Buzzer: MCPWM0 mit 10 MHz, Operator 0 → Timer 0, Ausgang A auf GPIO4
    let pwm_clock = PeripheralClockConfig::with_frequency(Rate::from_mhz(PWM_CLOCK_MHZ))
        .expect("Failed to configure MCPWM clock");
    let mut mcpwm = McPwm::new(peripherals.MCPWM0, pwm_clock);
    mcpwm.operator0.set_timer(&mcpwm.timer0);
    let pwm_pin = mcpwm
        .operator0
        .with_pin_a(peripherals.GPIO4, PwmPinConfig::UP_ACTIVE_HIGH);
    let fan_output = McpwmFanOutput::new(mcpwm.timer0, pwm_pin, pwm_clock);

    // Sensor: ADC1 auf GPIO2, 11 dB Dämpfung (volle 0-3.3 V)
    let mut adc_config = AdcConfig::new();
    let adc_pin = adc_config.enable_pin(peripherals.GPIO2, Attenuation::_11dB);
    let adc = Adc::new(peripherals.ADC1, adc_config);
    let sensor = AdcSensor::new(adc, adc_pin);

    // Wartungs-Button: BOOT-Taster (GPIO9) mit Pull-Up
    let button = Input::new(
        peripherals.GPIO9,
        InputConfig::default().with_pull(Pull::Up),
    );

    // WiFi Hardware initialisieren
    static RADIO_INIT: static_cell::StaticCell<esp_radio::Controller> =
        static_cell::StaticCell::new();
    let radio_init =
        RADIO_INIT.init(esp_radio::init().expect("Failed to initialize Wi-Fi/BLE controller"));

    let (wifi_controller, wifi_interface) =
        esp_radio::wifi::new(radio_init, peripherals.WIFI, Default::default())
            .expect("Failed to initialize Wi-Fi");

    // Netzwerk-Stack erstellen
    // Random seed für TCP/IP Stack (von Hardware RNG)
    let rng = Rng::new();
    let seed = (rng.random() as u64) << 32 | rng.random() as u64;

    // Static resources für embassy-net
    // 3 Sockets: HTTP-Listener (1) + DHCP (1) + Reserve
    static RESOURCES: static_cell::StaticCell<StackResources<3>> = static_cell::StaticCell::new();
    let resources = RESOURCES.init(StackResources::new());

    // embassy-net erstellt Stack + Runner (nutzt STA interface für Client-Modus)
    let (stack, runner) = embassy_net::new(
        wifi_interface.sta,
        NetConfig::dhcpv4(Default::default()),
        resources,
        seed,
    );

    // Stack muss 'static sein für Tasks
    static STACK: static_cell::StaticCell<Stack<'static>> = static_cell::StaticCell::new();
    let stack = &*STACK.init(stack);

    // Spawn Regel-Task (Sensor → Zustand → PWM)
    spawner
        .spawn(control_task(controller, sensor, fan_output))
        .unwrap();

    // Spawn Status-LED Task (dunkel bis IP, danach Lüfter-Zustand)
    spawner
        .spawn(status_led_task(
            peripherals.GPIO8,
            peripherals.RMT,
            controller,
            network_ready,
        ))
        .unwrap();

    // Spawn Wartungs-Button Task
    spawner.spawn(maintenance_button_task(button)).unwrap();

    // Spawn WiFi Tasks
    spawner.spawn(connection_task(wifi_controller)).unwrap();
    spawner.spawn(net_task(runner)).unwrap();
    spawner.spawn(dhcp_task(stack, network_ready)).unwrap();

    // Spawn HTTP Server Task (eine Verbindung gleichzeitig)
    spawner.spawn(http_server_task(stack, controller)).unwrap();

    // Main-Loop: schläft (alle Arbeit läuft in Tasks)
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}
