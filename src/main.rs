//! signalreader - Firmware entry point
//!
//! Startup sequence (any failure halts before sampling begins):
//! 1. Install the diagnostic console
//! 2. Configure the sample input pin
//! 3. Install the data UART
//! 4. Place the sampler into its static slot
//! 5. Configure and start the sample clock
//!
//! After that the main task becomes the health monitor: every 500 ms
//! it reports duration and samples sent, warns when the transport
//! falls behind real time, and surfaces sticky transport errors. It
//! never intervenes; the operator picks a rate/baud pair the serial
//! line can carry.

#![cfg_attr(target_os = "espidf", no_std)]
#![cfg_attr(target_os = "espidf", no_main)]

#[cfg(target_os = "espidf")]
mod hal;

#[cfg(target_os = "espidf")]
use core::ffi::c_void;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys as esp_idf_sys;

#[cfg(target_os = "espidf")]
use rust_signal_reader::{
    config::CONFIG,
    logging::{log_line, LogLevel},
    monitor::DriftMonitor,
    sampler::Sampler,
    status::AcquisitionStatus,
};

#[cfg(target_os = "espidf")]
use crate::hal::{clock::SampleClock, pin::InputPin, uart::SerialPort};

/// Shared counters: written by the sample ISR, read by the monitor.
#[cfg(target_os = "espidf")]
static STATUS: AcquisitionStatus = AcquisitionStatus::new();

/// The sampler needs a stable address for the ISR context pointer.
/// Written exactly once during init, before the sample clock starts;
/// afterwards the ISR is its only user.
#[cfg(target_os = "espidf")]
static mut SAMPLER: Option<Sampler<'static, InputPin, SerialPort>> = None;

/// Monitor period in FreeRTOS ticks (default 100 Hz tick = 10 ms each).
#[cfg(target_os = "espidf")]
const MONITOR_DELAY_TICKS: u32 = CONFIG.monitor_period_ms / 10;

/// gptimer alarm callback: one sample per invocation.
///
/// Returns whether a higher-priority task was woken (never, here).
#[cfg(target_os = "espidf")]
unsafe extern "C" fn on_sample_alarm(
    _timer: esp_idf_sys::gptimer_handle_t,
    _edata: *const esp_idf_sys::gptimer_alarm_event_data_t,
    user_ctx: *mut c_void,
) -> bool {
    // SAFETY: user_ctx points into SAMPLER, initialized before
    // gptimer_start and never moved or dropped afterwards; this ISR is
    // the only code touching it once sampling runs.
    let sampler = &mut *(user_ctx as *mut Sampler<'static, InputPin, SerialPort>);
    sampler.tick();
    false
}

#[cfg(target_os = "espidf")]
fn timestamp_us() -> i64 {
    unsafe { esp_idf_sys::esp_timer_get_time() }
}

#[cfg(target_os = "espidf")]
#[no_mangle]
fn main() {
    // Initialize ESP-IDF
    esp_idf_sys::link_patches();

    let mut diag = match SerialPort::install_console(CONFIG.diag_baud_rate) {
        Ok(port) => port,
        // No console to report on; halt.
        Err(err) => panic!("diagnostic console init failed: {}", err),
    };

    log_line(
        &mut diag,
        timestamp_us(),
        LogLevel::Info,
        format_args!("Starting..."),
    );

    if let Err(err) = run(&mut diag) {
        log_line(
            &mut diag,
            timestamp_us(),
            LogLevel::Error,
            format_args!("FATAL! init failed: {}", err),
        );
        panic!("init failed: {}", err);
    }
}

/// Bring up the acquisition path, then loop as the health monitor.
/// Returns only on an initialization error.
#[cfg(target_os = "espidf")]
fn run(diag: &mut SerialPort) -> Result<(), esp_idf_sys::EspError> {
    let pin = InputPin::configure(CONFIG.sample_pin, CONFIG.sample_pull)?;
    let data_port = SerialPort::install(
        CONFIG.data_uart_port,
        CONFIG.data_tx_pin,
        CONFIG.data_rx_pin,
        CONFIG.data_baud_rate,
    )?;

    // SAFETY: single write to the static slot; the ISR that will alias
    // it is not registered yet.
    let sampler_ptr: *mut Sampler<'static, InputPin, SerialPort> = unsafe {
        let slot = &mut *core::ptr::addr_of_mut!(SAMPLER);
        *slot = Some(Sampler::new(pin, data_port, &STATUS));
        slot.as_mut().unwrap()
    };

    let mut clock = SampleClock::configure(
        CONFIG.sample_period_us(),
        on_sample_alarm,
        sampler_ptr as *mut c_void,
    )?;

    let started_at_us = timestamp_us();
    clock.start()?;

    log_line(
        &mut *diag,
        timestamp_us(),
        LogLevel::Info,
        format_args!("Everything initiated!"),
    );

    let monitor = DriftMonitor::new(CONFIG.sampling_rate_hz, started_at_us);
    loop {
        let now = timestamp_us();
        let report = monitor.observe(now, &STATUS);

        if report.transport_error {
            log_line(
                diag,
                now,
                LogLevel::Error,
                format_args!(
                    "Transport write failed; unit dropped ({} failure(s) since boot)",
                    report.transport_error_count
                ),
            );
        }

        if report.falling_behind {
            log_line(
                diag,
                now,
                LogLevel::Error,
                format_args!(
                    "Can't keep up! Reduce the sampling rate or raise the transport baud rate"
                ),
            );
        }

        log_line(
            diag,
            now,
            LogLevel::Info,
            format_args!(
                "Record duration: {} second(s); Samples sent: {}",
                report.duration_secs(CONFIG.sampling_rate_hz),
                report.samples_sent
            ),
        );

        unsafe {
            esp_idf_sys::vTaskDelay(MONITOR_DELAY_TICKS);
        }
    }
}

/// The firmware only runs on the ESP32 target; on the host this crate
/// exists for its library and tests.
#[cfg(not(target_os = "espidf"))]
fn main() {}
