//! Module: config
//!
//! Purpose: Build-time configuration for the signal reader.
//!
//! Everything here is a named constant baked into the firmware image;
//! there is no runtime reconfiguration surface. The sampling rate and
//! the data-port baud rate must be chosen together: 8 samples travel
//! per UART frame (10 bits on the wire at 8N1), so the transport keeps
//! up only while `baud_rate >= sampling_rate * 10 / 8`.
//!
//! Maximum rated numbers @ 240 MHz: 100 kHz @ 128 kBd.

/// Pull resistor applied to the sample input pin.
///
/// Kept free of ESP-IDF types so the core stays host-buildable; the
/// HAL maps this onto `gpio_pull_mode_t`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PullMode {
    Up,
    Down,
    Floating,
}

/// Fixed configuration for the acquisition front-end.
pub struct SamplerConfig {
    /// Pin sampling rate in Hz. The sample clock fires once per period.
    pub sampling_rate_hz: u32,

    /// GPIO number of the monitored input pin.
    pub sample_pin: i32,

    /// Pull resistor on the monitored pin.
    pub sample_pull: PullMode,

    /// UART port carrying the packed sample stream.
    pub data_uart_port: i32,

    /// Data UART TX pin.
    pub data_tx_pin: i32,

    /// Data UART RX pin (unused by the protocol, still routed).
    pub data_rx_pin: i32,

    /// Data UART baud rate. 8N1, no flow control.
    pub data_baud_rate: u32,

    /// Diagnostic console baud rate (UART0).
    pub diag_baud_rate: u32,

    /// Health monitor period in milliseconds.
    pub monitor_period_ms: u32,
}

impl SamplerConfig {
    /// Sample clock period in microseconds (1 MHz timer resolution).
    pub const fn sample_period_us(&self) -> u64 {
        US_IN_SECOND / self.sampling_rate_hz as u64
    }

}

/// Microseconds in one second; the sample clock runs at this resolution.
pub const US_IN_SECOND: u64 = 1_000_000;

/// The one build-time configuration instance.
pub const CONFIG: SamplerConfig = SamplerConfig {
    sampling_rate_hz: 100_000,
    sample_pin: 14,
    sample_pull: PullMode::Up,
    data_uart_port: 2,
    data_tx_pin: 17,
    data_rx_pin: 16,
    data_baud_rate: 128_000,
    diag_baud_rate: 115_200,
    monitor_period_ms: 500,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_period_from_rate() {
        assert_eq!(CONFIG.sample_period_us(), 10);

        let slow = SamplerConfig {
            sampling_rate_hz: 8_000,
            ..CONFIG
        };
        assert_eq!(slow.sample_period_us(), 125);
    }

    #[test]
    fn test_rate_divides_clock_resolution() {
        // A fractional period would silently stretch the sample clock.
        assert_eq!(US_IN_SECOND % CONFIG.sampling_rate_hz as u64, 0);
    }

    #[test]
    fn test_baud_rate_covers_sampling_rate() {
        // 8 samples per UART frame, 10 wire bits per frame at 8N1.
        let wire_bits_per_second = CONFIG.sampling_rate_hz as u64 * 10 / 8;
        assert!(CONFIG.data_baud_rate as u64 >= wire_bits_per_second);
    }
}
