//! UART ports: packed-sample transport and diagnostic console.
//!
//! Both ports are installed once at startup with a fixed 8N1
//! configuration and live for the process lifetime. The data port is
//! written from ISR context through the non-blocking FIFO path; the
//! console is written with blocking writes from task context only.

use core::ptr;

use esp_idf_svc::sys::{self as sys, esp, EspError};

use rust_signal_reader::logging::DiagSink;
use rust_signal_reader::sampler::{TransportBusy, TransportChannel};

/// Driver RX ring size. The driver requires more than one hardware
/// FIFO worth (128 bytes) even on TX-only ports.
const RX_BUFFER_BYTES: i32 = 512;

/// An installed UART port.
pub struct SerialPort {
    port: sys::uart_port_t,
}

impl SerialPort {
    /// Install the driver on `port` and route it to the given pins.
    /// 8 data bits, no parity, 1 stop bit, no flow control.
    pub fn install(port: i32, tx_pin: i32, rx_pin: i32, baud_rate: u32) -> Result<Self, EspError> {
        let port = port as sys::uart_port_t;

        let config = sys::uart_config_t {
            baud_rate: baud_rate as i32,
            data_bits: sys::uart_word_length_t_UART_DATA_8_BITS,
            parity: sys::uart_parity_t_UART_PARITY_DISABLE,
            stop_bits: sys::uart_stop_bits_t_UART_STOP_BITS_1,
            flow_ctrl: sys::uart_hw_flowcontrol_t_UART_HW_FLOWCTRL_DISABLE,
            ..Default::default()
        };

        unsafe {
            esp!(sys::uart_driver_install(
                port,
                RX_BUFFER_BYTES,
                0,
                0,
                ptr::null_mut(),
                0
            ))?;
            esp!(sys::uart_param_config(port, &config))?;
            esp!(sys::uart_set_pin(
                port,
                tx_pin,
                rx_pin,
                sys::UART_PIN_NO_CHANGE,
                sys::UART_PIN_NO_CHANGE
            ))?;
        }

        Ok(Self { port })
    }

    /// Install the diagnostic console on UART0, keeping the default
    /// console pin routing.
    pub fn install_console(baud_rate: u32) -> Result<Self, EspError> {
        Self::install(
            0,
            sys::UART_PIN_NO_CHANGE,
            sys::UART_PIN_NO_CHANGE,
            baud_rate,
        )
    }
}

impl TransportChannel for SerialPort {
    /// Push one byte straight into the hardware TX FIFO.
    ///
    /// Never waits for room: a short or negative return means the FIFO
    /// was full and the byte was not accepted.
    #[inline]
    fn write_unit(&mut self, unit: u8) -> Result<(), TransportBusy> {
        let written = unsafe { sys::uart_tx_chars(self.port, (&unit as *const u8).cast(), 1) };

        if written == 1 {
            Ok(())
        } else {
            Err(TransportBusy)
        }
    }
}

impl DiagSink for SerialPort {
    /// Blocking write; task context only.
    fn write_line(&mut self, line: &[u8]) {
        let _ = unsafe { sys::uart_write_bytes(self.port, line.as_ptr().cast(), line.len()) };
    }
}
