//! Sample input pin.

use esp_idf_svc::sys::{self as sys, esp, EspError};

use rust_signal_reader::config::PullMode;
use rust_signal_reader::sampler::PinSource;

/// A GPIO configured as the monitored sample input.
pub struct InputPin {
    gpio: sys::gpio_num_t,
}

impl InputPin {
    /// Reset the pin and configure it as an input with the given pull
    /// resistor. Any failure here is fatal to startup.
    pub fn configure(gpio: i32, pull: PullMode) -> Result<Self, EspError> {
        let gpio = gpio as sys::gpio_num_t;

        unsafe {
            esp!(sys::gpio_reset_pin(gpio))?;
            esp!(sys::gpio_set_direction(gpio, sys::gpio_mode_t_GPIO_MODE_INPUT))?;
            esp!(sys::gpio_set_pull_mode(gpio, pull_mode(pull)))?;
        }

        Ok(Self { gpio })
    }
}

impl PinSource for InputPin {
    /// Single register read; safe from ISR context.
    #[inline]
    fn read_level(&mut self) -> bool {
        unsafe { sys::gpio_get_level(self.gpio) != 0 }
    }
}

fn pull_mode(pull: PullMode) -> sys::gpio_pull_mode_t {
    match pull {
        PullMode::Up => sys::gpio_pull_mode_t_GPIO_PULLUP_ONLY,
        PullMode::Down => sys::gpio_pull_mode_t_GPIO_PULLDOWN_ONLY,
        PullMode::Floating => sys::gpio_pull_mode_t_GPIO_FLOATING,
    }
}
