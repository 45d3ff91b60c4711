//! Sample clock: a gptimer alarm firing once per sample period.

use core::ffi::c_void;
use core::ptr;

use esp_idf_svc::sys::{self as sys, esp, EspError};

/// Raw gptimer alarm callback, invoked in ISR context.
pub type AlarmIsr = unsafe extern "C" fn(
    sys::gptimer_handle_t,
    *const sys::gptimer_alarm_event_data_t,
    *mut c_void,
) -> bool;

/// A configured periodic hardware timer.
///
/// Owned by the startup path; lives for the process lifetime and is
/// never reconfigured after [`SampleClock::start`].
pub struct SampleClock {
    handle: sys::gptimer_handle_t,
}

impl SampleClock {
    /// Create a 1 MHz gptimer with an auto-reload alarm every
    /// `period_us` ticks and register `isr` with `ctx` as its user
    /// context. Fatal on any configuration error.
    ///
    /// `ctx` must outlive the clock and stay at a stable address; it
    /// is handed to the ISR on every alarm.
    pub fn configure(period_us: u64, isr: AlarmIsr, ctx: *mut c_void) -> Result<Self, EspError> {
        let timer_config = sys::gptimer_config_t {
            clk_src: sys::soc_periph_gptimer_clk_src_t_GPTIMER_CLK_SRC_DEFAULT,
            direction: sys::gptimer_count_direction_t_GPTIMER_COUNT_UP,
            resolution_hz: 1_000_000, // 1 tick = 1 µs
            ..Default::default()
        };

        let mut handle: sys::gptimer_handle_t = ptr::null_mut();
        unsafe {
            esp!(sys::gptimer_new_timer(&timer_config, &mut handle))?;
        }

        let mut alarm_config = sys::gptimer_alarm_config_t {
            alarm_count: period_us,
            reload_count: 0,
            flags: Default::default(),
        };
        alarm_config.flags.set_auto_reload_on_alarm(1);

        let callbacks = sys::gptimer_event_callbacks_t { on_alarm: Some(isr) };

        unsafe {
            esp!(sys::gptimer_set_alarm_action(handle, &alarm_config))?;
            esp!(sys::gptimer_register_event_callbacks(handle, &callbacks, ctx))?;
            esp!(sys::gptimer_enable(handle))?;
        }

        Ok(Self { handle })
    }

    /// Arm the timer. Sampling begins with the first alarm.
    pub fn start(&mut self) -> Result<(), EspError> {
        unsafe { esp!(sys::gptimer_start(self.handle)) }
    }
}
