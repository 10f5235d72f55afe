//! Level countdown.
//!
//! `Countdown` is the pure one-second clock the session reduces over.
//! `Ticker` owns the browser interval that drives it. Both stop idempotently.

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountdownTick {
    /// Not running; the tick was ignored.
    Idle,
    Running { remaining: u32 },
    /// Reached zero on this tick. Reported once.
    Expired,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Countdown {
    limit: u32,
    remaining: u32,
    running: bool,
}

impl Countdown {
    /// A limit of 0 makes an untimed countdown that never runs.
    pub fn new(limit_secs: u32) -> Self {
        Self { limit: limit_secs, remaining: limit_secs, running: false }
    }

    pub fn start(&mut self) {
        self.remaining = self.limit;
        self.running = self.limit > 0;
    }

    pub fn resume(&mut self) {
        self.running = self.limit > 0 && self.remaining > 0;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn tick(&mut self) -> CountdownTick {
        if !self.running {
            return CountdownTick::Idle;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            CountdownTick::Expired
        } else {
            CountdownTick::Running { remaining: self.remaining }
        }
    }

    pub fn is_timed(&self) -> bool {
        self.limit > 0
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

struct Interval {
    id: i32,
    _closure: Closure<dyn FnMut()>,
}

/// A cancellable `setInterval`. Cleared on `stop` and on drop.
#[derive(Clone, Default)]
pub struct Ticker {
    active: Rc<RefCell<Option<Interval>>>,
}

impl Ticker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any running interval.
    pub fn start(&self, period_ms: i32, mut on_tick: impl FnMut() + 'static) {
        self.stop();
        let Some(win) = web_sys::window() else {
            log::warn!("no window; ticker not started");
            return;
        };
        let closure = Closure::wrap(Box::new(move || on_tick()) as Box<dyn FnMut()>);
        match win.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            period_ms,
        ) {
            Ok(id) => *self.active.borrow_mut() = Some(Interval { id, _closure: closure }),
            Err(e) => log::error!("setInterval failed: {e:?}"),
        }
    }

    /// Safe to call when not running.
    pub fn stop(&self) {
        // Dropping the interval clears it.
        self.active.borrow_mut().take();
    }

    pub fn is_running(&self) -> bool {
        self.active.borrow().is_some()
    }
}

impl PartialEq for Ticker {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.active, &other.active)
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        if let Some(win) = web_sys::window() {
            win.clear_interval_with_handle(self.id);
        }
    }
}
