//! Self-expiring tooltip for a selected chart point.
//!
//! Two states: idle (`state() == None`) and showing. A point selection shows
//! the tooltip and schedules one deferred clear; a newer selection cancels the
//! pending clear before scheduling its own.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::domain::{
    chart::{RenderableSeries, TooltipState, format_price},
    errors::{ChartResult, SelectionError},
    logging::LogComponent,
};
use crate::{log_debug, log_warn};

/// Deferred-callback seam. At most one callback is pending per scheduler.
pub trait ClearScheduler {
    /// Run `on_fire` after `delay_ms`, cancelling any callback still pending.
    fn schedule(&mut self, delay_ms: u32, on_fire: Box<dyn FnOnce()>);

    fn cancel(&mut self);
}

#[derive(Default)]
struct TooltipSlot {
    state: Option<TooltipState>,
    generation: u64,
    on_expire: Option<Rc<dyn Fn()>>,
}

pub struct TooltipController {
    slot: Rc<RefCell<TooltipSlot>>,
    scheduler: Box<dyn ClearScheduler>,
    delay_ms: u32,
}

impl TooltipController {
    pub fn new(scheduler: Box<dyn ClearScheduler>, delay_ms: u32) -> Self {
        Self {
            slot: Rc::new(RefCell::new(TooltipSlot::default())),
            scheduler,
            delay_ms,
        }
    }

    pub fn state(&self) -> Option<TooltipState> {
        self.slot.borrow().state.clone()
    }

    pub fn is_showing(&self) -> bool {
        self.slot.borrow().state.is_some()
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Called after an automatic clear, outside of any internal borrow.
    pub fn on_expire(&mut self, callback: impl Fn() + 'static) {
        self.slot.borrow_mut().on_expire = Some(Rc::new(callback));
    }

    /// Show the tooltip for `series[index]`.
    ///
    /// An index outside the series leaves the current state untouched.
    pub fn select(&mut self, series: &RenderableSeries, index: i64) -> ChartResult<TooltipState> {
        let point = usize::try_from(index)
            .ok()
            .and_then(|i| series.get(i))
            .ok_or(SelectionError::PointOutOfRange { index, len: series.len() })
            .inspect_err(|err| {
                log_warn!(LogComponent::Domain("Tooltip"), "Ignoring selection: {}", err);
            })?;

        let tooltip = TooltipState::new(point.label.clone(), format_price(point.value)?, self.delay_ms);

        let generation = {
            let mut slot = self.slot.borrow_mut();
            slot.generation += 1;
            slot.state = Some(tooltip.clone());
            slot.generation
        };

        let slot = Rc::downgrade(&self.slot);
        self.scheduler
            .schedule(self.delay_ms, Box::new(move || expire(&slot, generation)));

        log_debug!(
            LogComponent::Domain("Tooltip"),
            "Showing {} for {} ms",
            tooltip.text,
            self.delay_ms
        );
        Ok(tooltip)
    }
}

impl Drop for TooltipController {
    fn drop(&mut self) {
        self.scheduler.cancel();
    }
}

/// Clear the slot if `generation` is still the latest selection.
fn expire(slot: &Weak<RefCell<TooltipSlot>>, generation: u64) {
    let Some(slot) = slot.upgrade() else {
        return;
    };

    let on_expire = {
        let mut slot = slot.borrow_mut();
        if slot.generation != generation || slot.state.is_none() {
            return;
        }
        slot.state = None;
        slot.on_expire.clone()
    };

    if let Some(callback) = on_expire {
        callback();
    }
}

#[derive(Default)]
struct ClockInner {
    now_ms: u64,
    pending: Option<(u64, Box<dyn FnOnce()>)>,
    fired: usize,
}

/// Manually advanced clock for hosts without a browser event loop.
#[derive(Clone, Default)]
pub struct ManualClock {
    inner: Rc<RefCell<ClockInner>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scheduler(&self) -> ManualScheduler {
        ManualScheduler { clock: self.clone() }
    }

    pub fn now_ms(&self) -> u64 {
        self.inner.borrow().now_ms
    }

    pub fn has_pending(&self) -> bool {
        self.inner.borrow().pending.is_some()
    }

    /// Number of callbacks that actually ran.
    pub fn fired(&self) -> usize {
        self.inner.borrow().fired
    }

    /// Move time forward and run the pending callback if it came due.
    pub fn advance(&self, ms: u64) {
        let due = {
            let mut inner = self.inner.borrow_mut();
            inner.now_ms += ms;
            let now = inner.now_ms;
            match inner.pending.take() {
                Some((at, callback)) if at <= now => {
                    inner.fired += 1;
                    Some(callback)
                }
                other => {
                    inner.pending = other;
                    None
                }
            }
        };

        if let Some(callback) = due {
            callback();
        }
    }
}

pub struct ManualScheduler {
    clock: ManualClock,
}

impl ClearScheduler for ManualScheduler {
    fn schedule(&mut self, delay_ms: u32, on_fire: Box<dyn FnOnce()>) {
        let mut inner = self.clock.inner.borrow_mut();
        let at = inner.now_ms + u64::from(delay_ms);
        inner.pending = Some((at, on_fire));
    }

    fn cancel(&mut self) {
        self.clock.inner.borrow_mut().pending = None;
    }
}
