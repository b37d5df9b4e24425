/// Opaque handle returned by [`TimerService::start_timer`].
pub type TimerHandle = u32;

struct Slot<C> {
    handle: TimerHandle,
    period: u32,
    elapsed: u32,
    stopped: bool,
    callback: Box<dyn FnMut(&mut C)>,
}

/// Cooperative timer service driven by an external pump.
///
/// The host calls [`advance`](TimerService::advance) once per tick; every
/// registered callback whose period has elapsed fires, in registration
/// order, against the shared context `C`. Callbacks run to completion on the
/// calling thread, so within one tick an earlier timer's effects are always
/// visible to a later one — registration order is a sequencing guarantee,
/// not just a scheduling hint.
///
/// Stopping a timer marks its slot; slots are compacted after the pass, so a
/// stop can never cause another timer to be skipped or fired twice.
pub struct TimerService<C> {
    next_handle: TimerHandle,
    slots: Vec<Slot<C>>,
}

impl<C> TimerService<C> {
    pub fn new() -> TimerService<C> {
        TimerService {
            next_handle: 0,
            slots: Vec::new(),
        }
    }

    /// Register a callback fired every `period_ticks` ticks.
    ///
    /// A period of 0 is treated as 1: the callback fires on every tick.
    pub fn start_timer(
        &mut self,
        period_ticks: u32,
        callback: impl FnMut(&mut C) + 'static,
    ) -> TimerHandle {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.slots.push(Slot {
            handle,
            period: period_ticks.max(1),
            elapsed: 0,
            stopped: false,
            callback: Box::new(callback),
        });
        handle
    }

    /// Stop a timer. Returns false if the handle is unknown or already
    /// stopped.
    pub fn stop_timer(&mut self, handle: TimerHandle) -> bool {
        match self
            .slots
            .iter_mut()
            .find(|slot| slot.handle == handle && !slot.stopped)
        {
            Some(slot) => {
                slot.stopped = true;
                true
            }
            None => false,
        }
    }

    /// Run one tick: fire every due timer in registration order, then drop
    /// stopped slots.
    pub fn advance(&mut self, ctx: &mut C) {
        let count = self.slots.len();
        for i in 0..count {
            let slot = &mut self.slots[i];
            if slot.stopped {
                continue;
            }
            slot.elapsed += 1;
            if slot.elapsed >= slot.period {
                slot.elapsed = 0;
                (slot.callback)(ctx);
            }
        }
        self.slots.retain(|slot| !slot.stopped);
    }

    pub fn active_timers(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.stopped).count()
    }
}

impl<C> Default for TimerService<C> {
    fn default() -> Self {
        TimerService::new()
    }
}
