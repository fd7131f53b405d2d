//! Debounce support for inputs that trigger remote requests

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Generation counter deciding which scheduled action may still run.
///
/// Every `arm` invalidates all earlier tickets, so of a burst of triggers only
/// the last one fires. `cancel` invalidates the outstanding ticket.
#[derive(Debug, Default, Clone, Copy)]
pub struct DebounceGate {
    generation: u64,
}

impl DebounceGate {
    pub fn arm(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        ticket == self.generation
    }

    pub fn cancel(&mut self) {
        self.generation += 1;
    }
}

/// Latest value of a debounced input together with its gate.
///
/// The timer only carries a ticket; when it elapses `take_due` hands out the
/// pending value if no newer change or cancel happened in between.
#[derive(Debug, Clone)]
pub struct Debounced<T> {
    gate: DebounceGate,
    skip_next: bool,
    pending: Option<T>,
}

impl<T> Default for Debounced<T> {
    fn default() -> Self {
        Self {
            gate: DebounceGate::default(),
            skip_next: false,
            pending: None,
        }
    }
}

impl<T> Debounced<T> {
    /// Ignores the first change, which is the effect's initial run on mount
    pub fn skipping_first() -> Self {
        Self {
            skip_next: true,
            ..Self::default()
        }
    }

    /// Record a change. Returns the ticket a timer must present later.
    pub fn schedule(&mut self, value: T) -> Option<u64> {
        if self.skip_next {
            self.skip_next = false;
            return None;
        }
        self.pending = Some(value);
        Some(self.gate.arm())
    }

    /// Value to act on when the timer for `ticket` elapses
    pub fn take_due(&mut self, ticket: u64) -> Option<T> {
        if self.gate.is_current(ticket) {
            self.pending.take()
        } else {
            None
        }
    }

    pub fn cancel(&mut self) {
        self.gate.cancel();
        self.pending = None;
    }
}

/// Schedule `value` and run `action` with it after `delay_ms`, unless the
/// input changes again, is cancelled or disposed in the meantime.
pub fn debounce<T, F>(slot: StoredValue<Debounced<T>>, value: T, delay_ms: u32, action: F)
where
    T: Send + Sync + 'static,
    F: FnOnce(T) + 'static,
{
    let Some(ticket) = slot.try_update_value(|d| d.schedule(value)).flatten() else {
        return;
    };

    spawn_local(async move {
        TimeoutFuture::new(delay_ms).await;
        if let Some(value) = slot.try_update_value(|d| d.take_due(ticket)).flatten() {
            action(value);
        }
    });
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Manually advanced clock standing in for browser timers
    pub(crate) struct FakeTimers {
        delay_ms: u32,
        queued: Vec<(u32, u64)>,
    }

    impl FakeTimers {
        pub(crate) fn new(delay_ms: u32) -> Self {
            Self {
                delay_ms,
                queued: Vec::new(),
            }
        }

        /// Feed a change at time `at` into `input`, starting a timer if it was armed
        pub(crate) fn change<T>(&mut self, input: &mut Debounced<T>, at: u32, value: T) {
            if let Some(ticket) = input.schedule(value) {
                self.queued.push((at + self.delay_ms, ticket));
            }
        }

        /// Let time pass until `until`; returns (fire time, value) of every action run
        pub(crate) fn advance<T>(&mut self, input: &mut Debounced<T>, until: u32) -> Vec<(u32, T)> {
            self.queued.sort_by_key(|(due, _)| *due);
            let (due, later): (Vec<_>, Vec<_>) =
                self.queued.drain(..).partition(|(at, _)| *at <= until);
            self.queued = later;
            due.into_iter()
                .filter_map(|(at, ticket)| input.take_due(ticket).map(|v| (at, v)))
                .collect()
        }
    }

    #[test]
    fn test_only_last_ticket_fires() {
        let mut gate = DebounceGate::default();
        let tickets: Vec<u64> = (0..3).map(|_| gate.arm()).collect();
        let fired: Vec<u64> = tickets
            .into_iter()
            .filter(|t| gate.is_current(*t))
            .collect();
        assert_eq!(fired.len(), 1);
        assert!(gate.is_current(fired[0]));
    }

    #[test]
    fn test_cancel_invalidates_pending_ticket() {
        let mut gate = DebounceGate::default();
        let ticket = gate.arm();
        gate.cancel();
        assert!(!gate.is_current(ticket));

        let next = gate.arm();
        assert!(gate.is_current(next));
    }

    #[test]
    fn test_initial_run_is_skipped() {
        let mut timers = FakeTimers::new(500);
        let mut input = Debounced::skipping_first();
        timers.change(&mut input, 0, String::new());
        assert!(timers.advance(&mut input, 2_000).is_empty());
    }

    #[test]
    fn test_burst_fires_once_after_last_change() {
        let mut timers = FakeTimers::new(500);
        let mut input = Debounced::skipping_first();
        timers.change(&mut input, 0, String::new());

        timers.change(&mut input, 1_000, "l".to_string());
        timers.change(&mut input, 1_150, "la".to_string());
        timers.change(&mut input, 1_300, "lap".to_string());

        assert!(timers.advance(&mut input, 1_799).is_empty());
        assert_eq!(
            timers.advance(&mut input, 5_000),
            vec![(1_800, "lap".to_string())]
        );
    }

    #[test]
    fn test_separate_pauses_fire_separately() {
        let mut timers = FakeTimers::new(500);
        let mut input = Debounced::<&str>::default();
        timers.change(&mut input, 0, "a");
        assert_eq!(timers.advance(&mut input, 599), vec![(500, "a")]);
        timers.change(&mut input, 600, "ab");
        assert_eq!(timers.advance(&mut input, 2_000), vec![(1_100, "ab")]);
    }

    #[test]
    fn test_cancel_drops_pending_value() {
        let mut timers = FakeTimers::new(500);
        let mut input = Debounced::<&str>::default();
        timers.change(&mut input, 0, "printer");
        input.cancel();
        assert!(timers.advance(&mut input, 1_000).is_empty());
    }
}
