//! One-second elapsed/countdown tracker for the playing phase.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use tokio::time::{Instant, interval_at};

/// Notification delivered to the registered observer on each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerEvent {
    /// Whole seconds since the playing phase began.
    Elapsed(u32),
    /// The time limit was reached. Sent once; ticking continues.
    Exceeded { elapsed: u32 },
}

/// Outcome of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub elapsed: u32,
    pub exceeded: bool,
}

impl Tick {
    /// Events in delivery order: the elapsed update, then the limit notice.
    pub fn events(self) -> impl Iterator<Item = TrackerEvent> {
        let exceeded = self.exceeded.then_some(TrackerEvent::Exceeded {
            elapsed: self.elapsed,
        });
        std::iter::once(TrackerEvent::Elapsed(self.elapsed)).chain(exceeded)
    }
}

/// Tick-by-tick state: elapsed seconds plus the one-shot exceeded flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElapsedTracker {
    limit_secs: u32,
    elapsed_secs: u32,
    exceeded: bool,
}

impl ElapsedTracker {
    /// `limit_secs == 0` means no limit.
    #[must_use]
    pub fn new(limit_secs: u32) -> Self {
        Self::starting_at(limit_secs, 0)
    }

    /// Continue a session that already ran for `elapsed_secs`.
    ///
    /// A limit that was already reached is not announced again.
    #[must_use]
    pub fn starting_at(limit_secs: u32, elapsed_secs: u32) -> Self {
        Self {
            limit_secs,
            elapsed_secs,
            exceeded: limit_secs > 0 && elapsed_secs >= limit_secs,
        }
    }

    pub fn tick(&mut self) -> Tick {
        self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        let exceeded = self.is_limited() && !self.exceeded && self.elapsed_secs >= self.limit_secs;
        if exceeded {
            self.exceeded = true;
        }
        Tick {
            elapsed: self.elapsed_secs,
            exceeded,
        }
    }

    #[must_use]
    pub fn limit_secs(&self) -> u32 {
        self.limit_secs
    }

    #[must_use]
    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    #[must_use]
    pub fn is_limited(&self) -> bool {
        self.limit_secs > 0
    }

    #[must_use]
    pub fn is_overtime(&self) -> bool {
        self.exceeded
    }

    /// Remaining seconds when limited, elapsed seconds otherwise.
    #[must_use]
    pub fn display_secs(&self) -> u32 {
        display_secs(self.limit_secs, self.elapsed_secs)
    }

    /// Share of the limit used, capped at 100. `None` when unlimited.
    #[must_use]
    pub fn progress_percent(&self) -> Option<u32> {
        progress_percent(self.limit_secs, self.elapsed_secs)
    }
}

/// Remaining seconds when `limit_secs > 0`, elapsed seconds otherwise.
#[must_use]
pub fn display_secs(limit_secs: u32, elapsed_secs: u32) -> u32 {
    if limit_secs > 0 {
        limit_secs.saturating_sub(elapsed_secs)
    } else {
        elapsed_secs
    }
}

/// Share of `limit_secs` used, capped at 100. `None` when unlimited.
#[must_use]
pub fn progress_percent(limit_secs: u32, elapsed_secs: u32) -> Option<u32> {
    if limit_secs == 0 {
        return None;
    }
    let percent = u64::from(elapsed_secs) * 100 / u64::from(limit_secs);
    Some(percent.min(100) as u32)
}

//
// ─── OBSERVER ──────────────────────────────────────────────────────────────────
//

const TICK: Duration = Duration::from_secs(1);

type Observer = Box<dyn FnMut(TrackerEvent)>;

/// Holds the observer a running tracker reports to.
///
/// The owner re-registers whenever what it wants done on a tick changes;
/// the tracker always calls whichever observer is registered at tick time.
#[derive(Clone, Default)]
pub struct ObserverSlot {
    observer: Rc<RefCell<Option<Observer>>>,
    version: Rc<Cell<u64>>,
}

impl ObserverSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current observer.
    pub fn register(&self, observer: impl FnMut(TrackerEvent) + 'static) {
        self.bump();
        *self.observer.borrow_mut() = Some(Box::new(observer));
    }

    /// Drop the current observer; later ticks go nowhere.
    pub fn clear(&self) {
        self.bump();
        *self.observer.borrow_mut() = None;
    }

    fn bump(&self) {
        self.version.set(self.version.get().wrapping_add(1));
    }

    fn notify(&self, event: TrackerEvent) {
        // Taken out while running so the observer may register or clear.
        let version = self.version.get();
        let taken = self.observer.borrow_mut().take();
        if let Some(mut observer) = taken {
            observer(event);
            if self.version.get() == version {
                *self.observer.borrow_mut() = Some(observer);
            }
        }
    }
}

//
// ─── DRIVER ────────────────────────────────────────────────────────────────────
//

/// Ticks an `ElapsedTracker` on a timer and reports to an `ObserverSlot`.
///
/// `run` never completes on its own. Dropping the future stops the timer,
/// and nothing is reported after that.
pub struct Tracker {
    state: ElapsedTracker,
    observers: ObserverSlot,
}

impl Tracker {
    #[must_use]
    pub fn new(limit_secs: u32, observers: ObserverSlot) -> Self {
        Self {
            state: ElapsedTracker::new(limit_secs),
            observers,
        }
    }

    /// Tick every second from now until dropped.
    pub async fn start(limit_secs: u32, observers: ObserverSlot) {
        Self::new(limit_secs, observers).run().await;
    }

    /// Resume counting from `elapsed_secs`.
    #[must_use]
    pub fn resuming_from(mut self, elapsed_secs: u32) -> Self {
        self.state = ElapsedTracker::starting_at(self.state.limit_secs(), elapsed_secs);
        self
    }

    pub async fn run(mut self) {
        let mut interval = interval_at(Instant::now() + TICK, TICK);
        loop {
            interval.tick().await;
            let tick = self.state.tick();
            for event in tick.events() {
                self.observers.notify(event);
            }
        }
    }
}
