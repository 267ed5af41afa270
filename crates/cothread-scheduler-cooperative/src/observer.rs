use crate::thread::Tid;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    Join(Tid),
    Sleep(Instant),
}

/// Something the scheduler did, reported to the configured [`Observer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Created { tid: Tid },
    Dispatched { prev: Tid, next: Tid },
    Blocked { tid: Tid, reason: BlockReason },
    Woken { tid: Tid },
    Exited { tid: Tid },
    Reclaimed { tid: Tid },
}

/// Hook for watching the scheduler without touching the algorithm.
///
/// Called while the scheduler is borrowed: implementations must not call any
/// scheduler operation.
pub trait Observer {
    fn on_event(&self, event: &Event);
}

/// Forwards every event to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl Observer for LogObserver {
    fn on_event(&self, event: &Event) {
        match *event {
            Event::Created { tid } => log::debug!("[sched] created thread {}", tid),
            Event::Dispatched { prev, next } => {
                log::trace!("[sched] switch {} -> {}", prev, next)
            }
            Event::Blocked {
                tid,
                reason: BlockReason::Join(target),
            } => log::debug!("[sched] thread {} joins thread {}", tid, target),
            Event::Blocked {
                tid,
                reason: BlockReason::Sleep(_),
            } => log::debug!("[sched] thread {} sleeps", tid),
            Event::Woken { tid } => log::debug!("[sched] thread {} woken", tid),
            Event::Exited { tid } => log::debug!("[sched] thread {} exited", tid),
            Event::Reclaimed { tid } => log::debug!("[sched] reclaimed thread {}", tid),
        }
    }
}
