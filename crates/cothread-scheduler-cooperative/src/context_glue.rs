use crate::scheduler::{Dispatch, Scheduler};
use arch::Context;
use foundation::ArchContext;
use std::panic::{self, AssertUnwindSafe};
use std::process;

/// A pending transfer between two saved contexts.
///
/// Built while the scheduler is borrowed, performed after the borrow ends. The
/// pointers target contexts inside boxed control blocks, which do not move
/// while the threads are registered.
#[must_use]
pub(crate) struct Switch {
    from: *mut Context,
    to: *const Context,
}

impl Switch {
    /// # Safety
    /// No other reference to either control block may be alive, and both
    /// threads must still be registered.
    pub(crate) unsafe fn perform(self) {
        unsafe { Context::switch(self.from, self.to) }
    }
}

impl Scheduler {
    pub(crate) fn switch_for(&mut self, dispatch: Dispatch) -> Option<Switch> {
        if !dispatch.is_switch() {
            return None;
        }
        let to: *const Context = &self.tcb(dispatch.next).context;
        let from: *mut Context = &mut self.tcb_mut(dispatch.prev).context;
        Some(Switch { from, to })
    }

    pub(crate) fn take_entry(&mut self) -> Option<Box<dyn FnOnce()>> {
        let current = self.current;
        self.tcb_mut(current).entry.take()
    }
}

/// First code every created thread runs, on its own stack.
pub(crate) extern "C" fn thread_start() -> ! {
    let tid = crate::ops::self_id();
    match Scheduler::with_mut(Scheduler::take_entry).flatten() {
        Some(entry) => {
            // Unwinding cannot cross into the frame switch_context left behind.
            if panic::catch_unwind(AssertUnwindSafe(entry)).is_err() {
                log::error!("[sched] thread {} panicked, aborting", tid);
                process::abort();
            }
        }
        None => {
            log::error!("[sched] thread {} started without an entry point", tid);
            process::abort();
        }
    }
    crate::ops::exit()
}
