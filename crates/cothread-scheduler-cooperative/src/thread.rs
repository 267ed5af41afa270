use arch::{Context, Stack};
use foundation::ArchContext;
use std::fmt;
use std::time::Instant;

pub type Tid = usize;

/// The idle thread: always in the ring, never blocks, never exits.
pub const IDLE_TID: Tid = 0;
/// The thread that called `init`, running on the OS thread's own stack.
pub const MAIN_TID: Tid = 1;

pub(crate) type Entry = Box<dyn FnOnce()>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadState {
    Running,
    Ready,
    Blocked,
    Terminated,
}

impl ThreadState {
    /// Single-letter tag used by the status dump.
    pub fn as_char(self) -> char {
        match self {
            ThreadState::Running => 'R',
            ThreadState::Ready => 'P',
            ThreadState::Blocked => 'B',
            ThreadState::Terminated => 'T',
        }
    }
}

pub struct ThreadControlBlock {
    pub context: Context,

    pub tid: Tid,

    pub state: ThreadState,

    /// `None` for the main thread, which lives on the OS stack.
    pub stack: Option<Stack>,

    /// Consumed by the entry trampoline on first dispatch.
    pub(crate) entry: Option<Entry>,

    pub wake_time: Option<Instant>,

    pub joiners: Vec<Tid>,
}

impl ThreadControlBlock {
    /// A thread that starts in `trampoline` on `stack` and then runs `entry`.
    pub(crate) fn new(
        tid: Tid,
        stack: Stack,
        trampoline: extern "C" fn() -> !,
        entry: Entry,
    ) -> Self {
        let mut context = Context::new();
        unsafe { context.prepare(stack.top(), trampoline) };

        Self {
            context,
            tid,
            state: ThreadState::Ready,
            stack: Some(stack),
            entry: Some(entry),
            wake_time: None,
            joiners: Vec::new(),
        }
    }

    /// The caller of `init`; its context is filled in by the first switch away.
    pub(crate) fn adopt_current(tid: Tid) -> Self {
        Self {
            context: Context::new(),
            tid,
            state: ThreadState::Running,
            stack: None,
            entry: None,
            wake_time: None,
            joiners: Vec::new(),
        }
    }

    pub fn is_terminated(&self) -> bool {
        self.state == ThreadState::Terminated
    }
}

impl fmt::Debug for ThreadControlBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThreadControlBlock")
            .field("tid", &self.tid)
            .field("state", &self.state)
            .field("stack", &self.stack.as_ref().map(Stack::size))
            .field("wake_time", &self.wake_time)
            .field("joiners", &self.joiners)
            .finish()
    }
}
