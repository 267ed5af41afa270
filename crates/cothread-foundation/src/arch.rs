/// Saved execution state of one user-level thread.
///
/// Implementations hold only what the platform ABI marks callee-saved, since a
/// switch always happens at a call boundary. The actual struct layout is
/// private to the architecture crate; the scheduler only goes through this trait.
pub trait ArchContext: Sized {
    fn new() -> Self;

    fn sp(&self) -> usize;
    fn set_sp(&mut self, sp: usize);

    /// Seeds a context that starts executing `entry` on a fresh stack whose
    /// highest usable address is `stack_top`.
    ///
    /// # Safety
    /// `stack_top` must be the end of a writable region large enough for the
    /// initial frame and everything `entry` runs.
    unsafe fn prepare(&mut self, stack_top: usize, entry: extern "C" fn() -> !);

    /// Saves the running state into `from` and resumes `to`.
    ///
    /// Returns only when some later switch resumes `from`.
    ///
    /// # Safety
    /// Both pointers must be valid and `to` must hold either a prepared context or
    /// one saved by a previous switch whose stack is still alive.
    unsafe fn switch(from: *mut Self, to: *const Self);
}

pub trait FramePointerContext {
    fn set_frame_pointer(&mut self, fp: usize);
}
