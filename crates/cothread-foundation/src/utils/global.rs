use core::cell::RefCell;

/// A lazily filled slot for state owned by one OS thread.
///
/// Meant to sit inside a `thread_local!`. Access is scoped: the borrow taken by
/// `with_some_mut` ends when the closure returns, so nothing may hold on to the
/// value across a context switch.
pub struct GlobalOption<T> {
    inner: RefCell<Option<T>>,
}

impl<T> GlobalOption<T> {
    pub const fn none() -> Self {
        Self {
            inner: RefCell::new(None),
        }
    }

    pub fn is_some(&self) -> bool {
        self.inner.borrow().is_some()
    }

    /// Fills the slot, handing the value back if it is already occupied.
    pub fn set(&self, value: T) -> Result<(), T> {
        let mut slot = self.inner.borrow_mut();
        if slot.is_some() {
            return Err(value);
        }
        *slot = Some(value);
        Ok(())
    }

    #[inline(always)]
    pub fn with_some<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.inner.borrow().as_ref().map(f)
    }

    /// # Panics
    /// Panics if called reentrantly from inside another access to the same slot.
    #[inline(always)]
    pub fn with_some_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        self.inner.borrow_mut().as_mut().map(f)
    }
}

impl<T> Default for GlobalOption<T> {
    fn default() -> Self {
        Self::none()
    }
}
