use core::marker::PhantomData;
use core::mem;
use core::ptr;

/// Cursor for laying out the initial frame of a fresh thread stack.
///
/// Stacks grow towards lower addresses, so every push moves `sp` down.
pub struct DownwardStack<T> {
    sp: usize,
    _marker: PhantomData<T>,
}

impl<T> DownwardStack<T> {
    /// The initial sp is aligned down to the ABI stack alignment of the target.
    #[inline]
    pub fn new(initial_sp: usize) -> Self {
        cfg_if::cfg_if! {
            if #[cfg(any(
                target_arch = "riscv64",
                target_arch = "x86_64",
                target_arch = "aarch64",
            ))] {
                let min_align = 16;
            } else {
                let min_align = 2 * mem::size_of::<usize>();
            }
        }

        let align = mem::align_of::<T>().max(min_align);
        Self {
            sp: initial_sp & !(align - 1),
            _marker: PhantomData,
        }
    }

    /// # Safety
    /// Caller must ensure there is writable stack space below the current sp.
    #[inline]
    pub unsafe fn push(&mut self, value: T) {
        self.sp -= mem::size_of::<T>();
        unsafe {
            ptr::write(self.sp as *mut T, value);
        }
    }

    #[inline]
    pub fn sp(&self) -> usize {
        self.sp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aligns_initial_sp_down() {
        let stack = DownwardStack::<usize>::new(0x1000_0017);
        assert_eq!(stack.sp(), 0x1000_0010);
    }

    #[test]
    fn push_walks_downwards() {
        let mut region = [0usize; 8];
        let top = region.as_mut_ptr() as usize + mem::size_of_val(&region);
        let mut stack = DownwardStack::<usize>::new(top);
        let start = stack.sp();

        unsafe {
            stack.push(0xdead);
            stack.push(0xbeef);
        }
        assert_eq!(stack.sp(), start - 2 * mem::size_of::<usize>());

        let sp = stack.sp() as *const usize;
        unsafe {
            assert_eq!(ptr::read(sp), 0xbeef);
            assert_eq!(ptr::read(sp.add(1)), 0xdead);
        }
    }
}
