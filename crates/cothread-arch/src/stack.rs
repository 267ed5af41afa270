use core::ptr::{self, NonNull};

/// An owned, page-aligned thread stack with an inaccessible guard page below it.
///
/// Overflowing into the guard page faults instead of silently corrupting the
/// neighbouring mapping. The mapping is released on drop.
#[derive(Debug)]
pub struct Stack {
    base: NonNull<u8>,
    mapped: usize,
    guard: usize,
}

impl Stack {
    /// Maps a stack with at least `size` usable bytes, rounded up to whole pages.
    ///
    /// Returns `None` when the kernel refuses the mapping.
    pub fn new(size: usize) -> Option<Self> {
        let page = page_size();
        let usable = size.max(1).checked_next_multiple_of(page)?;
        let mapped = usable.checked_add(page)?;

        cfg_if::cfg_if! {
            if #[cfg(target_os = "linux")] {
                let flags = libc::MAP_PRIVATE | libc::MAP_ANONYMOUS | libc::MAP_STACK;
            } else {
                let flags = libc::MAP_PRIVATE | libc::MAP_ANON;
            }
        }

        let raw = unsafe {
            libc::mmap(
                ptr::null_mut(),
                mapped,
                libc::PROT_READ | libc::PROT_WRITE,
                flags,
                -1,
                0,
            )
        };
        if raw == libc::MAP_FAILED {
            return None;
        }

        if unsafe { libc::mprotect(raw, page, libc::PROT_NONE) } != 0 {
            unsafe { libc::munmap(raw, mapped) };
            return None;
        }

        Some(Self {
            base: NonNull::new(raw.cast::<u8>())?,
            mapped,
            guard: page,
        })
    }

    /// Lowest usable address (just above the guard page).
    pub fn bottom(&self) -> usize {
        self.base.as_ptr() as usize + self.guard
    }

    /// One past the highest usable address; stacks grow down from here.
    pub fn top(&self) -> usize {
        self.base.as_ptr() as usize + self.mapped
    }

    pub fn size(&self) -> usize {
        self.mapped - self.guard
    }
}

impl Drop for Stack {
    fn drop(&mut self) {
        unsafe {
            libc::munmap(self.base.as_ptr().cast(), self.mapped);
        }
    }
}

fn page_size() -> usize {
    match unsafe { libc::sysconf(libc::_SC_PAGESIZE) } {
        n if n > 0 => n as usize,
        _ => 4096,
    }
}
