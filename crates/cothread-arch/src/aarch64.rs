use core::arch::naked_asm;
use foundation::utils::DownwardStack;
use foundation::{ArchContext, FramePointerContext};

/// Callee-saved state of AAPCS64: x19-x28, fp, lr, sp and the low halves of v8-v15.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct Context {
    x: [u64; 10],
    fp: u64,
    lr: u64,
    sp: u64,
    d: [u64; 8],
}

impl ArchContext for Context {
    fn new() -> Self {
        Self {
            x: [0; 10],
            fp: 0,
            lr: 0,
            sp: 0,
            d: [0; 8],
        }
    }

    fn sp(&self) -> usize {
        self.sp as usize
    }

    fn set_sp(&mut self, sp: usize) {
        self.sp = sp as u64;
    }

    unsafe fn prepare(&mut self, stack_top: usize, entry: extern "C" fn() -> !) {
        let stack = DownwardStack::<u64>::new(stack_top);
        self.set_sp(stack.sp());
        self.lr = entry as usize as u64;
        self.set_frame_pointer(0);
    }

    unsafe fn switch(from: *mut Self, to: *const Self) {
        unsafe { switch_context(from, to) }
    }
}

impl FramePointerContext for Context {
    fn set_frame_pointer(&mut self, fp: usize) {
        self.fp = fp as u64;
    }
}

/// # Safety
/// See [`ArchContext::switch`].
#[unsafe(naked)]
pub unsafe extern "C" fn switch_context(_from: *mut Context, _to: *const Context) {
    naked_asm!(
        "mov x9, sp",
        "stp x19, x20, [x0, #0x00]",
        "stp x21, x22, [x0, #0x10]",
        "stp x23, x24, [x0, #0x20]",
        "stp x25, x26, [x0, #0x30]",
        "stp x27, x28, [x0, #0x40]",
        "stp x29, x30, [x0, #0x50]",
        "str x9, [x0, #0x60]",
        "stp d8, d9, [x0, #0x68]",
        "stp d10, d11, [x0, #0x78]",
        "stp d12, d13, [x0, #0x88]",
        "stp d14, d15, [x0, #0x98]",

        "ldp x19, x20, [x1, #0x00]",
        "ldp x21, x22, [x1, #0x10]",
        "ldp x23, x24, [x1, #0x20]",
        "ldp x25, x26, [x1, #0x30]",
        "ldp x27, x28, [x1, #0x40]",
        "ldp x29, x30, [x1, #0x50]",
        "ldr x9, [x1, #0x60]",
        "ldp d8, d9, [x1, #0x68]",
        "ldp d10, d11, [x1, #0x78]",
        "ldp d12, d13, [x1, #0x88]",
        "ldp d14, d15, [x1, #0x98]",
        "mov sp, x9",

        "ret",
    )
}
