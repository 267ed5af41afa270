use core::arch::naked_asm;
use foundation::utils::DownwardStack;
use foundation::{ArchContext, FramePointerContext};

const MXCSR_DEFAULT: u32 = 0x1f80;
const FPU_CW_DEFAULT: u16 = 0x037f;

/// Callee-saved state of the System V AMD64 ABI.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct Context {
    rsp: u64,
    rbp: u64,
    rbx: u64,
    r12: u64,
    r13: u64,
    r14: u64,
    r15: u64,
    mxcsr: u32,
    fpu_cw: u16,
    _pad: u16,
}

impl ArchContext for Context {
    fn new() -> Self {
        Self {
            rsp: 0,
            rbp: 0,
            rbx: 0,
            r12: 0,
            r13: 0,
            r14: 0,
            r15: 0,
            mxcsr: MXCSR_DEFAULT,
            fpu_cw: FPU_CW_DEFAULT,
            _pad: 0,
        }
    }

    fn sp(&self) -> usize {
        self.rsp as usize
    }

    fn set_sp(&mut self, sp: usize) {
        self.rsp = sp as u64;
    }

    unsafe fn prepare(&mut self, stack_top: usize, entry: extern "C" fn() -> !) {
        // `ret` in switch_context pops the entry address; the zero above it
        // stands in for the return address of a call, so the entry sees
        // rsp % 16 == 8 like any other function.
        let mut stack = DownwardStack::<usize>::new(stack_top);
        unsafe {
            stack.push(0);
            stack.push(entry as usize);
        }
        self.set_sp(stack.sp());
        self.set_frame_pointer(0);
    }

    unsafe fn switch(from: *mut Self, to: *const Self) {
        unsafe { switch_context(from, to) }
    }
}

impl FramePointerContext for Context {
    fn set_frame_pointer(&mut self, fp: usize) {
        self.rbp = fp as u64;
    }
}

/// # Safety
/// See [`ArchContext::switch`].
#[unsafe(naked)]
pub unsafe extern "C" fn switch_context(_from: *mut Context, _to: *const Context) {
    naked_asm!(
        "mov [rdi + 0x00], rsp",
        "mov [rdi + 0x08], rbp",
        "mov [rdi + 0x10], rbx",
        "mov [rdi + 0x18], r12",
        "mov [rdi + 0x20], r13",
        "mov [rdi + 0x28], r14",
        "mov [rdi + 0x30], r15",
        "stmxcsr [rdi + 0x38]",
        "fnstcw [rdi + 0x3c]",

        "mov rsp, [rsi + 0x00]",
        "mov rbp, [rsi + 0x08]",
        "mov rbx, [rsi + 0x10]",
        "mov r12, [rsi + 0x18]",
        "mov r13, [rsi + 0x20]",
        "mov r14, [rsi + 0x28]",
        "mov r15, [rsi + 0x30]",
        "ldmxcsr [rsi + 0x38]",
        "fldcw [rsi + 0x3c]",

        // Resumes after the switch_context call that saved `to`, or enters a
        // prepared thread at its entry point.
        "ret",
    )
}
