use cfg_if::cfg_if;
use core::arch::naked_asm;
use foundation::utils::DownwardStack;
use foundation::{ArchContext, FramePointerContext};

/// Callee-saved state of the RISC-V psABI: ra, sp, s0-s11 and, with the D
/// extension, fs0-fs11.
///
/// gp and tp are process/OS-thread wide and deliberately stay untouched.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct Context {
    ra: u64,
    sp: u64,
    s: [u64; 12],
    fs: [u64; 12],
}

impl ArchContext for Context {
    fn new() -> Self {
        Self {
            ra: 0,
            sp: 0,
            s: [0; 12],
            fs: [0; 12],
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
        self.ra = entry as usize as u64;
        self.set_frame_pointer(0);
    }

    unsafe fn switch(from: *mut Self, to: *const Self) {
        unsafe { switch_context(from, to) }
    }
}

impl FramePointerContext for Context {
    fn set_frame_pointer(&mut self, fp: usize) {
        // s0 doubles as the frame pointer.
        self.s[0] = fp as u64;
    }
}

cfg_if! {
    if #[cfg(target_feature = "d")] {
        /// # Safety
        /// See [`ArchContext::switch`].
        #[unsafe(naked)]
        pub unsafe extern "C" fn switch_context(_from: *mut Context, _to: *const Context) {
            naked_asm!(
                "sd ra, 0(a0)",
                "sd sp, 8(a0)",
                "sd s0, 16(a0)",
                "sd s1, 24(a0)",
                "sd s2, 32(a0)",
                "sd s3, 40(a0)",
                "sd s4, 48(a0)",
                "sd s5, 56(a0)",
                "sd s6, 64(a0)",
                "sd s7, 72(a0)",
                "sd s8, 80(a0)",
                "sd s9, 88(a0)",
                "sd s10, 96(a0)",
                "sd s11, 104(a0)",
                "fsd fs0, 112(a0)",
                "fsd fs1, 120(a0)",
                "fsd fs2, 128(a0)",
                "fsd fs3, 136(a0)",
                "fsd fs4, 144(a0)",
                "fsd fs5, 152(a0)",
                "fsd fs6, 160(a0)",
                "fsd fs7, 168(a0)",
                "fsd fs8, 176(a0)",
                "fsd fs9, 184(a0)",
                "fsd fs10, 192(a0)",
                "fsd fs11, 200(a0)",

                "ld ra, 0(a1)",
                "ld sp, 8(a1)",
                "ld s0, 16(a1)",
                "ld s1, 24(a1)",
                "ld s2, 32(a1)",
                "ld s3, 40(a1)",
                "ld s4, 48(a1)",
                "ld s5, 56(a1)",
                "ld s6, 64(a1)",
                "ld s7, 72(a1)",
                "ld s8, 80(a1)",
                "ld s9, 88(a1)",
                "ld s10, 96(a1)",
                "ld s11, 104(a1)",
                "fld fs0, 112(a1)",
                "fld fs1, 120(a1)",
                "fld fs2, 128(a1)",
                "fld fs3, 136(a1)",
                "fld fs4, 144(a1)",
                "fld fs5, 152(a1)",
                "fld fs6, 160(a1)",
                "fld fs7, 168(a1)",
                "fld fs8, 176(a1)",
                "fld fs9, 184(a1)",
                "fld fs10, 192(a1)",
                "fld fs11, 200(a1)",

                "ret",
            )
        }
    } else {
        /// # Safety
        /// See [`ArchContext::switch`].
        #[unsafe(naked)]
        pub unsafe extern "C" fn switch_context(_from: *mut Context, _to: *const Context) {
            naked_asm!(
                "sd ra, 0(a0)",
                "sd sp, 8(a0)",
                "sd s0, 16(a0)",
                "sd s1, 24(a0)",
                "sd s2, 32(a0)",
                "sd s3, 40(a0)",
                "sd s4, 48(a0)",
                "sd s5, 56(a0)",
                "sd s6, 64(a0)",
                "sd s7, 72(a0)",
                "sd s8, 80(a0)",
                "sd s9, 88(a0)",
                "sd s10, 96(a0)",
                "sd s11, 104(a0)",

                "ld ra, 0(a1)",
                "ld sp, 8(a1)",
                "ld s0, 16(a1)",
                "ld s1, 24(a1)",
                "ld s2, 32(a1)",
                "ld s3, 40(a1)",
                "ld s4, 48(a1)",
                "ld s5, 56(a1)",
                "ld s6, 64(a1)",
                "ld s7, 72(a1)",
                "ld s8, 80(a1)",
                "ld s9, 88(a1)",
                "ld s10, 96(a1)",
                "ld s11, 104(a1)",

                "ret",
            )
        }
    }
}
