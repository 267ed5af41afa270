//! Execution contexts for user-level threads.
//!
//! Each architecture module provides a `Context` holding the callee-saved
//! registers and a naked `switch_context(from, to)` that stores the running
//! state into `from` and resumes `to`.

#![no_std]

use cfg_if::cfg_if;

pub mod stack;

cfg_if! {
    if #[cfg(all(target_arch = "x86_64", unix))] {
        mod x86_64;
        pub use x86_64::{switch_context, Context};
    } else if #[cfg(all(target_arch = "aarch64", unix))] {
        mod aarch64;
        pub use aarch64::{switch_context, Context};
    } else if #[cfg(all(target_arch = "riscv64", unix))] {
        mod riscv64;
        pub use riscv64::{switch_context, Context};
    } else {
        compile_error!("cothread-arch supports x86_64, aarch64 and riscv64 unix targets");
    }
}

pub use stack::Stack;
