#![no_std]

pub mod arch;
pub mod utils;

pub use arch::{ArchContext, FramePointerContext};
