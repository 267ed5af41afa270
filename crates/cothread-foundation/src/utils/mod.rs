pub mod global;
pub mod stack;

pub use global::GlobalOption;
pub use stack::DownwardStack;
