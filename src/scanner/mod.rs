//! Directory scanning logic

mod walker;

pub use walker::FileWalker;
