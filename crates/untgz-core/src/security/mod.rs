//! Security validation modules.

pub mod path;

pub use path::resolve;
