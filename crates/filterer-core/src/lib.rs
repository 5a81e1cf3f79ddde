pub mod buffer;
pub mod chain;
pub mod error;
pub mod filters;
pub mod pixel;
pub mod session;
