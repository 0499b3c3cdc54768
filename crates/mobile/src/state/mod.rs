pub mod catalog;
pub mod runtime;
pub mod session;
