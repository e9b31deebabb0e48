pub mod deploy;
pub mod hook;
pub mod trigger;
