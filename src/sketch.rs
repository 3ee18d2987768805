pub mod circuits;
pub mod jitter;
