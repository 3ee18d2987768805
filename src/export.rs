pub mod encode;
pub mod sink;
