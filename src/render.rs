pub mod compositor;
pub mod cpu;
pub mod pipeline;
pub mod recording;
pub mod surface;
pub mod text;
