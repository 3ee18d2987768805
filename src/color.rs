pub mod model;
pub mod names;
pub mod palette;
