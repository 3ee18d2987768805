pub mod provider;
pub mod svg;
