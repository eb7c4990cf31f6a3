//! Pixel helpers shared by codec backends

pub mod luma;
