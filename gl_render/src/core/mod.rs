pub mod math;
pub mod platform;
pub mod rendering;
