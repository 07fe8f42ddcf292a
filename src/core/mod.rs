// Shared math and helper utilities

pub mod math;

pub use math::RoundingMode;
