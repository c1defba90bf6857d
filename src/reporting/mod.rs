pub mod accumulator;
pub mod engine;
pub mod presenter;
pub mod rounding;
