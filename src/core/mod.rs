pub mod calendar;
pub mod currency;
pub mod entity;
pub mod instruction;
pub mod operation;
