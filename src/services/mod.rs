//! The habit engine: toggling a day's completion mark, and the values derived
//! from a snapshot of habits and logs.

pub mod completion;
pub mod streak;
pub mod toggle;
