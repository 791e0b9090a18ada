//! Command line interface.

pub mod build;
pub mod dump;
pub mod evaluate;
pub mod field;
pub mod run;
pub mod utils;
