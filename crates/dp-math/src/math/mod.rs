//! Core math modules.

pub mod beta;
pub mod binomial;
pub mod grid;
pub mod stable;
