//! Core math modules.

pub mod histogram;
pub mod compare;
