//! Fire growth projection.

pub mod persistence;

pub use persistence::{persist_fires, Persistence};
