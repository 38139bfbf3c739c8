//! Accepting connections and choosing responses.

pub mod handler;
pub mod listener;
