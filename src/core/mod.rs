//! Core library functions for the catalog

pub mod statistics;

pub use statistics::compute_statistics;
