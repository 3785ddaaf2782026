// octane_core/src/lib.rs

// This file defines the public modules of the library.
pub mod abstractions;
pub mod config;
pub mod controller;
pub mod error;
pub mod input;
pub mod math;
pub mod prelude;
pub mod probe;

#[cfg(test)]
mod testing;
