//! Browser-side adapters for the domain seams (logging, time, timers).

pub mod services;

pub use services::*;
