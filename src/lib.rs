//! Driver for the standalone `uqsim` executable of the NASA UQ challenge problem:
//! builds and runs the simulation command, then plots the time-series files it writes.

pub mod case;
pub mod config;
pub mod error;
pub mod handlers;
pub mod plot;
pub mod printer;
pub mod table;
pub mod utils;
pub mod viewer;

pub use error::{Result, UqError};
