// Common test utilities
#![allow(dead_code)]

pub mod harness;
pub mod memory;
pub mod postgres;

pub use harness::*;
pub use memory::*;
