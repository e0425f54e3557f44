pub mod access;
pub mod dto;
pub mod error;
pub mod ports;
pub mod use_cases;
pub mod validation;
