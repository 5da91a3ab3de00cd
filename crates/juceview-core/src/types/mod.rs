//! # Types
//!
//! Small value types shared by the providers and hosts.

pub mod address;

pub use address::Address;
