//! Domain logic shared by the storage and transport layers.
//!
//! Nothing in this crate touches the database or the network.

pub mod access;
pub mod error;
pub mod pagination;
pub mod search;
pub mod types;
pub mod validation;
