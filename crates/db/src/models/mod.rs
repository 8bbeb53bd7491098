//! Row types, input DTOs and filter grammars.

pub mod category;
pub mod filter;
pub mod record;
