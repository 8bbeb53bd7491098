//! Authentication primitives.
//!
//! - [`jwt`] -- HS256 token validation ([`jwt::JwtChecker`]) and issuance for tooling.

pub mod jwt;
