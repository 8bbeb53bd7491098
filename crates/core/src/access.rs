//! Who may do what.
//!
//! The policy table is pure data; the database-backed part of the check
//! (existence and ownership lookups) lives in the service layer, which asks
//! this module what it has to verify and in which order.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

/// The authenticated caller, built once per request from token claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub user_id: DbId,
    pub is_admin: bool,
}

impl Principal {
    pub fn user(user_id: DbId) -> Self {
        Self {
            user_id,
            is_admin: false,
        }
    }

    pub fn admin(user_id: DbId) -> Self {
        Self {
            user_id,
            is_admin: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Get,
    Update,
    Delete,
    /// List, Search, Count and GeoJSON.
    Read,
}

impl Operation {
    pub fn verb(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Get => "get",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Read => "list",
        }
    }
}

/// How an entity type is protected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPolicy {
    /// Anyone may create and read; only the creator may update or delete.
    Owner,
    /// Anyone may list and count; every other operation needs an admin.
    AdminOnly,
}

impl AccessPolicy {
    pub fn requires_admin(self, op: Operation) -> bool {
        match self {
            Self::Owner => false,
            Self::AdminOnly => op != Operation::Read,
        }
    }

    pub fn requires_ownership(self, op: Operation) -> bool {
        match self {
            Self::Owner => matches!(op, Operation::Update | Operation::Delete),
            Self::AdminOnly => false,
        }
    }

    /// The part of the check that needs no I/O. Runs before any lookup.
    pub fn check_role(
        self,
        principal: &Principal,
        op: Operation,
        entity: &'static str,
    ) -> Result<(), CoreError> {
        if self.requires_admin(op) && !principal.is_admin {
            return Err(CoreError::AdminRequired(format!("{} {entity}", op.verb())));
        }
        Ok(())
    }
}
