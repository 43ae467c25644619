//! Audit log entries - append-only record of administrative mutations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::RecordId;

/// Kind of mutation recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
}

impl AuditAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }

    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "CREATE" => Some(Self::Create),
            "UPDATE" => Some(Self::Update),
            "DELETE" => Some(Self::Delete),
            _ => None,
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entity an entry refers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditTarget {
    One(String),
    /// Batch operations such as reorder
    Multiple,
}

impl AuditTarget {
    pub const MULTIPLE: &'static str = "multiple";

    pub fn record(id: RecordId) -> Self {
        Self::One(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::One(id) => id,
            Self::Multiple => Self::MULTIPLE,
        }
    }

    pub fn from_db(value: String) -> Self {
        if value == Self::MULTIPLE {
            Self::Multiple
        } else {
            Self::One(value)
        }
    }
}

/// The administrator behind a mutation, as resolved by the identity provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: String,
    pub name: String,
}

impl Actor {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Immutable audit log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditLogEntry {
    pub id: RecordId,
    pub action: AuditAction,
    pub entity_type: String,
    pub entity_id: AuditTarget,
    pub actor_id: String,
    pub actor_name: String,
    pub created_at: DateTime<Utc>,
}

impl AuditLogEntry {
    pub fn new(
        id: RecordId,
        action: AuditAction,
        entity_type: impl Into<String>,
        entity_id: AuditTarget,
        actor: &Actor,
    ) -> Self {
        Self {
            id,
            action,
            entity_type: entity_type.into(),
            entity_id,
            actor_id: actor.id.clone(),
            actor_name: actor.name.clone(),
            created_at: Utc::now(),
        }
    }
}
