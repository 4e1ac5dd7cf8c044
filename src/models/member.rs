//! Team member model matching the frontend TeamMember interface.

use serde::{Deserialize, Serialize};

/// Access level of a team member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Regular,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Regular => "regular",
            Role::Admin => "admin",
        }
    }

    /// Parse the wire/storage representation. Matching is exact.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "regular" => Some(Role::Regular),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// A stored team member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub role: Role,
}

/// Request body for creating or replacing a team member.
///
/// Every field is required. `role` is kept as a raw string so that an
/// unknown value is reported by the validator rather than the JSON decoder.
#[derive(Debug, Clone, Deserialize)]
pub struct TeamMemberPayload {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub role: String,
}

/// A validated team member that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTeamMember {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub role: Role,
}

impl NewTeamMember {
    pub fn with_id(self, id: i64) -> TeamMember {
        TeamMember {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            email: self.email,
            role: self.role,
        }
    }
}

/// Response body for a successful delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub detail: String,
}
