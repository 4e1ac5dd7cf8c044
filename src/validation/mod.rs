//! Record validation shared by every storage backend.
//!
//! Checks run in a fixed order and the first failure wins: required fields,
//! role, duplicate email, duplicate phone. Comparisons are exact string
//! matches; nothing is trimmed or case-folded before it is stored.

use crate::errors::AppError;
use crate::models::{NewTeamMember, Role, TeamMember, TeamMemberPayload};

/// Validate a record about to be inserted.
pub fn validate_create(
    payload: TeamMemberPayload,
    existing: &[TeamMember],
) -> Result<NewTeamMember, AppError> {
    validate(payload, existing.iter())
}

/// Validate a replacement for record `id`. The record itself is left out of
/// the duplicate scan so it may keep its own phone and email.
pub fn validate_update(
    id: i64,
    payload: TeamMemberPayload,
    existing: &[TeamMember],
) -> Result<NewTeamMember, AppError> {
    validate(payload, existing.iter().filter(|member| member.id != id))
}

fn validate<'a>(
    payload: TeamMemberPayload,
    others: impl Iterator<Item = &'a TeamMember> + Clone,
) -> Result<NewTeamMember, AppError> {
    require("first_name", &payload.first_name)?;
    require("last_name", &payload.last_name)?;
    require("phone", &payload.phone)?;
    require("email", &payload.email)?;

    let role = Role::parse(&payload.role).ok_or_else(|| AppError::InvalidRole(payload.role))?;

    if others.clone().any(|member| member.email == payload.email) {
        return Err(AppError::DuplicateEmail);
    }
    if others.clone().any(|member| member.phone == payload.phone) {
        return Err(AppError::DuplicatePhone);
    }

    Ok(NewTeamMember {
        first_name: payload.first_name,
        last_name: payload.last_name,
        phone: payload.phone,
        email: payload.email,
        role,
    })
}

fn require(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(())
}
