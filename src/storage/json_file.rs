//! Flat-file JSON backend.
//!
//! The file holds the whole roster as one pretty-printed JSON array. Every
//! operation loads the full collection, changes it in memory and writes it
//! all back. Nothing serialises that read-modify-write sequence, so two
//! concurrent writers can interleave and the last one to write wins. Use it
//! for a single process with light traffic only.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;

use super::MemberStore;
use crate::errors::AppError;
use crate::models::{NewTeamMember, TeamMember};

/// Store that keeps the roster in a single JSON file.
pub struct JsonFileStore {
    path: PathBuf,
    /// Lowest id this process may still hand out.
    next_id: AtomicI64,
}

impl JsonFileStore {
    /// Open the store, creating an empty `[]` file when none exists yet.
    pub async fn open(path: &Path) -> Result<Self, AppError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        if !tokio::fs::try_exists(path).await? {
            tokio::fs::write(path, "[]").await?;
        }

        let store = Self {
            path: path.to_path_buf(),
            next_id: AtomicI64::new(1),
        };
        let members = store.load().await?;
        store
            .next_id
            .store(highest_id(&members).saturating_add(1), Ordering::SeqCst);

        tracing::info!(
            "Opened roster file {:?} with {} members",
            store.path,
            members.len()
        );
        Ok(store)
    }

    /// Read the whole roster. A missing or unparseable file reads as empty.
    async fn load(&self) -> Result<Vec<TeamMember>, AppError> {
        let contents = match tokio::fs::read(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        // Bytes that are not UTF-8 fail here too and take the same path.
        match serde_json::from_slice(&contents) {
            Ok(members) => Ok(members),
            Err(e) => {
                tracing::warn!(
                    "Roster file {:?} is not a valid member list ({}); treating it as empty",
                    self.path,
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    /// Overwrite the file with `members`.
    async fn persist(&self, members: &[TeamMember]) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(members)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }

    /// Reserve the next id: above every id in `members` and above every id
    /// already handed out by this process.
    fn allocate_id(&self, members: &[TeamMember]) -> Result<i64, AppError> {
        let floor = highest_id(members)
            .checked_add(1)
            .ok_or_else(id_space_exhausted)?;
        let previous = self
            .next_id
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |next| {
                next.max(floor).checked_add(1)
            })
            .map_err(|_| id_space_exhausted())?;
        Ok(previous.max(floor))
    }
}

fn highest_id(members: &[TeamMember]) -> i64 {
    members.iter().map(|m| m.id).max().unwrap_or(0)
}

fn id_space_exhausted() -> AppError {
    AppError::Internal("No team member ids left to assign".to_string())
}

#[async_trait]
impl MemberStore for JsonFileStore {
    async fn list_members(&self) -> Result<Vec<TeamMember>, AppError> {
        self.load().await
    }

    async fn get_member(&self, id: i64) -> Result<TeamMember, AppError> {
        self.load()
            .await?
            .into_iter()
            .find(|m| m.id == id)
            .ok_or_else(AppError::member_not_found)
    }

    async fn insert_member(&self, member: NewTeamMember) -> Result<TeamMember, AppError> {
        let mut members = self.load().await?;
        let created = member.with_id(self.allocate_id(&members)?);
        members.push(created.clone());
        self.persist(&members).await?;
        Ok(created)
    }

    async fn replace_member(
        &self,
        id: i64,
        member: NewTeamMember,
    ) -> Result<TeamMember, AppError> {
        let mut members = self.load().await?;
        let slot = members
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(AppError::member_not_found)?;
        *slot = member.with_id(id);
        let updated = slot.clone();
        self.persist(&members).await?;
        Ok(updated)
    }

    async fn delete_member(&self, id: i64) -> Result<(), AppError> {
        let mut members = self.load().await?;
        let before = members.len();
        members.retain(|m| m.id != id);
        if members.len() == before {
            return Err(AppError::member_not_found());
        }
        self.persist(&members).await
    }
}
