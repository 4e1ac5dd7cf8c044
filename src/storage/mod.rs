//! Storage backends for team member records.
//!
//! Handlers only see [`MemberStore`]; which backend sits behind it is decided
//! once at startup by [`open_store`].

mod json_file;
mod sqlite;

pub use json_file::*;
pub use sqlite::*;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{Config, StorageBackend};
use crate::errors::AppError;
use crate::models::{NewTeamMember, TeamMember};

/// Durable mapping from id to team member.
///
/// Unknown ids surface as [`AppError::NotFound`].
#[async_trait]
pub trait MemberStore: Send + Sync {
    async fn list_members(&self) -> Result<Vec<TeamMember>, AppError>;

    async fn get_member(&self, id: i64) -> Result<TeamMember, AppError>;

    /// Store a new record and return it with its assigned id.
    async fn insert_member(&self, member: NewTeamMember) -> Result<TeamMember, AppError>;

    /// Overwrite every field of record `id` except the id itself.
    async fn replace_member(&self, id: i64, member: NewTeamMember)
        -> Result<TeamMember, AppError>;

    async fn delete_member(&self, id: i64) -> Result<(), AppError>;
}

/// Open the backend selected by the configuration, bootstrapping its schema
/// or data file.
pub async fn open_store(config: &Config) -> Result<Arc<dyn MemberStore>, AppError> {
    match config.storage {
        StorageBackend::Sqlite => {
            let pool = init_database(&config.db_path).await?;
            Ok(Arc::new(SqliteStore::new(pool)))
        }
        StorageBackend::JsonFile => Ok(Arc::new(JsonFileStore::open(&config.data_file).await?)),
    }
}
