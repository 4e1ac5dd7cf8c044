//! SQLite backend.
//!
//! The table carries its own unique constraints on phone and email, so a
//! write that races past the validator still cannot persist a duplicate.

use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;

use super::MemberStore;
use crate::errors::AppError;
use crate::models::{NewTeamMember, Role, TeamMember};

/// Initialize the database connection pool and bootstrap the schema.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool, sqlx::Error> {
    // Ensure the parent directory exists
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

    let options = SqliteConnectOptions::from_str(&db_url)?
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    create_schema(&pool).await?;

    Ok(pool)
}

async fn create_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    // AUTOINCREMENT keeps ids from being handed out again after a delete.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS team_members (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            phone TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE,
            role TEXT NOT NULL CHECK (role IN ('regular', 'admin'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_team_members_first_name ON team_members(first_name);
        CREATE INDEX IF NOT EXISTS idx_team_members_last_name ON team_members(last_name);
        CREATE INDEX IF NOT EXISTS idx_team_members_role ON team_members(role);
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Relational store backed by a SQLite connection pool.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberStore for SqliteStore {
    async fn list_members(&self) -> Result<Vec<TeamMember>, AppError> {
        let rows = sqlx::query(
            "SELECT id, first_name, last_name, phone, email, role FROM team_members ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(member_from_row).collect()
    }

    async fn get_member(&self, id: i64) -> Result<TeamMember, AppError> {
        let row = sqlx::query(
            "SELECT id, first_name, last_name, phone, email, role FROM team_members WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => member_from_row(&row),
            None => Err(AppError::member_not_found()),
        }
    }

    async fn insert_member(&self, member: NewTeamMember) -> Result<TeamMember, AppError> {
        let result = sqlx::query(
            "INSERT INTO team_members (first_name, last_name, phone, email, role) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&member.first_name)
        .bind(&member.last_name)
        .bind(&member.phone)
        .bind(&member.email)
        .bind(member.role.as_str())
        .execute(&self.pool)
        .await?;

        Ok(member.with_id(result.last_insert_rowid()))
    }

    async fn replace_member(
        &self,
        id: i64,
        member: NewTeamMember,
    ) -> Result<TeamMember, AppError> {
        let result = sqlx::query(
            "UPDATE team_members SET first_name = ?, last_name = ?, phone = ?, email = ?, role = ? WHERE id = ?",
        )
        .bind(&member.first_name)
        .bind(&member.last_name)
        .bind(&member.phone)
        .bind(&member.email)
        .bind(member.role.as_str())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::member_not_found());
        }

        Ok(member.with_id(id))
    }

    async fn delete_member(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM team_members WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::member_not_found());
        }

        Ok(())
    }
}

fn member_from_row(row: &SqliteRow) -> Result<TeamMember, AppError> {
    let role: String = row.try_get("role")?;
    let role = Role::parse(&role)
        .ok_or_else(|| AppError::Internal(format!("Unknown role '{}' in database", role)))?;

    Ok(TeamMember {
        id: row.try_get("id")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        phone: row.try_get("phone")?,
        email: row.try_get("email")?,
        role,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn store() -> (SqliteStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let pool = init_database(&temp_dir.path().join("roster.sqlite"))
            .await
            .unwrap();
        (SqliteStore::new(pool), temp_dir)
    }

    fn member(phone: &str, email: &str) -> NewTeamMember {
        NewTeamMember {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
            role: Role::Admin,
        }
    }

    #[tokio::test]
    async fn test_uncreatable_directory_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let result = init_database(&blocker.join("data").join("roster.sqlite")).await;
        assert!(matches!(result, Err(sqlx::Error::Io(_))));
    }

    #[tokio::test]
    async fn test_insert_then_get_round_trip() {
        let (store, _dir) = store().await;

        let inserted = store.insert_member(member("111", "g@x.com")).await.unwrap();
        assert_eq!(inserted.id, 1);

        let fetched = store.get_member(inserted.id).await.unwrap();
        assert_eq!(fetched, member("111", "g@x.com").with_id(inserted.id));
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let (store, _dir) = store().await;

        store.insert_member(member("111", "a@x.com")).await.unwrap();
        let second = store.insert_member(member("222", "b@x.com")).await.unwrap();
        store.delete_member(second.id).await.unwrap();

        let third = store.insert_member(member("333", "c@x.com")).await.unwrap();
        assert!(third.id > second.id);
    }

    #[tokio::test]
    async fn test_unique_constraints_map_to_duplicate_errors() {
        let (store, _dir) = store().await;
        store.insert_member(member("111", "a@x.com")).await.unwrap();

        let err = store
            .insert_member(member("111", "other@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicatePhone));

        let err = store
            .insert_member(member("999", "a@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateEmail));

        assert_eq!(store.list_members().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_ids_are_not_found() {
        let (store, _dir) = store().await;

        assert!(matches!(
            store.get_member(42).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            store.replace_member(42, member("1", "x@x.com")).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            store.delete_member(42).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_replace_overwrites_all_fields() {
        let (store, _dir) = store().await;
        let inserted = store.insert_member(member("111", "a@x.com")).await.unwrap();

        let replacement = NewTeamMember {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            phone: "222".to_string(),
            email: "ada@x.com".to_string(),
            role: Role::Regular,
        };
        let updated = store
            .replace_member(inserted.id, replacement.clone())
            .await
            .unwrap();
        assert_eq!(updated, replacement.with_id(inserted.id));
        assert_eq!(store.get_member(inserted.id).await.unwrap(), updated);
    }
}
