//! SQLite-backed character store.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use traitmint_domain::{CharacterId, CharacterMetadata, CharacterPatch, TraitSignature};

use crate::infrastructure::ports::{CharacterStore, ClockPort, CreateOutcome, StoreError};

/// SQLite implementation of the character store.
///
/// Records are keyed by id; `INSERT OR IGNORE` gives an atomic create-if-absent.
/// With unique signatures enabled a `UNIQUE` index on the canonical signature
/// JSON turns trait duplicates into a store-level constraint. The index is
/// persistent: once created on a database it stays in force.
pub struct SqliteCharacterStore {
    pool: SqlitePool,
    clock: Arc<dyn ClockPort>,
}

impl SqliteCharacterStore {
    pub async fn new(
        db_path: &str,
        clock: Arc<dyn ClockPort>,
        unique_signatures: bool,
    ) -> Result<Self, StoreError> {
        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await
            .map_err(|e| StoreError::unavailable("connect", e))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS minted_characters (
                id INTEGER PRIMARY KEY,
                signature TEXT NOT NULL,
                record_json TEXT NOT NULL,
                minted_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| StoreError::unavailable("schema", e))?;

        if unique_signatures {
            sqlx::query(
                "CREATE UNIQUE INDEX IF NOT EXISTS idx_minted_characters_signature \
                 ON minted_characters (signature)",
            )
            .execute(&pool)
            .await
            .map_err(|e| StoreError::unavailable("schema", e))?;
        }

        Ok(Self { pool, clock })
    }

    fn row_id(id: CharacterId) -> Result<i64, StoreError> {
        i64::try_from(id.get())
            .map_err(|_| StoreError::serialization(format!("Character id {} exceeds SQLite INTEGER range", id)))
    }

    fn decode(json: &str) -> Result<CharacterMetadata, StoreError> {
        serde_json::from_str(json).map_err(StoreError::serialization)
    }
}

#[async_trait]
impl CharacterStore for SqliteCharacterStore {
    async fn exists(&self, id: CharacterId) -> Result<bool, StoreError> {
        let row = sqlx::query("SELECT 1 FROM minted_characters WHERE id = ?")
            .bind(Self::row_id(id)?)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::unavailable("exists", e))?;
        Ok(row.is_some())
    }

    async fn create(&self, record: &CharacterMetadata) -> Result<CreateOutcome, StoreError> {
        let row_id = Self::row_id(record.id())?;
        let minted_at = self.clock.now();
        let stamped = record.clone().stamped(minted_at);
        let signature =
            serde_json::to_string(&stamped.signature()).map_err(StoreError::serialization)?;
        let json = serde_json::to_string(&stamped).map_err(StoreError::serialization)?;

        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO minted_characters (id, signature, record_json, minted_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(row_id)
        .bind(signature)
        .bind(json)
        .bind(minted_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::unavailable("create", e))?;

        if result.rows_affected() == 1 {
            return Ok(CreateOutcome::Created { minted_at });
        }

        // Ignored: either the primary key or the signature index conflicted.
        if self.exists(record.id()).await? {
            Ok(CreateOutcome::IdTaken)
        } else {
            Ok(CreateOutcome::SignatureTaken)
        }
    }

    async fn patch(&self, id: CharacterId, patch: &CharacterPatch) -> Result<(), StoreError> {
        let row_id = Self::row_id(id)?;
        let Some(url) = &patch.asset_url else {
            return if self.exists(id).await? {
                Ok(())
            } else {
                Err(StoreError::not_found(id))
            };
        };

        // One statement, so the write lock is requested up front.
        let result = sqlx::query(
            "UPDATE minted_characters \
             SET record_json = json_set(record_json, '$.asset_url', ?) \
             WHERE id = ?",
        )
        .bind(url)
        .bind(row_id)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::unavailable("patch", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(id));
        }
        Ok(())
    }

    async fn get(&self, id: CharacterId) -> Result<Option<CharacterMetadata>, StoreError> {
        let row = sqlx::query("SELECT record_json FROM minted_characters WHERE id = ?")
            .bind(Self::row_id(id)?)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::unavailable("get", e))?;

        match row {
            Some(row) => {
                let json: String = row.get("record_json");
                Ok(Some(Self::decode(&json)?))
            }
            None => Ok(None),
        }
    }

    async fn list_signatures(&self) -> Result<Vec<TraitSignature>, StoreError> {
        let rows = sqlx::query("SELECT signature FROM minted_characters ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::unavailable("list_signatures", e))?;

        rows.iter()
            .map(|row| {
                let json: String = row.get("signature");
                serde_json::from_str(&json).map_err(StoreError::serialization)
            })
            .collect()
    }
}
