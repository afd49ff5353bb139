//! MySQL implementation of the committed two-factor secret repository.
//!
//! Backed by the `user_two_factor` table:
//!
//! ```sql
//! CREATE TABLE user_two_factor (
//!     user_id    VARCHAR(64)  PRIMARY KEY,
//!     secret     VARCHAR(128) NOT NULL,
//!     updated_at TIMESTAMP    NOT NULL DEFAULT CURRENT_TIMESTAMP
//!                             ON UPDATE CURRENT_TIMESTAMP
//! );
//! ```

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};

use kg_core::errors::CoreError;
use kg_core::repositories::two_factor::TwoFactorRepository;

/// MySQL implementation of TwoFactorRepository
pub struct MySqlTwoFactorRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlTwoFactorRepository {
    /// Create a new MySQL two-factor repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TwoFactorRepository for MySqlTwoFactorRepository {
    async fn committed_secret(&self, user_id: &str) -> Result<Option<String>, CoreError> {
        let row = sqlx::query("SELECT secret FROM user_two_factor WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| CoreError::infrastructure(format!("failed to load secret: {e}")))?;

        row.map(|r| {
            r.try_get("secret")
                .map_err(|e| CoreError::infrastructure(format!("failed to read secret: {e}")))
        })
        .transpose()
    }

    async fn commit(&self, user_id: &str, secret: &str) -> Result<(), CoreError> {
        let query = r#"
            INSERT INTO user_two_factor (user_id, secret)
            VALUES (?, ?)
            ON DUPLICATE KEY UPDATE secret = VALUES(secret)
        "#;

        sqlx::query(query)
            .bind(user_id)
            .bind(secret)
            .execute(&self.pool)
            .await
            .map_err(|e| CoreError::infrastructure(format!("failed to commit secret: {e}")))?;

        Ok(())
    }

    async fn clear(&self, user_id: &str) -> Result<(), CoreError> {
        sqlx::query("DELETE FROM user_two_factor WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| CoreError::infrastructure(format!("failed to clear secret: {e}")))?;

        Ok(())
    }
}
