//! Credit ledger over a single database transaction.
//!
//! A [`UnitOfWork`] owns the transaction a lifecycle step runs in. Balance
//! changes go through [`UnitOfWork::debit`] and [`UnitOfWork::credit`] so they
//! commit or roll back together with the rows that justify them. Dropping a
//! unit of work without calling [`UnitOfWork::commit`] rolls everything back.

use sqlx::{PgConnection, PgPool, Postgres, Transaction};
use tracing::debug;

use crate::common::{DomainError, UserId};

pub struct UnitOfWork {
    tx: Transaction<'static, Postgres>,
}

impl UnitOfWork {
    pub async fn begin(pool: &PgPool) -> Result<Self, DomainError> {
        Ok(Self {
            tx: pool.begin().await?,
        })
    }

    /// Connection for the non-ledger statements of this unit of work
    pub fn conn(&mut self) -> &mut PgConnection {
        &mut *self.tx
    }

    /// Take `amount` credits from `user_id`, locking the user row first.
    ///
    /// Returns the new balance.
    pub async fn debit(&mut self, user_id: UserId, amount: i32) -> Result<i32, DomainError> {
        let available = self.lock_balance(user_id).await?;

        if available < amount {
            return Err(DomainError::InsufficientCredits {
                required: amount,
                available,
            });
        }

        let balance = self.adjust(user_id, -amount).await?;
        debug!(user_id = %user_id, amount, balance, "Debited credits");
        Ok(balance)
    }

    /// Give `amount` credits to `user_id`. Zero is a no-op.
    ///
    /// Returns the new balance, or `None` when nothing was written.
    pub async fn credit(&mut self, user_id: UserId, amount: i32) -> Result<Option<i32>, DomainError> {
        if amount < 0 {
            return Err(DomainError::Internal(anyhow::anyhow!(
                "negative credit amount {amount}"
            )));
        }
        if amount == 0 {
            return Ok(None);
        }

        let balance = self.adjust(user_id, amount).await?;
        debug!(user_id = %user_id, amount, balance, "Credited credits");
        Ok(Some(balance))
    }

    pub async fn commit(self) -> Result<(), DomainError> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn lock_balance(&mut self, user_id: UserId) -> Result<i32, DomainError> {
        sqlx::query_scalar::<_, i32>("SELECT credits FROM users WHERE id = $1 FOR UPDATE")
            .bind(user_id)
            .fetch_optional(&mut *self.tx)
            .await?
            .ok_or(DomainError::NotFound("User"))
    }

    async fn adjust(&mut self, user_id: UserId, delta: i32) -> Result<i32, DomainError> {
        sqlx::query_scalar::<_, i32>(
            r#"
            UPDATE users
            SET credits = credits + $2, updated_at = NOW()
            WHERE id = $1
            RETURNING credits
            "#,
        )
        .bind(user_id)
        .bind(delta)
        .fetch_optional(&mut *self.tx)
        .await?
        .ok_or(DomainError::NotFound("User"))
    }
}
