//! Account store adapter

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use citypass_core::{AppError, Result};
use citypass_types::Account;
use sqlx::PgPool;

use super::run_query;
use crate::storage::AccountRepository;

pub struct PgAccountRepository {
    pool: PgPool,
    timeout: Duration,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    async fn create(&self, account: &Account) -> Result<i64> {
        let insert = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO accounts (user_email, user_fullname, created_at, updated_at)
            VALUES ($1, $2, now(), now())
            RETURNING account_id
            "#,
        )
        .bind(&account.email)
        .bind(&account.fullname)
        .fetch_one(&self.pool);

        run_query(self.timeout, "account create", insert).await
    }

    async fn find_by_id(&self, account_id: i64) -> Result<Account> {
        let select = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT account_id, user_email, user_fullname, created_at, updated_at
            FROM accounts
            WHERE account_id = $1
            "#,
        )
        .bind(account_id)
        .fetch_optional(&self.pool);

        let row = run_query(self.timeout, "account find_by_id", select).await?;
        row.map(Account::from).ok_or(AppError::AccountNotExists)
    }

    async fn find_all(&self) -> Result<Vec<Account>> {
        let select = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT account_id, user_email, user_fullname, created_at, updated_at
            FROM accounts
            "#,
        )
        .fetch_all(&self.pool);

        let rows = run_query(self.timeout, "account find_all", select).await?;
        Ok(rows.into_iter().map(Account::from).collect())
    }

    async fn update(&self, account: &Account) -> Result<()> {
        let update = sqlx::query(
            r#"
            UPDATE accounts
            SET user_email = $2, user_fullname = $3, updated_at = now()
            WHERE account_id = $1
            "#,
        )
        .bind(account.account_id)
        .bind(&account.email)
        .bind(&account.fullname)
        .execute(&self.pool);

        run_query(self.timeout, "account update", update).await?;
        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    account_id: i64,
    user_email: String,
    user_fullname: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<AccountRow> for Account {
    fn from(r: AccountRow) -> Self {
        Account {
            account_id: r.account_id,
            email: r.user_email,
            fullname: r.user_fullname,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}
