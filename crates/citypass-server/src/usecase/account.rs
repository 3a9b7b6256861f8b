//! Account usecase

use std::sync::Arc;

use citypass_core::Result;
use citypass_types::Account;

use crate::storage::AccountRepository;

pub struct AccountUsecase {
    repo: Arc<dyn AccountRepository>,
}

impl AccountUsecase {
    pub fn new(repo: Arc<dyn AccountRepository>) -> Self {
        Self { repo }
    }

    pub async fn create_account(&self, email: &str, fullname: &str) -> Result<i64> {
        let account = Account::new(email, fullname);
        self.repo.create(&account).await
    }

    pub async fn get_account(&self, account_id: i64) -> Result<Account> {
        self.repo.find_by_id(account_id).await
    }

    pub async fn get_accounts(&self) -> Result<Vec<Account>> {
        self.repo.find_all().await
    }

    /// Read-modify-write: load the full record, overwrite the mutable
    /// attribute fields, and write the whole copy back. Fields not passed
    /// here (such as `created_at`) survive because the read returns a fully
    /// populated record. No locking; concurrent updates to the same id may
    /// interleave.
    pub async fn update_account(&self, account_id: i64, email: &str, fullname: &str) -> Result<()> {
        let mut account = self.repo.find_by_id(account_id).await?;

        account.email = email.to_string();
        account.fullname = fullname.to_string();

        self.repo.update(&account).await
    }
}
