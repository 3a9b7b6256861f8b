//! Account endpoints
//!
//! Create and get-one are public; the listing and update endpoints require
//! the static access token.

use std::time::Instant;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Response;
use citypass_core::AppError;
use citypass_types::Account;
use serde::{Deserialize, Serialize};

use crate::httputil::{self, JsonOrForm};
use crate::AppState;

/// Request body for both create and update. Missing fields decode to empty
/// strings.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountForm {
    pub user_email: String,
    pub user_fullname: String,
}

#[derive(Serialize)]
struct CreateAccountResponse {
    account_id: i64,
}

#[derive(Serialize)]
struct AccountData {
    account: Account,
}

#[derive(Serialize)]
struct AccountsData {
    accounts: Vec<Account>,
}

pub async fn create(
    State(state): State<AppState>,
    JsonOrForm(form): JsonOrForm<AccountForm>,
) -> Response {
    let started = Instant::now();

    match state
        .accounts
        .create_account(&form.user_email, &form.user_fullname)
        .await
    {
        Ok(account_id) => httputil::ok(
            started,
            &["Success create account"],
            CreateAccountResponse { account_id },
        ),
        Err(err) => httputil::error(started, err),
    }
}

pub async fn get(State(state): State<AppState>, Path(account_id): Path<String>) -> Response {
    let started = Instant::now();

    let Ok(account_id) = account_id.parse::<i64>() else {
        return httputil::error(started, AppError::BadRequest);
    };

    match state.accounts.get_account(account_id).await {
        Ok(account) => httputil::ok(started, &["Success get account"], AccountData { account }),
        Err(err) => httputil::error(started, err),
    }
}

pub async fn list(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let started = Instant::now();

    if let Err(err) = httputil::require_access_token(&headers, &state.access_token) {
        return httputil::error(started, err);
    }

    match state.accounts.get_accounts().await {
        Ok(accounts) => httputil::ok(
            started,
            &["Success get accounts"],
            AccountsData { accounts },
        ),
        Err(err) => httputil::error(started, err),
    }
}

pub async fn update(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
    headers: HeaderMap,
    JsonOrForm(form): JsonOrForm<AccountForm>,
) -> Response {
    let started = Instant::now();

    if let Err(err) = httputil::require_access_token(&headers, &state.access_token) {
        return httputil::error(started, err);
    }

    let Ok(account_id) = account_id.parse::<i64>() else {
        return httputil::error(started, AppError::BadRequest);
    };

    match state
        .accounts
        .update_account(account_id, &form.user_email, &form.user_fullname)
        .await
    {
        Ok(()) => httputil::ok(started, &["Success update account"], serde_json::Value::Null),
        Err(err) => httputil::error(started, err),
    }
}
