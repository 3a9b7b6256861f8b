//! Error types for the citypass backend
//!
//! Every layer speaks this taxonomy. The typed not-found variants are
//! load-bearing: the cache layer must never cache them, and they map to a
//! different response code than generic internal failures.

use thiserror::Error;

/// Application error surfaced through the repository, usecase, and HTTP
/// layers. Errors propagate unchanged; nothing in the stack retries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("Status Bad Request")]
    BadRequest,

    #[error("Internal Server Error")]
    Internal,

    #[error("Wrong request params format, see example in data")]
    Decode,

    #[error("Account not exists")]
    AccountNotExists,

    #[error("Recreation not exists")]
    RecreationNotExists,

    #[error("Restaurant not exists")]
    RestaurantNotExists,

    #[error("Invalid Auth Token")]
    InvalidAuthToken,
}

/// HTTP status plus the application-level status code reported inside the
/// response envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCodes {
    pub http: u16,
    pub status: u32,
}

impl AppError {
    /// True for record-absent signals. These are never cached and never
    /// retried.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AppError::AccountNotExists
                | AppError::RecreationNotExists
                | AppError::RestaurantNotExists
        )
    }

    pub fn codes(&self) -> ErrorCodes {
        match self {
            AppError::BadRequest => ErrorCodes { http: 400, status: 100_101 },
            AppError::Internal => ErrorCodes { http: 500, status: 100_102 },
            AppError::Decode => ErrorCodes { http: 400, status: 100_201 },
            AppError::AccountNotExists => ErrorCodes { http: 400, status: 200_010 },
            AppError::RecreationNotExists => ErrorCodes { http: 400, status: 300_010 },
            AppError::RestaurantNotExists => ErrorCodes { http: 400, status: 400_010 },
            AppError::InvalidAuthToken => ErrorCodes { http: 401, status: 100_301 },
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_variants_are_flagged() {
        assert!(AppError::AccountNotExists.is_not_found());
        assert!(AppError::RecreationNotExists.is_not_found());
        assert!(AppError::RestaurantNotExists.is_not_found());
        assert!(!AppError::Internal.is_not_found());
        assert!(!AppError::Decode.is_not_found());
    }

    #[test]
    fn codes_match_the_envelope_table() {
        assert_eq!(AppError::Internal.codes(), ErrorCodes { http: 500, status: 100_102 });
        assert_eq!(AppError::Decode.codes(), ErrorCodes { http: 400, status: 100_201 });
        assert_eq!(
            AppError::AccountNotExists.codes(),
            ErrorCodes { http: 400, status: 200_010 }
        );
        assert_eq!(AppError::InvalidAuthToken.codes().http, 401);
    }

    #[test]
    fn messages_are_stable() {
        assert_eq!(AppError::AccountNotExists.to_string(), "Account not exists");
        assert_eq!(AppError::Internal.to_string(), "Internal Server Error");
    }
}
