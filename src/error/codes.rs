//! Error code constants.
//!
//! Error codes are organized by category:
//! - 2xxx: Authentication/Authorization errors
//! - 3xxx: Validation errors
//! - 5xxx: Internal/System errors

/// Error code type with semantic categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(i32);

impl ErrorCode {
    // ===== Authentication/Authorization Errors (2xxx) =====

    /// Authentication required.
    pub const UNAUTHORIZED: Self = Self(2001);

    /// Missing or wrong API credential.
    pub const FORBIDDEN: Self = Self(2002);

    /// Login rejected.
    pub const INVALID_LOGIN: Self = Self(2003);

    // ===== Validation Errors (3xxx) =====

    /// Malformed phone number or request body.
    pub const INVALID_INPUT: Self = Self(3001);

    // ===== Internal/System Errors (5xxx) =====

    /// Registry could not be persisted.
    pub const PERSISTENCE_ERROR: Self = Self(5001);

    /// Internal server error.
    pub const INTERNAL_ERROR: Self = Self(5002);

    /// Service unavailable.
    pub const SERVICE_UNAVAILABLE: Self = Self(5003);

    /// Get the error code as an i32.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }

    /// Get the category of this error code.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self.0 {
            2000..=2999 => ErrorCategory::Authentication,
            3000..=3999 => ErrorCategory::Validation,
            5000..=5999 => ErrorCategory::Internal,
            _ => ErrorCategory::Unknown,
        }
    }
}

/// Error category based on error code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Authentication/authorization errors (2xxx).
    Authentication,
    /// Validation errors (3xxx).
    Validation,
    /// Internal/system errors (5xxx).
    Internal,
    /// Unknown category.
    Unknown,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Authentication => write!(f, "authentication"),
            Self::Validation => write!(f, "validation"),
            Self::Internal => write!(f, "internal"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::FORBIDDEN.as_i32(), 2002);
        assert_eq!(ErrorCode::INVALID_INPUT.as_i32(), 3001);
        assert_eq!(ErrorCode::PERSISTENCE_ERROR.as_i32(), 5001);
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(
            ErrorCode::INVALID_LOGIN.category(),
            ErrorCategory::Authentication
        );
        assert_eq!(
            ErrorCode::INVALID_INPUT.category(),
            ErrorCategory::Validation
        );
        assert_eq!(
            ErrorCode::SERVICE_UNAVAILABLE.category(),
            ErrorCategory::Internal
        );
        assert_eq!(ErrorCode(42).category(), ErrorCategory::Unknown);
    }
}
