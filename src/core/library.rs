use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum LibraryError {
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    AccessDenied {
        message: String,
        reason_code: Option<String>,
    },
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    OutOfStock {
        message: String,
    },
    AlreadyReturned {
        message: String,
    },
    AlreadyExtended {
        message: String,
    },
    // This is a retry-able error, which indicates that the store throttled or dropped the request.
    // The caller can retry the operation with or without a backoff.
    CurrentlyUnavailable {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    // The custom calendar could not be read from the store; lending continues with no holidays known.
    PolicyLoad {
        message: String,
    },
    // No lending day was found within the configured scan bound.
    ScheduleUnreachable {
        message: String,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    Serialization {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
}

impl LibraryError {
    pub fn database(message: &str, reason_code: Option<String>, retryable: bool) -> LibraryError {
        LibraryError::Database { message: message.to_string(), reason_code, retryable }
    }

    pub fn access_denied(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::AccessDenied { message: message.to_string(), reason_code }
    }

    pub fn duplicate_key(message: &str) -> LibraryError {
        LibraryError::DuplicateKey { message: message.to_string() }
    }

    pub fn not_found(message: &str) -> LibraryError {
        LibraryError::NotFound { message: message.to_string() }
    }

    pub fn out_of_stock(message: &str) -> LibraryError {
        LibraryError::OutOfStock { message: message.to_string() }
    }

    pub fn already_returned(message: &str) -> LibraryError {
        LibraryError::AlreadyReturned { message: message.to_string() }
    }

    pub fn already_extended(message: &str) -> LibraryError {
        LibraryError::AlreadyExtended { message: message.to_string() }
    }

    pub fn unavailable(message: &str, reason_code: Option<String>, retryable: bool) -> LibraryError {
        LibraryError::CurrentlyUnavailable { message: message.to_string(), reason_code, retryable }
    }

    pub fn policy_load(message: &str) -> LibraryError {
        LibraryError::PolicyLoad { message: message.to_string() }
    }

    pub fn schedule_unreachable(message: &str) -> LibraryError {
        LibraryError::ScheduleUnreachable { message: message.to_string() }
    }

    pub fn database_or_unavailable(message: &str, reason: Option<String>, retryable: bool) -> LibraryError {
        if retryable {
            LibraryError::unavailable(
                format!("ddb database unavailable error {:?} {:?}", message, reason).as_str(), reason, true)
        } else if let Some(ref reason_val) = reason {
            if reason_val.as_str().contains("404") {
                LibraryError::not_found(
                    format!("not found error {:?} {:?}", message, reason).as_str())
            } else if reason_val.as_str().contains("400") {
                LibraryError::access_denied(
                    format!("access-denied error {:?} {:?}", message, reason).as_str(), reason)
            } else {
                LibraryError::database(
                    format!("ddb database error {:?} {:?}", message, reason).as_str(), reason, false)
            }
        } else {
            LibraryError::database(
                format!("ddb database error {:?} {:?}", message, reason).as_str(), reason, false)
        }
    }

    pub fn validation(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Validation { message: message.to_string(), reason_code }
    }

    pub fn serialization(message: &str) -> LibraryError {
        LibraryError::Serialization { message: message.to_string() }
    }

    pub fn runtime(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Runtime { message: message.to_string(), reason_code }
    }

    pub fn retryable(&self) -> bool {
        match self {
            LibraryError::Database { retryable, .. } => { *retryable }
            LibraryError::CurrentlyUnavailable { retryable, .. } => { *retryable }
            _ => { false }
        }
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::serialization(
            format!("serde json parsing {:?}", err).as_str())
    }
}

impl From<String> for LibraryError {
    fn from(err: String) -> Self {
        LibraryError::serialization(
            format!("serde parsing {:?}", err).as_str())
    }
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::Database { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            LibraryError::AccessDenied { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::DuplicateKey { message } => {
                write!(f, "{}", message)
            }
            LibraryError::NotFound { message } => {
                write!(f, "{}", message)
            }
            LibraryError::OutOfStock { message } => {
                write!(f, "{}", message)
            }
            LibraryError::AlreadyReturned { message } => {
                write!(f, "{}", message)
            }
            LibraryError::AlreadyExtended { message } => {
                write!(f, "{}", message)
            }
            LibraryError::CurrentlyUnavailable { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            LibraryError::PolicyLoad { message } => {
                write!(f, "{}", message)
            }
            LibraryError::ScheduleUnreachable { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Validation { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::Serialization { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Runtime { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
        }
    }
}

impl std::error::Error for LibraryError {}

/// A specialized Result type for the lending engine.
pub type LibraryResult<T> = Result<T, LibraryError>;

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub(crate) enum LoanStatus {
    Active,
    Returned,
}

impl From<String> for LoanStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Active" => LoanStatus::Active,
            "Returned" => LoanStatus::Returned,
            _ => LoanStatus::Active,
        }
    }
}

impl Display for LoanStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            LoanStatus::Active => write!(f, "Active"),
            LoanStatus::Returned => write!(f, "Returned"),
        }
    }
}

// CalendarKind selects which non-lending days the scheduler skips.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub(crate) enum CalendarKind {
    Weekend,
    Custom,
    WeekendAndCustom,
    Anniversary,
    WeekendAndAnniversary,
}

impl From<String> for CalendarKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Weekend" => CalendarKind::Weekend,
            "Custom" => CalendarKind::Custom,
            "WeekendAndCustom" => CalendarKind::WeekendAndCustom,
            "Anniversary" => CalendarKind::Anniversary,
            "WeekendAndAnniversary" => CalendarKind::WeekendAndAnniversary,
            _ => CalendarKind::WeekendAndCustom,
        }
    }
}

impl Display for CalendarKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            CalendarKind::Weekend => write!(f, "Weekend"),
            CalendarKind::Custom => write!(f, "Custom"),
            CalendarKind::WeekendAndCustom => write!(f, "WeekendAndCustom"),
            CalendarKind::Anniversary => write!(f, "Anniversary"),
            CalendarKind::WeekendAndAnniversary => write!(f, "WeekendAndAnniversary"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::library::{CalendarKind, LibraryError, LoanStatus};

    #[tokio::test]
    async fn test_should_create_not_found_error() {
        assert!(matches!(LibraryError::not_found("test"), LibraryError::NotFound{ message: _ }));
    }

    #[tokio::test]
    async fn test_should_create_lending_errors() {
        assert!(matches!(LibraryError::out_of_stock("test"), LibraryError::OutOfStock{ message: _ }));
        assert!(matches!(LibraryError::already_returned("test"), LibraryError::AlreadyReturned{ message: _ }));
        assert!(matches!(LibraryError::already_extended("test"), LibraryError::AlreadyExtended{ message: _ }));
        assert!(matches!(LibraryError::policy_load("test"), LibraryError::PolicyLoad{ message: _ }));
        assert!(matches!(LibraryError::schedule_unreachable("test"), LibraryError::ScheduleUnreachable{ message: _ }));
    }

    #[tokio::test]
    async fn test_should_create_database_or_unavailable_error() {
        assert!(matches!(LibraryError::database_or_unavailable("test", None, true), LibraryError::CurrentlyUnavailable{ message: _, reason_code: _, retryable: _ }));
        assert!(matches!(LibraryError::database_or_unavailable("test", Some("404".to_string()), false), LibraryError::NotFound{ message: _ }));
        assert!(matches!(LibraryError::database_or_unavailable("test", Some("400".to_string()), false), LibraryError::AccessDenied{ message: _, reason_code: _ }));
        assert!(matches!(LibraryError::database_or_unavailable("test", Some("500".to_string()), false), LibraryError::Database{ message: _, reason_code: _, retryable: _ }));
        assert!(matches!(LibraryError::database_or_unavailable("test", None, false), LibraryError::Database{ message: _, reason_code: _, retryable: _ }));
    }

    #[tokio::test]
    async fn test_should_create_retryable_error() {
        assert_eq!(false, LibraryError::database("test", None, false).retryable());
        assert_eq!(true, LibraryError::database("test", None, true).retryable());
        assert_eq!(false, LibraryError::unavailable("test", None, false).retryable());
        assert_eq!(true, LibraryError::unavailable("test", None, true).retryable());
        assert_eq!(false, LibraryError::out_of_stock("test").retryable());
        assert_eq!(false, LibraryError::validation("test", None).retryable());
    }

    #[tokio::test]
    async fn test_should_format_loan_status() {
        for status in [LoanStatus::Active, LoanStatus::Returned] {
            let str_status = LoanStatus::from(status.to_string());
            assert_eq!(status, str_status);
        }
    }

    #[tokio::test]
    async fn test_should_format_calendar_kind() {
        let kinds = vec![
            CalendarKind::Weekend,
            CalendarKind::Custom,
            CalendarKind::WeekendAndCustom,
            CalendarKind::Anniversary,
            CalendarKind::WeekendAndAnniversary,
        ];
        for kind in kinds {
            assert_eq!(kind, CalendarKind::from(kind.to_string()));
        }
        assert_eq!(CalendarKind::WeekendAndCustom, CalendarKind::from("bogus".to_string()));
    }
}
