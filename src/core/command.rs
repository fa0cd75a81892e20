use async_trait::async_trait;
use crate::core::library::LibraryError;

#[derive(Debug)]
pub enum CommandError {
    Access {
        message: String,
        reason_code: Option<String>,
    },
    Conflict {
        message: String,
        reason_code: Option<String>,
    },
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Serialization {
        message: String,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
}

impl CommandError {
    pub fn validation(message: &str) -> CommandError {
        CommandError::Validation { message: message.to_string(), reason_code: Some("400".to_string()) }
    }
}

#[async_trait]
pub trait Command<Request, Response> {
    async fn execute(&self, req: Request) -> Result<Response, CommandError>;
}

// rejects identifiers that the text interface must supply as positive integers
pub(crate) fn require_positive_id(name: &str, id: i64) -> Result<i64, CommandError> {
    if id > 0 {
        Ok(id)
    } else {
        Err(CommandError::validation(format!("{} must be a positive integer but was {}", name, id).as_str()))
    }
}

impl From<LibraryError> for CommandError {
    fn from(other: LibraryError) -> Self {
        match other {
            LibraryError::Database { message, reason_code, retryable } => {
                CommandError::Database { message, reason_code, retryable }
            }
            LibraryError::AccessDenied { message, reason_code } => {
                CommandError::Access { message, reason_code }
            }
            LibraryError::DuplicateKey { message } => {
                CommandError::DuplicateKey { message }
            }
            LibraryError::NotFound { message } => {
                CommandError::NotFound { message }
            }
            LibraryError::OutOfStock { message } => {
                CommandError::Conflict { message, reason_code: Some("OutOfStock".to_string()) }
            }
            LibraryError::AlreadyReturned { message } => {
                CommandError::Conflict { message, reason_code: Some("AlreadyReturned".to_string()) }
            }
            LibraryError::AlreadyExtended { message } => {
                CommandError::Conflict { message, reason_code: Some("AlreadyExtended".to_string()) }
            }
            LibraryError::CurrentlyUnavailable { message, reason_code, retryable } => {
                CommandError::Runtime { message, reason_code, retryable }
            }
            LibraryError::PolicyLoad { message } => {
                CommandError::Runtime { message, reason_code: Some("PolicyLoad".to_string()), retryable: true }
            }
            LibraryError::ScheduleUnreachable { message } => {
                CommandError::Runtime { message, reason_code: Some("ScheduleUnreachable".to_string()), retryable: false }
            }
            LibraryError::Validation { message, reason_code } => {
                CommandError::Validation { message, reason_code }
            }
            LibraryError::Serialization { message } => {
                CommandError::Serialization { message }
            }
            LibraryError::Runtime { message, reason_code } if reason_code.as_deref() == Some("VersionConflict") => {
                CommandError::Conflict { message, reason_code }
            }
            LibraryError::Runtime { message, reason_code } => {
                CommandError::Runtime { message, reason_code, retryable: true }
            }
        }
    }
}
