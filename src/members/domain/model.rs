use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::utils::date::serializer;

// MemberEntity abstracts a registered borrower of the library.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct MemberEntity {
    pub member_id: i64,
    pub version: i64,
    pub name: String,
    pub phone_number: String,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl MemberEntity {
    pub fn new(name: &str, phone_number: &str) -> Self {
        Self {
            member_id: 0,
            version: 0,
            name: name.to_string(),
            phone_number: phone_number.to_string(),
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}
