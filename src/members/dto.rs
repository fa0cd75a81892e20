use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::members::domain::model::MemberEntity;
use crate::utils::date::serializer;

// MemberDto is a data transfer object for Member service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct MemberDto {
    pub member_id: i64,
    pub version: i64,
    pub name: String,
    pub phone_number: String,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl MemberDto {
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

impl From<&MemberEntity> for MemberDto {
    fn from(other: &MemberEntity) -> Self {
        Self {
            member_id: other.member_id,
            version: other.version,
            name: other.name.to_string(),
            phone_number: other.phone_number.to_string(),
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

impl From<&MemberDto> for MemberEntity {
    fn from(other: &MemberDto) -> Self {
        Self {
            member_id: other.member_id,
            version: other.version,
            name: other.name.to_string(),
            phone_number: other.phone_number.to_string(),
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}
