use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::Utc;

use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;
use crate::members::domain::model::MemberEntity;
use crate::members::repository::MemberRepository;
use crate::utils::ddb::{delete_condition_failed, next_sequence, number_value, parse_date_attribute, parse_item, parse_number_attribute, parse_string_attribute, put_condition_failed, string_date, update_condition_failed};

#[derive(Debug)]
pub(crate) struct DDBMemberRepository {
    client: Client,
    table_name: String,
}

impl DDBMemberRepository {
    pub(crate) fn new(client: Client, table_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
        }
    }
}

#[async_trait]
impl Repository<MemberEntity> for DDBMemberRepository {
    async fn create(&self, entity: &MemberEntity) -> LibraryResult<i64> {
        let table_name: &str = self.table_name.as_ref();
        let mut member = entity.clone();
        member.member_id = next_sequence(&self.client, table_name).await?;
        let val = serde_json::to_value(&member)?;
        match self.client
            .put_item()
            .table_name(table_name)
            .condition_expression("attribute_not_exists(member_id)")
            .set_item(Some(parse_item(val)?))
            .send()
            .await {
            Ok(_) => Ok(member.member_id),
            Err(err) if put_condition_failed(&err) => {
                Err(LibraryError::duplicate_key(format!("member {} already exists", member.member_id).as_str()))
            }
            Err(err) => Err(LibraryError::from(err)),
        }
    }

    async fn get(&self, id: i64) -> LibraryResult<MemberEntity> {
        let table_name: &str = self.table_name.as_ref();
        let res = self.client
            .get_item()
            .table_name(table_name)
            .key("member_id", number_value(id))
            .consistent_read(true)
            .send()
            .await.map_err(LibraryError::from)?;
        match res.item() {
            Some(map) => Ok(map_to_member(map)),
            None => Err(LibraryError::not_found(format!("member not found for {}", id).as_str())),
        }
    }
}

#[async_trait]
impl MemberRepository for DDBMemberRepository {
    async fn update(&self, entity: &MemberEntity) -> LibraryResult<usize> {
        let now = Utc::now().naive_utc();
        let table_name: &str = self.table_name.as_ref();

        let res = self.client
            .update_item()
            .table_name(table_name)
            .key("member_id", number_value(entity.member_id))
            .update_expression("SET #version = :version, #name = :name, phone_number = :phone_number, updated_at = :updated_at")
            .expression_attribute_names("#version", "version")
            .expression_attribute_names("#name", "name")
            .expression_attribute_values(":old_version", number_value(entity.version))
            .expression_attribute_values(":version", number_value(entity.version + 1))
            .expression_attribute_values(":name", AttributeValue::S(entity.name.to_string()))
            .expression_attribute_values(":phone_number", AttributeValue::S(entity.phone_number.to_string()))
            .expression_attribute_values(":updated_at", string_date(now))
            .condition_expression("attribute_exists(#version) AND #version = :old_version")
            .send()
            .await;
        match res {
            Ok(_) => Ok(1),
            Err(err) if update_condition_failed(&err) => {
                let _ = self.get(entity.member_id).await?;
                Err(LibraryError::runtime(format!("member {} was updated concurrently, version {} is stale",
                                                  entity.member_id, entity.version).as_str(), Some("VersionConflict".to_string())))
            }
            Err(err) => Err(LibraryError::from(err)),
        }
    }

    async fn delete(&self, id: i64) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        match self.client.delete_item()
            .table_name(table_name)
            .key("member_id", number_value(id))
            .condition_expression("attribute_exists(member_id)")
            .send()
            .await {
            Ok(_) => Ok(1),
            Err(err) if delete_condition_failed(&err) => {
                Err(LibraryError::not_found(format!("member not found for {}", id).as_str()))
            }
            Err(err) => Err(LibraryError::from(err)),
        }
    }

    async fn list(&self) -> LibraryResult<Vec<MemberEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let mut members = vec![];
        let mut exclusive_start_key = None;
        loop {
            let res = self.client
                .scan()
                .table_name(table_name)
                .consistent_read(true)
                .set_exclusive_start_key(exclusive_start_key)
                .send()
                .await.map_err(LibraryError::from)?;
            if let Some(items) = res.items() {
                members.extend(items.iter().map(map_to_member));
            }
            match res.last_evaluated_key() {
                Some(key) => exclusive_start_key = Some(key.clone()),
                None => break,
            }
        }
        members.sort_by_key(|m| m.member_id);
        Ok(members)
    }
}

fn map_to_member(map: &HashMap<String, AttributeValue>) -> MemberEntity {
    MemberEntity {
        member_id: parse_number_attribute("member_id", map),
        version: parse_number_attribute("version", map),
        name: parse_string_attribute("name", map).unwrap_or(String::from("")),
        phone_number: parse_string_attribute("phone_number", map).unwrap_or(String::from("")),
        created_at: parse_date_attribute("created_at", map).unwrap_or(Utc::now().naive_utc()),
        updated_at: parse_date_attribute("updated_at", map).unwrap_or(Utc::now().naive_utc()),
    }
}
