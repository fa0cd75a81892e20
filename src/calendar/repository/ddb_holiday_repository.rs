use std::collections::HashMap;
use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use chrono::{NaiveDate, Utc};
use crate::calendar::domain::model::HolidayEntity;
use crate::calendar::repository::HolidayRepository;
use crate::core::library::{LibraryError, LibraryResult};
use crate::utils::ddb::{parse_date_attribute, parse_day_attribute, parse_item, parse_string_attribute, put_condition_failed, string_day};

#[derive(Debug)]
pub struct DDBHolidayRepository {
    client: Client,
    table_name: String,
}

impl DDBHolidayRepository {
    pub(crate) fn new(client: Client, table_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
        }
    }
}

#[async_trait]
impl HolidayRepository for DDBHolidayRepository {
    async fn find_all(&self) -> LibraryResult<Vec<HolidayEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let mut holidays = vec![];
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
                holidays.extend(items.iter().filter_map(map_to_holiday));
            }
            match res.last_evaluated_key() {
                Some(key) => exclusive_start_key = Some(key.clone()),
                None => break,
            }
        }
        holidays.sort_by_key(|h| h.holiday_date);
        Ok(holidays)
    }

    async fn create(&self, entity: &HolidayEntity) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        let val = serde_json::to_value(entity)?;
        match self.client
            .put_item()
            .table_name(table_name)
            .condition_expression("attribute_not_exists(holiday_date)")
            .set_item(Some(parse_item(val)?))
            .send()
            .await {
            Ok(_) => Ok(1),
            Err(err) if put_condition_failed(&err) => {
                Err(LibraryError::duplicate_key(format!("holiday {} already exists", entity.holiday_date).as_str()))
            }
            Err(err) => Err(LibraryError::from(err)),
        }
    }

    async fn delete(&self, holiday_date: NaiveDate) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        let res = self.client.delete_item()
            .table_name(table_name)
            .key("holiday_date", string_day(holiday_date))
            .return_values(ReturnValue::AllOld)
            .send()
            .await.map_err(LibraryError::from)?;
        Ok(res.attributes().map(|_| 1).unwrap_or(0))
    }
}

fn map_to_holiday(map: &HashMap<String, AttributeValue>) -> Option<HolidayEntity> {
    Some(HolidayEntity {
        holiday_date: parse_day_attribute("holiday_date", map)?,
        description: parse_string_attribute("description", map).unwrap_or(String::from("")),
        created_at: parse_date_attribute("created_at", map).unwrap_or(Utc::now().naive_utc()),
    })
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use aws_sdk_dynamodb::Client;
    use chrono::NaiveDate;
    use lazy_static::lazy_static;
    use crate::calendar::domain::model::HolidayEntity;
    use crate::calendar::repository::ddb_holiday_repository::DDBHolidayRepository;
    use crate::calendar::repository::HolidayRepository;
    use crate::core::library::LibraryError;
    use crate::core::repository::RepositoryStore;
    use crate::utils::ddb::{build_db_client, create_lending_tables, delete_table};

    lazy_static! {
        static ref CLIENT: AsyncOnce<Client> = AsyncOnce::new(async {
                let client = build_db_client(&RepositoryStore::LocalDynamoDB).await;
                let _ = delete_table(&client, "holidays").await;
                create_lending_tables(&client).await;
                client
            });
    }

    #[tokio::test]
    #[ignore = "requires dynamodb-local on localhost:8000"]
    async fn test_should_create_find_delete_holidays() {
        let repo = DDBHolidayRepository::new(CLIENT.get().await.clone(), "holidays");
        let day = NaiveDate::from_ymd_opt(2025, 12, 25).unwrap();
        assert_eq!(1, repo.create(&HolidayEntity::new(day, "christmas")).await.expect("should create"));
        assert!(matches!(repo.create(&HolidayEntity::new(day, "christmas")).await, Err(LibraryError::DuplicateKey { .. })));

        let all = repo.find_all().await.expect("should find holidays");
        assert!(all.iter().any(|h| h.holiday_date == day && h.description == "christmas"));

        assert_eq!(1, repo.delete(day).await.expect("should delete"));
        assert_eq!(0, repo.delete(day).await.expect("should report nothing deleted"));
    }
}
