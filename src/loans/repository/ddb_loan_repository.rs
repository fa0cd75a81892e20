use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{NaiveDate, Utc};

use crate::core::library::{LibraryError, LibraryResult, LoanStatus};
use crate::core::repository::Repository;
use crate::loans::domain::model::LoanEntity;
use crate::loans::repository::LoanRepository;
use crate::utils::ddb::{next_sequence, number_value, parse_date_attribute, parse_day_attribute, parse_item, parse_number_attribute, parse_string_attribute, put_condition_failed, string_date, string_day, update_condition_failed};

#[derive(Debug)]
pub(crate) struct DDBLoanRepository {
    client: Client,
    table_name: String,
    index_name: String,
}

impl DDBLoanRepository {
    pub(crate) fn new(client: Client, table_name: &str, index_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            index_name: index_name.to_string(),
        }
    }

    // Reads active loans through the (loan_status, due_date) index, optionally narrowed to one
    // book or member and to loans due before a day. Every page is read.
    async fn query_active(&self, owner: Option<(&str, i64)>, due_before: Option<NaiveDate>) -> LibraryResult<Vec<LoanEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let index_name: &str = self.index_name.as_ref();
        let mut key_cond = String::from("loan_status = :loan_status");
        if due_before.is_some() {
            key_cond.push_str(" AND due_date < :due_date");
        }
        let mut loans = vec![];
        let mut exclusive_start_key = None;
        loop {
            let mut request = self.client
                .query()
                .table_name(table_name)
                .index_name(index_name)
                .consistent_read(false)
                .set_exclusive_start_key(exclusive_start_key)
                .key_condition_expression(key_cond.as_str())
                .expression_attribute_values(":loan_status", AttributeValue::S(LoanStatus::Active.to_string()));
            if let Some(due_date) = due_before {
                request = request.expression_attribute_values(":due_date", string_day(due_date));
            }
            if let Some((name, id)) = owner {
                request = request
                    .filter_expression(format!("{} = :owner", name))
                    .expression_attribute_values(":owner", number_value(id));
            }
            let res = request.send().await.map_err(LibraryError::from)?;
            if let Some(items) = res.items() {
                for item in items {
                    loans.push(LoanEntity::try_from(item)?);
                }
            }
            match res.last_evaluated_key() {
                Some(key) => exclusive_start_key = Some(key.clone()),
                None => break,
            }
        }
        loans.sort_by_key(|l| l.loan_id);
        Ok(loans)
    }
}

#[async_trait]
impl Repository<LoanEntity> for DDBLoanRepository {
    async fn create(&self, entity: &LoanEntity) -> LibraryResult<i64> {
        let table_name: &str = self.table_name.as_ref();
        let mut loan = entity.clone();
        loan.loan_id = next_sequence(&self.client, table_name).await?;
        let val = serde_json::to_value(&loan)?;
        match self.client
            .put_item()
            .table_name(table_name)
            .condition_expression("attribute_not_exists(loan_id)")
            .set_item(Some(parse_item(val)?))
            .send()
            .await {
            Ok(_) => Ok(loan.loan_id),
            Err(err) if put_condition_failed(&err) => {
                Err(LibraryError::duplicate_key(format!("loan {} already exists", loan.loan_id).as_str()))
            }
            Err(err) => Err(LibraryError::from(err)),
        }
    }

    async fn get(&self, id: i64) -> LibraryResult<LoanEntity> {
        let table_name: &str = self.table_name.as_ref();
        let res = self.client
            .get_item()
            .table_name(table_name)
            .key("loan_id", number_value(id))
            .consistent_read(true)
            .send()
            .await.map_err(LibraryError::from)?;
        match res.item() {
            Some(map) => LoanEntity::try_from(map),
            None => Err(LibraryError::not_found(format!("loan not found for {}", id).as_str())),
        }
    }
}

#[async_trait]
impl LoanRepository for DDBLoanRepository {
    async fn mark_returned(&self, loan_id: i64, return_date: NaiveDate) -> LibraryResult<bool> {
        let table_name: &str = self.table_name.as_ref();
        let res = self.client
            .update_item()
            .table_name(table_name)
            .key("loan_id", number_value(loan_id))
            .update_expression("SET return_date = :return_date, loan_status = :returned, #version = #version + :one, updated_at = :updated_at")
            .expression_attribute_names("#version", "version")
            .expression_attribute_values(":return_date", string_day(return_date))
            .expression_attribute_values(":returned", AttributeValue::S(LoanStatus::Returned.to_string()))
            .expression_attribute_values(":active", AttributeValue::S(LoanStatus::Active.to_string()))
            .expression_attribute_values(":one", number_value(1))
            .expression_attribute_values(":updated_at", string_date(Utc::now().naive_utc()))
            .condition_expression("loan_status = :active")
            .send()
            .await;
        match res {
            Ok(_) => Ok(true),
            Err(err) if update_condition_failed(&err) => Ok(false),
            Err(err) => Err(LibraryError::from(err)),
        }
    }

    async fn extend_due_date(&self, loan_id: i64, due_date: NaiveDate, expected_extension_count: u32) -> LibraryResult<bool> {
        let table_name: &str = self.table_name.as_ref();
        let res = self.client
            .update_item()
            .table_name(table_name)
            .key("loan_id", number_value(loan_id))
            .update_expression("SET due_date = :due_date, extension_count = :new_count, #version = #version + :one, updated_at = :updated_at")
            .expression_attribute_names("#version", "version")
            .expression_attribute_values(":due_date", string_day(due_date))
            .expression_attribute_values(":old_count", number_value(expected_extension_count as i64))
            .expression_attribute_values(":new_count", number_value(expected_extension_count as i64 + 1))
            .expression_attribute_values(":active", AttributeValue::S(LoanStatus::Active.to_string()))
            .expression_attribute_values(":one", number_value(1))
            .expression_attribute_values(":updated_at", string_date(Utc::now().naive_utc()))
            .condition_expression("loan_status = :active AND extension_count = :old_count")
            .send()
            .await;
        match res {
            Ok(_) => Ok(true),
            Err(err) if update_condition_failed(&err) => Ok(false),
            Err(err) => Err(LibraryError::from(err)),
        }
    }

    async fn find_active_by_book(&self, book_id: i64) -> LibraryResult<Vec<LoanEntity>> {
        self.query_active(Some(("book_id", book_id)), None).await
    }

    async fn find_active_by_member(&self, member_id: i64) -> LibraryResult<Vec<LoanEntity>> {
        self.query_active(Some(("member_id", member_id)), None).await
    }

    async fn query_overdue(&self, today: NaiveDate) -> LibraryResult<Vec<LoanEntity>> {
        self.query_active(None, Some(today)).await
    }
}

fn required_day(name: &str, map: &HashMap<String, AttributeValue>) -> LibraryResult<NaiveDate> {
    parse_day_attribute(name, map).ok_or_else(|| {
        LibraryError::serialization(format!("loan {} has a missing or malformed {}",
                                            parse_number_attribute("loan_id", map), name).as_str())
    })
}

// Due and borrow dates drive overdue queries and extensions, so a row without them is rejected.
impl TryFrom<&HashMap<String, AttributeValue>> for LoanEntity {
    type Error = LibraryError;

    fn try_from(map: &HashMap<String, AttributeValue>) -> Result<Self, Self::Error> {
        Ok(LoanEntity {
            loan_id: parse_number_attribute("loan_id", map),
            version: parse_number_attribute("version", map),
            branch_id: parse_string_attribute("branch_id", map).unwrap_or_else(|| String::from("")),
            book_id: parse_number_attribute("book_id", map),
            member_id: parse_number_attribute("member_id", map),
            borrow_date: required_day("borrow_date", map)?,
            due_date: required_day("due_date", map)?,
            return_date: parse_day_attribute("return_date", map),
            extension_count: parse_number_attribute("extension_count", map) as u32,
            loan_status: LoanStatus::from(parse_string_attribute("loan_status", map).unwrap_or_else(|| LoanStatus::Active.to_string())),
            created_at: parse_date_attribute("created_at", map).unwrap_or_else(|| Utc::now().naive_utc()),
            updated_at: parse_date_attribute("updated_at", map).unwrap_or_else(|| Utc::now().naive_utc()),
        })
    }
}
