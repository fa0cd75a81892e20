use std::collections::{BTreeMap, HashMap};
use chrono::NaiveDate;
use tokio::sync::Mutex;
use crate::books::domain::model::BookEntity;
use crate::calendar::domain::model::HolidayEntity;
use crate::loans::domain::model::LoanEntity;
use crate::members::domain::model::MemberEntity;

// MemoryDatabase keeps every table of the lending engine in-process. Each table sits behind
// its own lock so that a check-and-write against one table is atomic.
#[derive(Debug, Default)]
pub(crate) struct MemoryDatabase {
    pub(crate) books: Mutex<BTreeMap<i64, BookEntity>>,
    pub(crate) members: Mutex<BTreeMap<i64, MemberEntity>>,
    pub(crate) loans: Mutex<BTreeMap<i64, LoanEntity>>,
    pub(crate) holidays: Mutex<BTreeMap<NaiveDate, HolidayEntity>>,
    sequences: Mutex<HashMap<String, i64>>,
}

impl MemoryDatabase {
    // next identifier of the named sequence, starting at 1
    pub(crate) async fn next_id(&self, sequence_name: &str) -> i64 {
        let mut sequences = self.sequences.lock().await;
        let next = sequences.entry(sequence_name.to_string()).or_insert(0);
        *next += 1;
        *next
    }
}
