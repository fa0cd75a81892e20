use chrono::{NaiveDate, Utc};

// Clock supplies the lending day used as borrow and return date.
pub(crate) trait Clock: Sync + Send {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Default)]
pub(crate) struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().naive_utc().date()
    }
}

#[cfg(test)]
#[derive(Debug)]
pub(crate) struct FixedClock {
    day: NaiveDate,
}

#[cfg(test)]
impl FixedClock {
    pub(crate) fn new(day: NaiveDate) -> Self {
        Self { day }
    }
}

#[cfg(test)]
impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.day
    }
}
