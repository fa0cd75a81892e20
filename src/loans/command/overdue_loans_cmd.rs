use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::loans::domain::LoanLedger;
use crate::loans::dto::LoanDto;
use crate::utils::date::parse_day;

pub(crate) struct OverdueLoansCommand {
    loan_ledger: Box<dyn LoanLedger>,
}

impl OverdueLoansCommand {
    pub(crate) fn new(loan_ledger: Box<dyn LoanLedger>) -> Self {
        Self {
            loan_ledger,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub(crate) struct OverdueLoansCommandRequest {
    // YYYY-MM-DD, defaults to today
    pub as_of: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct OverdueLoansCommandResponse {
    pub loans: Vec<LoanDto>,
}

#[async_trait]
impl Command<OverdueLoansCommandRequest, OverdueLoansCommandResponse> for OverdueLoansCommand {
    async fn execute(&self, req: OverdueLoansCommandRequest) -> Result<OverdueLoansCommandResponse, CommandError> {
        let as_of = match req.as_of {
            Some(day) => Some(parse_day(day.as_str())?),
            None => None,
        };
        self.loan_ledger.query_overdue(as_of).await
            .map_err(CommandError::from).map(|loans| OverdueLoansCommandResponse { loans })
    }
}
