use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError, require_positive_id};
use crate::loans::domain::LoanLedger;
use crate::loans::dto::LoanDto;

pub(crate) struct ReturnBookCommand {
    loan_ledger: Box<dyn LoanLedger>,
}

impl ReturnBookCommand {
    pub(crate) fn new(loan_ledger: Box<dyn LoanLedger>) -> Self {
        Self {
            loan_ledger,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReturnBookCommandRequest {
    pub loan_id: i64,
}

#[derive(Debug, Serialize)]
pub(crate) struct ReturnBookCommandResponse {
    pub loan: LoanDto,
}

#[async_trait]
impl Command<ReturnBookCommandRequest, ReturnBookCommandResponse> for ReturnBookCommand {
    async fn execute(&self, req: ReturnBookCommandRequest) -> Result<ReturnBookCommandResponse, CommandError> {
        let loan_id = require_positive_id("loan_id", req.loan_id)?;
        self.loan_ledger.return_loan(loan_id).await
            .map_err(CommandError::from).map(|loan| ReturnBookCommandResponse { loan })
    }
}
