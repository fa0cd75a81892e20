use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError, require_positive_id};
use crate::loans::domain::LoanLedger;
use crate::loans::dto::LoanDto;

pub(crate) struct GetLoanCommand {
    loan_ledger: Box<dyn LoanLedger>,
}

impl GetLoanCommand {
    pub(crate) fn new(loan_ledger: Box<dyn LoanLedger>) -> Self {
        Self {
            loan_ledger,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GetLoanCommandRequest {
    pub loan_id: i64,
}

#[derive(Debug, Serialize)]
pub(crate) struct GetLoanCommandResponse {
    pub loan: LoanDto,
}

#[async_trait]
impl Command<GetLoanCommandRequest, GetLoanCommandResponse> for GetLoanCommand {
    async fn execute(&self, req: GetLoanCommandRequest) -> Result<GetLoanCommandResponse, CommandError> {
        let loan_id = require_positive_id("loan_id", req.loan_id)?;
        self.loan_ledger.find_loan_by_id(loan_id).await
            .map_err(CommandError::from).map(|loan| GetLoanCommandResponse { loan })
    }
}
