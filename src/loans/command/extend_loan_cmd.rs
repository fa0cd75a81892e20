use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError, require_positive_id};
use crate::loans::domain::LoanLedger;
use crate::loans::dto::LoanDto;

// ExtendLoanCommand pushes the due date of an active loan; without an explicit number of
// days the branch default applies.
pub(crate) struct ExtendLoanCommand {
    loan_ledger: Box<dyn LoanLedger>,
    default_days: u32,
}

impl ExtendLoanCommand {
    pub(crate) fn new(loan_ledger: Box<dyn LoanLedger>, default_days: u32) -> Self {
        Self {
            loan_ledger,
            default_days,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExtendLoanCommandRequest {
    pub loan_id: i64,
    pub days_to_extend: Option<u32>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ExtendLoanCommandResponse {
    pub loan: LoanDto,
}

#[async_trait]
impl Command<ExtendLoanCommandRequest, ExtendLoanCommandResponse> for ExtendLoanCommand {
    async fn execute(&self, req: ExtendLoanCommandRequest) -> Result<ExtendLoanCommandResponse, CommandError> {
        let loan_id = require_positive_id("loan_id", req.loan_id)?;
        let days = req.days_to_extend.unwrap_or(self.default_days);
        if days == 0 {
            return Err(CommandError::validation("days_to_extend must be positive"));
        }
        self.loan_ledger.extend_due_date(loan_id, days).await
            .map_err(CommandError::from).map(|loan| ExtendLoanCommandResponse { loan })
    }
}
