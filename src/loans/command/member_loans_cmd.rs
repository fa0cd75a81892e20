use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError, require_positive_id};
use crate::loans::domain::LoanLedger;
use crate::loans::dto::LoanDto;

// MemberLoansCommand lists the loans a member has not returned yet.
pub(crate) struct MemberLoansCommand {
    loan_ledger: Box<dyn LoanLedger>,
}

impl MemberLoansCommand {
    pub(crate) fn new(loan_ledger: Box<dyn LoanLedger>) -> Self {
        Self {
            loan_ledger,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct MemberLoansCommandRequest {
    pub member_id: i64,
}

#[derive(Debug, Serialize)]
pub(crate) struct MemberLoansCommandResponse {
    pub loans: Vec<LoanDto>,
}

#[async_trait]
impl Command<MemberLoansCommandRequest, MemberLoansCommandResponse> for MemberLoansCommand {
    async fn execute(&self, req: MemberLoansCommandRequest) -> Result<MemberLoansCommandResponse, CommandError> {
        let member_id = require_positive_id("member_id", req.member_id)?;
        self.loan_ledger.find_active_loans_by_member(member_id).await
            .map_err(CommandError::from).map(|loans| MemberLoansCommandResponse { loans })
    }
}
