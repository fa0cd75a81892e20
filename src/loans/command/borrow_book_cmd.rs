use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError, require_positive_id};
use crate::loans::domain::LoanLedger;
use crate::loans::dto::LoanDto;

pub(crate) struct BorrowBookCommand {
    loan_ledger: Box<dyn LoanLedger>,
}

impl BorrowBookCommand {
    pub(crate) fn new(loan_ledger: Box<dyn LoanLedger>) -> Self {
        Self {
            loan_ledger,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct BorrowBookCommandRequest {
    pub book_id: i64,
    pub member_id: i64,
}

#[derive(Debug, Serialize)]
pub(crate) struct BorrowBookCommandResponse {
    pub loan: LoanDto,
}

#[async_trait]
impl Command<BorrowBookCommandRequest, BorrowBookCommandResponse> for BorrowBookCommand {
    async fn execute(&self, req: BorrowBookCommandRequest) -> Result<BorrowBookCommandResponse, CommandError> {
        let book_id = require_positive_id("book_id", req.book_id)?;
        let member_id = require_positive_id("member_id", req.member_id)?;
        self.loan_ledger.borrow(book_id, member_id).await
            .map_err(CommandError::from).map(|loan| BorrowBookCommandResponse { loan })
    }
}
