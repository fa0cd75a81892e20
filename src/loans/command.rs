pub mod borrow_book_cmd;
pub mod extend_loan_cmd;
pub mod get_loan_cmd;
pub mod member_loans_cmd;
pub mod overdue_loans_cmd;
pub mod return_book_cmd;
