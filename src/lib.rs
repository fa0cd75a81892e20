pub mod books;
pub mod calendar;
pub mod catalog;
pub mod core;
pub mod loans;
pub mod members;
pub mod utils;
