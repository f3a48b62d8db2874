pub mod count;
pub mod delete;
pub mod incr;
pub mod member;
pub mod page;
pub mod pages;
pub mod rank;
pub mod remove;
pub mod top;
