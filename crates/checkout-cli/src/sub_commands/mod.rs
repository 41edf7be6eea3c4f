pub mod pay;
pub mod payload;
