pub mod bond;
pub mod dividends;
pub mod mortgage;
