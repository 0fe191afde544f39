pub mod convert;
pub mod form;
pub mod units;
