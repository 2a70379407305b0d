pub mod convert;
pub mod inventory;
pub mod parse;
pub mod status;
