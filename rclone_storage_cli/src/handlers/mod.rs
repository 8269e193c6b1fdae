pub mod info;
pub mod list;
pub mod remove;
pub mod transfer;
