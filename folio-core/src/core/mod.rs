pub mod app;
pub mod blog;
pub mod catalog;
pub mod database;
pub mod error;
pub mod merge;
pub mod models;
pub mod storage;
