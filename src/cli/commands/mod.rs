pub mod backup;
pub mod config;
pub mod db;
pub mod export;
pub mod history;
pub mod init;
pub mod log;
pub mod members;
pub mod register;
pub mod scan;
pub mod today;
