pub mod backup;
pub mod config;
pub mod history;
pub mod log;
pub mod members;
pub mod register;
pub mod scan;
pub mod stats;
pub mod today;
