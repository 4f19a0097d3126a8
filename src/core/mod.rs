pub mod backup;
pub mod calculator;
pub mod clock;
pub mod config;
pub mod employee;
pub mod entry;
pub mod leave;
pub mod log;
pub mod policy;
pub mod session;
