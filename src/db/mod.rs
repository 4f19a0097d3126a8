pub mod employee_queries;
pub mod initialize;
pub mod leave_queries;
pub mod log;
pub mod memory;
pub mod migrate;
pub mod pool;
pub mod queries;
pub mod stats;
pub mod store;
