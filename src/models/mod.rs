pub mod employee;
pub mod leave;
pub mod time_entry;
pub mod weekly;
