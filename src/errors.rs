//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("Record store unavailable: {0}")]
    StoreUnavailable(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    // ---------------------------
    // Time clock
    // ---------------------------
    #[error("Employee {0} is already clocked in")]
    AlreadyClockedIn(i64),

    #[error("Employee {0} is not clocked in")]
    NotClockedIn(i64),

    #[error("Time entry {0} not found")]
    EntryNotFound(i64),

    // ---------------------------
    // Leave requests
    // ---------------------------
    #[error("Invalid leave request: {0}")]
    InvalidLeave(String),

    #[error("Leave request {0} not found")]
    LeaveNotFound(i64),

    #[error("Leave request {id} has already been {status}")]
    LeaveAlreadyReviewed { id: i64, status: String },

    // ---------------------------
    // Employee directory
    // ---------------------------
    #[error("Invalid employee: {0}")]
    InvalidEmployee(String),

    #[error("Employee {0} not found")]
    EmployeeNotFound(i64),

    #[error("Employee {0} is inactive")]
    EmployeeInactive(i64),

    #[error("Invalid department: {0}")]
    InvalidDepartment(String),

    #[error("Department {0} not found")]
    DepartmentNotFound(i64),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
