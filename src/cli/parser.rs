use crate::export::ExportFormat;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for hrclock
/// Time clock and leave requests for a small HR office, stored in SQLite
#[derive(Parser)]
#[command(
    name = "hrclock",
    version = env!("CARGO_PKG_VERSION"),
    about = "HR time clock: clock employees in and out, review hours and leave requests using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view, edit, check, migrate)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields with their default values")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Specify the editor to use (vim, nano, or custom path)")]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Start a work session
    In {
        #[arg(long, short, help = "Employee id (default: config default_employee)")]
        employee: Option<i64>,

        #[arg(long, value_name = "TS", help = "Clock-in time instead of now")]
        at: Option<String>,
    },

    /// Close the open work session
    Out {
        #[arg(long, short, help = "Employee id (default: config default_employee)")]
        employee: Option<i64>,

        #[arg(long, value_name = "TS", help = "Clock-out time instead of now")]
        at: Option<String>,
    },

    /// Show open sessions and their running time
    Status {
        #[arg(long, short, help = "Employee id (default: config default_employee)")]
        employee: Option<i64>,

        #[arg(long, conflicts_with = "employee", help = "Show every open session")]
        all: bool,
    },

    /// List completed time entries
    List {
        #[arg(long = "today", help = "Show only today's entries")]
        today: bool,

        #[arg(long, short, help = "Only entries of this employee")]
        employee: Option<i64>,

        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,

        #[arg(long, help = "Print entries as JSON")]
        json: bool,
    },

    /// Weekly hours of one employee
    Week {
        #[arg(long, short, help = "Employee id (default: config default_employee)")]
        employee: Option<i64>,

        #[arg(
            long,
            value_name = "DATE",
            help = "First day of the week (YYYY-MM-DD, default: current week)"
        )]
        start: Option<String>,

        #[arg(long, help = "Print the aggregate as JSON")]
        json: bool,
    },

    /// Correct clock-in and/or clock-out of an entry
    Edit {
        id: i64,

        #[arg(long = "in", value_name = "TS", help = "New clock-in time")]
        clock_in: Option<String>,

        #[arg(long = "out", value_name = "TS", help = "New clock-out time")]
        clock_out: Option<String>,
    },

    /// Delete a time entry by ID
    Del {
        id: i64,

        #[arg(long, short, help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Leave requests
    Leave {
        #[command(subcommand)]
        action: LeaveAction,
    },

    /// Employee directory
    Employee {
        #[command(subcommand)]
        action: EmployeeAction,
    },

    /// Departments
    Dept {
        #[command(subcommand)]
        action: DeptAction,
    },

    /// Dashboard counters: directory, open sessions, pending leave
    Stats {
        #[arg(long, help = "Print counters as JSON")]
        json: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },

    /// Export time entries
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum LeaveAction {
    /// Submit a new leave request
    Request {
        #[arg(long, value_name = "NAME")]
        employee: String,

        #[arg(
            long = "type",
            value_name = "TYPE",
            help = "vacation, sick, personal, maternity, paternity or emergency"
        )]
        leave_type: Option<String>,

        #[arg(long, value_name = "DATE", help = "First day of leave (YYYY-MM-DD)")]
        from: Option<String>,

        #[arg(long, value_name = "DATE", help = "Last day of leave (YYYY-MM-DD)")]
        to: Option<String>,

        #[arg(long, default_value = "")]
        reason: String,

        #[arg(long, help = "low, normal, high or urgent")]
        urgency: Option<String>,

        #[arg(long, value_name = "ID")]
        manager: Option<i64>,
    },

    /// List leave requests, newest first
    List {
        #[arg(long, help = "pending, approved or denied")]
        status: Option<String>,

        #[arg(long, help = "Print requests as JSON")]
        json: bool,
    },

    /// Approve a pending request
    Approve {
        id: i64,

        #[arg(long, value_name = "NAME", help = "Reviewer (default: config reviewer)")]
        by: Option<String>,
    },

    /// Deny a pending request
    Deny {
        id: i64,

        #[arg(long, value_name = "NAME", help = "Reviewer (default: config reviewer)")]
        by: Option<String>,
    },

    /// Delete a leave request
    Del { id: i64 },
}

/// Fields shared by `employee add` and `employee update`. On update an
/// omitted field keeps its current value.
#[derive(Args, Debug, Clone, Default)]
pub struct EmployeeFields {
    #[arg(long = "first", value_name = "NAME")]
    pub first_name: Option<String>,

    #[arg(long = "last", value_name = "NAME")]
    pub last_name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub role: Option<String>,

    #[arg(long, value_name = "NAME")]
    pub department: Option<String>,

    #[arg(long = "hired", value_name = "DATE", help = "Hire date (YYYY-MM-DD)")]
    pub hire_date: Option<String>,

    #[arg(long, help = "active, inactive or on-leave")]
    pub status: Option<String>,

    #[arg(long = "emergency-name", value_name = "NAME")]
    pub emergency_name: Option<String>,

    #[arg(long = "emergency-phone", value_name = "PHONE")]
    pub emergency_phone: Option<String>,

    #[arg(long = "emergency-relationship", value_name = "TEXT")]
    pub emergency_relationship: Option<String>,
}

#[derive(Subcommand)]
pub enum EmployeeAction {
    /// Add an employee to the directory
    Add {
        #[command(flatten)]
        fields: EmployeeFields,
    },

    /// List employees, newest first
    List {
        #[arg(long, help = "active, inactive or on-leave")]
        status: Option<String>,

        #[arg(long, value_name = "TEXT", help = "Match name, email, role or department")]
        search: Option<String>,

        #[arg(long, help = "Print employees as JSON")]
        json: bool,
    },

    /// Show one employee
    Show { id: i64 },

    /// Change an employee's details
    Update {
        id: i64,

        #[command(flatten)]
        fields: EmployeeFields,
    },

    /// Remove an employee from the directory
    Del {
        id: i64,

        #[arg(long, short, help = "Do not ask for confirmation")]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum DeptAction {
    /// Create a department
    Add {
        name: String,

        #[arg(long, value_name = "ID", help = "Employee ID of the manager")]
        manager: Option<i64>,

        #[arg(long, default_value = "")]
        description: String,
    },

    /// List departments with their head count
    List {
        #[arg(long, help = "Print departments as JSON")]
        json: bool,
    },

    /// Rename or reassign a department
    Update {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long, value_name = "ID")]
        manager: Option<i64>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a department
    Del { id: i64 },
}
