use crate::cli::parser::{Commands, LeaveAction};
use crate::config::Config;
use crate::core::leave::{Decision, LeaveLogic};
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::leave::{LeaveDraft, LeaveRequest, LeaveStatus};
use crate::ui::messages::{header, info, success};
use crate::utils::colors::{GREY, RESET, color_for_status};
use crate::utils::date::DayBoundary;
use crate::utils::table::{Column, Table};
use chrono::Utc;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Leave { action } = cmd else {
        return Ok(());
    };

    let boundary = DayBoundary::parse(&cfg.timezone)?;
    let mut pool = DbPool::open(&cfg.database)?;

    match action {
        LeaveAction::Request {
            employee,
            leave_type,
            from,
            to,
            reason,
            urgency,
            manager,
        } => {
            let draft = LeaveDraft {
                employee_name: employee.clone(),
                leave_type: leave_type.clone(),
                start_date: from.clone(),
                end_date: to.clone(),
                reason: reason.clone(),
                urgency: urgency.clone(),
                manager_id: *manager,
            };

            let now = Utc::now();
            let req = LeaveLogic::submit(
                &mut pool,
                &draft,
                now,
                boundary.date_of(&now),
                cfg.min_reason_length,
            )?;

            ttlog_quiet(
                &pool.conn,
                "leave_request",
                &req.id.to_string(),
                &format!(
                    "{}: {} {} → {}",
                    req.employee_name,
                    req.leave_type.label(),
                    req.start_date,
                    req.end_date
                ),
            );

            success(format!(
                "Leave request #{} submitted: {} day(s) of {} for {}",
                req.id,
                req.total_days,
                req.leave_type.label(),
                req.employee_name
            ));
        }

        LeaveAction::List { status, json } => {
            let filter = match status {
                Some(s) => Some(LeaveStatus::from_db_str(&s.to_lowercase()).ok_or_else(|| {
                    AppError::InvalidLeave(format!("unknown status '{}'", s))
                })?),
                None => None,
            };

            let requests = LeaveLogic::list(&mut pool, filter)?;

            if *json {
                let out = serde_json::to_string_pretty(&requests)
                    .map_err(|e| AppError::Other(e.to_string()))?;
                println!("{}", out);
                return Ok(());
            }

            let stats = LeaveLogic::stats(&mut pool)?;
            header(format!(
                "Leave requests: {} pending, {} approved, {} denied",
                stats.pending, stats.approved, stats.denied
            ));

            if requests.is_empty() {
                info("No leave requests found.");
            } else {
                print!("{}", render_requests(&requests));
            }
        }

        LeaveAction::Approve { id, by } | LeaveAction::Deny { id, by } => {
            let decision = if matches!(action, LeaveAction::Approve { .. }) {
                Decision::Approve
            } else {
                Decision::Deny
            };
            let reviewer = by.as_deref().unwrap_or(&cfg.reviewer);

            let req = LeaveLogic::review(&mut pool, *id, decision, reviewer, Utc::now())?;

            ttlog_quiet(
                &pool.conn,
                &format!("leave_{}", req.status),
                &id.to_string(),
                &format!("by {}", reviewer),
            );

            success(format!(
                "Leave request #{} {} by {}",
                id, req.status, reviewer
            ));
        }

        LeaveAction::Del { id } => {
            LeaveLogic::delete(&mut pool, *id)?;
            ttlog_quiet(&pool.conn, "leave_del", &id.to_string(), "deleted");
            success(format!("Leave request #{} has been deleted.", id));
        }
    }

    Ok(())
}

fn render_requests(requests: &[LeaveRequest]) -> String {
    let mut table = Table::new(vec![
        Column::new("ID", 4),
        Column::new("EMPLOYEE", 18),
        Column::new("TYPE", 10),
        Column::new("FROM", 10),
        Column::new("TO", 10),
        Column::new("DAYS", 4),
        Column::new("URGENCY", 7),
        Column::new("STATUS", 8),
        Column::new("REVIEWED BY", 12),
    ]);

    for r in requests {
        let color = color_for_status(r.status);
        table.add_row(vec![
            r.id.to_string(),
            r.employee_name.clone(),
            r.leave_type.to_db_str().to_string(),
            r.start_date.to_string(),
            r.end_date.to_string(),
            r.total_days.to_string(),
            r.urgency.to_db_str().to_string(),
            format!("{color}{}{RESET}", r.status),
            r.reviewed_by
                .clone()
                .unwrap_or_else(|| format!("{GREY}-{RESET}")),
        ]);
    }

    table.render()
}
