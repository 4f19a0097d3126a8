use hrclock::core::leave::{Decision, LeaveLogic};
use hrclock::db::pool::DbPool;
use hrclock::errors::AppError;
use hrclock::models::leave::{LeaveDraft, LeaveStatus, LeaveType, Urgency};

mod common;
use common::{date, utc};

fn draft(name: &str, from: &str, to: &str) -> LeaveDraft {
    LeaveDraft {
        employee_name: name.into(),
        leave_type: Some("vacation".into()),
        start_date: Some(from.into()),
        end_date: Some(to.into()),
        reason: "Family trip to the coast".into(),
        ..LeaveDraft::default()
    }
}

#[test]
fn submitted_request_is_pending_with_inclusive_days() {
    let mut pool = DbPool::in_memory().unwrap();
    let now = utc(2025, 9, 1, 10, 0, 0);

    let req = LeaveLogic::submit(
        &mut pool,
        &draft("Ada Lovelace", "2025-09-10", "2025-09-12"),
        now,
        date(2025, 9, 1),
        10,
    )
    .unwrap();

    assert!(req.id > 0);
    assert_eq!(req.status, LeaveStatus::Pending);
    assert_eq!(req.leave_type, LeaveType::Vacation);
    assert_eq!(req.urgency, Urgency::Normal);
    assert_eq!(req.total_days, 3);
    assert_eq!(req.manager_id, 1);
    assert_eq!(req.created_at, now);
    assert_eq!(LeaveLogic::get(&mut pool, req.id).unwrap(), req);
}

#[test]
fn invalid_request_reports_every_problem() {
    let mut pool = DbPool::in_memory().unwrap();
    let bad = LeaveDraft {
        employee_name: "Grace".into(),
        leave_type: None,
        start_date: Some("2025-08-20".into()),
        end_date: Some("2025-08-19".into()),
        reason: "  short  ".into(),
        ..LeaveDraft::default()
    };

    match LeaveLogic::submit(&mut pool, &bad, utc(2025, 9, 1, 0, 0, 0), date(2025, 9, 1), 10) {
        Err(AppError::InvalidLeave(msg)) => {
            assert!(msg.contains("Leave type is required"));
            assert!(msg.contains("Start date cannot be in the past"));
            assert!(msg.contains("End date must be after start date"));
            assert!(msg.contains("at least 10 characters"));
        }
        other => panic!("unexpected: {:?}", other),
    }

    assert!(LeaveLogic::list(&mut pool, None).unwrap().is_empty());
}

#[test]
fn request_starting_today_is_accepted() {
    let mut pool = DbPool::in_memory().unwrap();
    let req = LeaveLogic::submit(
        &mut pool,
        &draft("Linus", "2025-09-01", "2025-09-01"),
        utc(2025, 9, 1, 8, 0, 0),
        date(2025, 9, 1),
        10,
    )
    .unwrap();
    assert_eq!(req.total_days, 1);
}

#[test]
fn only_pending_requests_can_be_reviewed() {
    let mut pool = DbPool::in_memory().unwrap();
    let now = utc(2025, 9, 1, 10, 0, 0);
    let req = LeaveLogic::submit(
        &mut pool,
        &draft("Ada", "2025-09-10", "2025-09-11"),
        now,
        date(2025, 9, 1),
        10,
    )
    .unwrap();

    let approved = LeaveLogic::review(&mut pool, req.id, Decision::Approve, "HR Manager", now).unwrap();
    assert_eq!(approved.status, LeaveStatus::Approved);
    assert_eq!(approved.reviewed_by.as_deref(), Some("HR Manager"));
    assert_eq!(approved.reviewed_at, Some(now));

    match LeaveLogic::review(&mut pool, req.id, Decision::Deny, "Someone else", now) {
        Err(AppError::LeaveAlreadyReviewed { id, status }) => {
            assert_eq!(id, req.id);
            assert_eq!(status, "approved");
        }
        other => panic!("unexpected: {:?}", other),
    }

    assert!(matches!(
        LeaveLogic::review(&mut pool, 999, Decision::Approve, "HR", now),
        Err(AppError::LeaveNotFound(999))
    ));
}

#[test]
fn stats_and_status_filter() {
    let mut pool = DbPool::in_memory().unwrap();
    let now = utc(2025, 9, 1, 10, 0, 0);
    let today = date(2025, 9, 1);

    let mut ids = Vec::new();
    for name in ["A", "B", "C", "D"] {
        let r = LeaveLogic::submit(&mut pool, &draft(name, "2025-10-01", "2025-10-03"), now, today, 10)
            .unwrap();
        ids.push(r.id);
    }
    LeaveLogic::review(&mut pool, ids[0], Decision::Approve, "HR", now).unwrap();
    LeaveLogic::review(&mut pool, ids[1], Decision::Deny, "HR", now).unwrap();
    LeaveLogic::delete(&mut pool, ids[3]).unwrap();

    let stats = LeaveLogic::stats(&mut pool).unwrap();
    assert_eq!((stats.pending, stats.approved, stats.denied), (1, 1, 1));

    let pending = LeaveLogic::list(&mut pool, Some(LeaveStatus::Pending)).unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, ids[2]);

    assert!(matches!(
        LeaveLogic::delete(&mut pool, ids[3]),
        Err(AppError::LeaveNotFound(_))
    ));
}
