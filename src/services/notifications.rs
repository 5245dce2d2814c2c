use sqlx::PgPool;

use crate::core::time::{format_date, format_primitive, format_time};
use crate::db::types::{AccountRole, SubmissionStatus};
use crate::repositories;
use crate::repositories::submissions::NotificationRow;
use crate::schemas::notification::{NotificationRelation, NotificationResponse};
use crate::schemas::page::{PageRequest, Paginated};
use crate::services::caller::Caller;
use crate::services::errors::ServiceError;

/// Faculty feed of submissions they supervise or examine, most recent event first.
/// Students and admins get an empty page.
pub(crate) async fn feed(
    pool: &PgPool,
    caller: &Caller,
    page: PageRequest,
) -> Result<Paginated<NotificationResponse>, ServiceError> {
    match caller.role {
        AccountRole::Faculty => {}
        AccountRole::Student | AccountRole::Admin => {
            return Ok(Paginated::new(Vec::new(), 0, page));
        }
    }

    let rows = repositories::submissions::list_notifications(
        pool,
        &caller.account_id,
        page.offset(),
        page.limit,
    )
    .await?;
    let total = repositories::submissions::count_notifications(pool, &caller.account_id).await?;

    Ok(Paginated::new(rows, total, page).map(notification_from_row))
}

/// First `size` entries of the feed, for the dashboard widget.
pub(crate) async fn preview(
    pool: &PgPool,
    caller: &Caller,
    size: i64,
) -> Result<Vec<NotificationResponse>, ServiceError> {
    Ok(feed(pool, caller, PageRequest::first(size)).await?.items)
}

fn notification_from_row(row: NotificationRow) -> NotificationResponse {
    let relation = if row.viewer_is_supervisor {
        NotificationRelation::Supervisor
    } else {
        NotificationRelation::Examiner
    };
    let message = notification_message(&row, relation);

    NotificationResponse {
        submission_id: row.submission_id,
        title: row.title,
        status: row.status,
        relation,
        message,
        student_name: row.student_name,
        exam_date: row.exam_date.map(format_date),
        start_time: row.start_time.map(format_time),
        end_time: row.end_time.map(format_time),
        room_name: row.room_name,
        created_at: format_primitive(row.event_at),
    }
}

pub(crate) fn notification_message(
    row: &NotificationRow,
    relation: NotificationRelation,
) -> String {
    let student = &row.student_name;
    let title = &row.title;

    match row.status {
        SubmissionStatus::PendingReview => {
            format!("{student} submitted \"{title}\" for final exam review")
        }
        SubmissionStatus::Accepted => {
            format!("\"{title}\" by {student} was accepted and is waiting for a schedule")
        }
        SubmissionStatus::Rejected => format!("\"{title}\" by {student} was rejected"),
        SubmissionStatus::Scheduled => {
            let when = match (row.exam_date, row.start_time, row.end_time) {
                (Some(date), Some(start), Some(end)) => format!(
                    " on {} {}-{}",
                    format_date(date),
                    format_time(start),
                    format_time(end)
                ),
                _ => String::new(),
            };
            let place =
                row.room_name.as_deref().map(|room| format!(" in {room}")).unwrap_or_default();

            match relation {
                NotificationRelation::Supervisor => format!(
                    "Final exam of your student {student} (\"{title}\") is scheduled{when}{place}"
                ),
                NotificationRelation::Examiner => {
                    format!("You are assigned to examine {student} (\"{title}\"){when}{place}")
                }
            }
        }
    }
}
