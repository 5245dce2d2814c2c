use sqlx::PgPool;

use crate::db::types::AccountRole;
use crate::repositories;
use crate::schemas::statistics::{FacultyWorkload, WorkloadSummary};
use crate::services::caller::Caller;
use crate::services::errors::ServiceError;

pub(crate) async fn faculty_workload(
    pool: &PgPool,
    caller: &Caller,
) -> Result<WorkloadSummary, ServiceError> {
    caller.require(AccountRole::Admin)?;

    let rows = repositories::workload::list_faculty_loads(pool).await?;
    let faculty = rows
        .into_iter()
        .map(|row| FacultyWorkload {
            total: row.supervision_count + row.examination_count,
            faculty_id: row.faculty_id,
            full_name: row.full_name,
            supervision_count: row.supervision_count,
            examination_count: row.examination_count,
        })
        .collect();

    summarize(faculty).ok_or(ServiceError::NoFacultyData)
}

/// Extremes use strict comparisons while scanning in input order, so the earliest faculty
/// wins a tie. `None` when `faculty` is empty.
pub(crate) fn summarize(faculty: Vec<FacultyWorkload>) -> Option<WorkloadSummary> {
    let first = faculty.first()?;
    let mut most = first;
    let mut least = first;
    let mut sum = 0_i64;

    for entry in &faculty {
        if entry.total > most.total {
            most = entry;
        }
        if entry.total < least.total {
            least = entry;
        }
        sum += entry.total;
    }

    let average = (sum as f64 / faculty.len() as f64 * 100.0).round() / 100.0;
    let (most, least) = (most.clone(), least.clone());

    Some(WorkloadSummary { faculty, most, least, average })
}
