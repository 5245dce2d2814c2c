//! Role-scoped submission listings: dashboard, paginated history and the admin calendar.

use serde::Deserialize;
use sqlx::PgPool;
use time::Date;

use crate::core::config::ListingSettings;
use crate::core::time::{month_bounds, today_utc};
use crate::db::types::{AccountRole, SubmissionStatus};
use crate::repositories;
use crate::repositories::submissions::{
    FacultyRelation, ListingFilter, ListingOrder, ListingScope,
};
use crate::schemas::page::{PageRequest, Paginated};
use crate::schemas::submission::{AdminSubmissionView, SubmissionView};
use crate::services::caller::Caller;
use crate::services::errors::ServiceError;

const SCHEDULED_ONLY: &[SubmissionStatus] = &[SubmissionStatus::Scheduled];

/// `status` query value. Lowercase words select by exam date, uppercase names select one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub(crate) enum StatusFilter {
    Exact(SubmissionStatus),
    Period(Period),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Period {
    All,
    /// Scheduled with an exam date before today.
    Completed,
    /// Scheduled with an exam date today or later.
    Scheduled,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum RelationFilter {
    #[default]
    All,
    Supervisor,
    Examiner,
}

impl RelationFilter {
    fn relation(self) -> FacultyRelation {
        match self {
            Self::All => FacultyRelation::Any,
            Self::Supervisor => FacultyRelation::Supervisor,
            Self::Examiner => FacultyRelation::ExaminerOnly,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct HistoryFilter {
    pub(crate) status: Option<StatusFilter>,
    pub(crate) relation: RelationFilter,
}

/// Applies a status filter to `filter`. Returns the filter unchanged for `all` or no filter.
fn with_status<'a>(
    filter: ListingFilter<'a>,
    status: Option<StatusFilter>,
    exact: &'a [SubmissionStatus],
    today: Date,
) -> ListingFilter<'a> {
    match status {
        None | Some(StatusFilter::Period(Period::All)) => filter,
        Some(StatusFilter::Exact(_)) => filter.statuses(exact),
        Some(StatusFilter::Period(Period::Completed)) => {
            filter.statuses(SCHEDULED_ONLY).dates(None, Some(today))
        }
        Some(StatusFilter::Period(Period::Scheduled)) => {
            filter.statuses(SCHEDULED_ONLY).dates(Some(today), None)
        }
    }
}

fn scope_for(caller: &Caller, relation: FacultyRelation) -> ListingScope<'_> {
    match caller.role {
        AccountRole::Student => ListingScope::OwnedBy(&caller.account_id),
        AccountRole::Faculty => {
            ListingScope::RelatedTo { faculty_id: &caller.account_id, relation }
        }
        AccountRole::Admin => ListingScope::Everything,
    }
}

/// Upcoming exams for the caller's landing page: scheduled only, earliest first.
pub(crate) async fn dashboard(
    pool: &PgPool,
    caller: &Caller,
    listing: &ListingSettings,
) -> Result<Vec<SubmissionView>, ServiceError> {
    let scope = scope_for(caller, FacultyRelation::Any);
    let filter = ListingFilter::new(scope, ListingOrder::ExamDateAsc).statuses(SCHEDULED_ONLY);

    let rows = repositories::submissions::list(pool, &filter, 0, listing.dashboard_size).await?;
    Ok(rows.into_iter().map(|row| SubmissionView::for_role(caller.role, row)).collect())
}

/// Paginated history. Students get their scheduled exams by date; faculty and admins get
/// every matching submission, newest first.
pub(crate) async fn history(
    pool: &PgPool,
    caller: &Caller,
    filter: HistoryFilter,
    page: PageRequest,
) -> Result<Paginated<SubmissionView>, ServiceError> {
    let exact: Vec<SubmissionStatus> = match filter.status {
        Some(StatusFilter::Exact(status)) => vec![status],
        _ => Vec::new(),
    };
    let today = today_utc();

    let listing = match caller.role {
        AccountRole::Student => {
            ListingFilter::new(scope_for(caller, FacultyRelation::Any), ListingOrder::ExamDateAsc)
                .statuses(SCHEDULED_ONLY)
        }
        AccountRole::Faculty => with_status(
            ListingFilter::new(
                scope_for(caller, filter.relation.relation()),
                ListingOrder::NewestFirst,
            ),
            filter.status,
            &exact,
            today,
        ),
        AccountRole::Admin => with_status(
            ListingFilter::new(scope_for(caller, FacultyRelation::Any), ListingOrder::NewestFirst),
            filter.status,
            &exact,
            today,
        ),
    };

    let rows = repositories::submissions::list(pool, &listing, page.offset(), page.limit).await?;
    let total = repositories::submissions::count(pool, &listing).await?;

    Ok(Paginated::new(rows, total, page).map(|row| SubmissionView::for_role(caller.role, row)))
}

/// Every exam scheduled in the given month, earliest first.
pub(crate) async fn calendar(
    pool: &PgPool,
    caller: &Caller,
    year: i32,
    month: u8,
) -> Result<Vec<AdminSubmissionView>, ServiceError> {
    caller.require(AccountRole::Admin)?;

    let Some((first_day, next_month)) = month_bounds(year, month) else {
        return Err(ServiceError::field("month", "month must be between 1 and 12"));
    };

    let filter = ListingFilter::new(ListingScope::Everything, ListingOrder::ExamDateAsc)
        .statuses(SCHEDULED_ONLY)
        .dates(Some(first_day), Some(next_month));

    let rows = repositories::submissions::list(pool, &filter, 0, i64::MAX).await?;
    Ok(rows.into_iter().map(AdminSubmissionView::from_row).collect())
}
