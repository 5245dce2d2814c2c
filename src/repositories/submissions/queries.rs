use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::db::models::ExamSubmission;
use crate::db::types::SubmissionStatus;

use super::types::{
    FacultyRelation, ListingFilter, ListingOrder, ListingScope, NotificationRow,
    SubmissionListingRow, COLUMNS,
};

const LISTING_JOINS: &str = "
     FROM exam_submissions s
     JOIN accounts st ON st.id = s.student_id
     LEFT JOIN accounts sup ON sup.id = s.supervisor_id
     LEFT JOIN rooms r ON r.id = s.room_id
     LEFT JOIN examiner_assignments e1 ON e1.submission_id = s.id AND e1.position = 1
     LEFT JOIN accounts a1 ON a1.id = e1.examiner_id
     LEFT JOIN examiner_assignments e2 ON e2.submission_id = s.id AND e2.position = 2
     LEFT JOIN accounts a2 ON a2.id = e2.examiner_id";

pub(crate) async fn find_by_id(
    executor: impl sqlx::PgExecutor<'_>,
    id: &str,
) -> Result<Option<ExamSubmission>, sqlx::Error> {
    sqlx::query_as::<_, ExamSubmission>(&format!(
        "SELECT {COLUMNS} FROM exam_submissions WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub(crate) async fn find_active_id_for_student(
    executor: impl sqlx::PgExecutor<'_>,
    student_id: &str,
) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        "SELECT id FROM exam_submissions WHERE student_id = $1 AND status = ANY($2) LIMIT 1",
    )
    .bind(student_id)
    .bind(&SubmissionStatus::ACTIVE[..])
    .fetch_optional(executor)
    .await
}

pub(crate) async fn latest_for_student(
    pool: &PgPool,
    student_id: &str,
) -> Result<Option<SubmissionListingRow>, sqlx::Error> {
    let mut builder = listing_select(None);
    builder.push(" WHERE s.student_id = ");
    builder.push_bind(student_id);
    builder.push(" ORDER BY s.created_at DESC, s.id DESC LIMIT 1");

    builder.build_query_as::<SubmissionListingRow>().fetch_optional(pool).await
}

/// Listing projection of a single submission, with the relation flag computed for `viewer_id`.
pub(crate) async fn find_listing(
    pool: &PgPool,
    id: &str,
    viewer_id: Option<&str>,
) -> Result<Option<SubmissionListingRow>, sqlx::Error> {
    let mut builder = listing_select(viewer_id);
    builder.push(" WHERE s.id = ");
    builder.push_bind(id);

    builder.build_query_as::<SubmissionListingRow>().fetch_optional(pool).await
}

pub(crate) async fn list(
    pool: &PgPool,
    filter: &ListingFilter<'_>,
    offset: i64,
    limit: i64,
) -> Result<Vec<SubmissionListingRow>, sqlx::Error> {
    let mut builder = listing_select(filter.viewer_id());
    push_filter(&mut builder, filter);

    match filter.order {
        ListingOrder::ExamDateAsc => builder.push(
            " ORDER BY s.exam_date ASC NULLS LAST, s.start_time ASC NULLS LAST, s.id",
        ),
        ListingOrder::NewestFirst => builder.push(" ORDER BY s.created_at DESC, s.id DESC"),
    };
    builder.push(" OFFSET ");
    builder.push_bind(offset.max(0));
    builder.push(" LIMIT ");
    builder.push_bind(limit.max(1));

    builder.build_query_as::<SubmissionListingRow>().fetch_all(pool).await
}

pub(crate) async fn count(pool: &PgPool, filter: &ListingFilter<'_>) -> Result<i64, sqlx::Error> {
    let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM exam_submissions s");
    push_filter(&mut builder, filter);

    builder.build_query_scalar::<i64>().fetch_one(pool).await
}

pub(crate) async fn list_notifications(
    pool: &PgPool,
    faculty_id: &str,
    offset: i64,
    limit: i64,
) -> Result<Vec<NotificationRow>, sqlx::Error> {
    sqlx::query_as::<_, NotificationRow>(
        "SELECT s.id AS submission_id,
                s.title,
                s.status,
                s.exam_date,
                s.start_time,
                s.end_time,
                r.name AS room_name,
                st.full_name AS student_name,
                COALESCE(s.supervisor_id = $1, FALSE) AS viewer_is_supervisor,
                s.updated_at AS event_at
         FROM exam_submissions s
         JOIN accounts st ON st.id = s.student_id
         LEFT JOIN rooms r ON r.id = s.room_id
         WHERE s.supervisor_id = $1
            OR EXISTS (
                SELECT 1 FROM examiner_assignments ea
                WHERE ea.submission_id = s.id AND ea.examiner_id = $1
            )
         ORDER BY s.updated_at DESC, s.id DESC
         OFFSET $2
         LIMIT $3",
    )
    .bind(faculty_id)
    .bind(offset.max(0))
    .bind(limit.max(1))
    .fetch_all(pool)
    .await
}

pub(crate) async fn count_notifications(
    pool: &PgPool,
    faculty_id: &str,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*)
         FROM exam_submissions s
         WHERE s.supervisor_id = $1
            OR EXISTS (
                SELECT 1 FROM examiner_assignments ea
                WHERE ea.submission_id = s.id AND ea.examiner_id = $1
            )",
    )
    .bind(faculty_id)
    .fetch_one(pool)
    .await
}

fn listing_select(viewer_id: Option<&str>) -> QueryBuilder<'_, Postgres> {
    let mut builder = QueryBuilder::<Postgres>::new(
        "SELECT s.id,
                s.title,
                s.document_ref,
                s.status,
                s.exam_date,
                s.start_time,
                s.end_time,
                s.created_at,
                s.updated_at,
                s.student_id,
                st.full_name AS student_name,
                st.id_number AS student_id_number,
                st.program AS student_program,
                s.supervisor_id,
                sup.full_name AS supervisor_name,
                s.room_id,
                r.name AS room_name,
                e1.examiner_id AS first_examiner_id,
                a1.full_name AS first_examiner_name,
                e2.examiner_id AS second_examiner_id,
                a2.full_name AS second_examiner_name,
                COALESCE(s.supervisor_id = ",
    );
    builder.push_bind(viewer_id);
    builder.push(", FALSE) AS viewer_is_supervisor");
    builder.push(LISTING_JOINS);
    builder
}

fn push_filter<'a>(builder: &mut QueryBuilder<'a, Postgres>, filter: &ListingFilter<'a>) {
    builder.push(" WHERE TRUE");

    match filter.scope {
        ListingScope::Everything => {}
        ListingScope::OwnedBy(student_id) => {
            builder.push(" AND s.student_id = ");
            builder.push_bind(student_id);
        }
        ListingScope::RelatedTo { faculty_id, relation } => {
            let is_supervisor = |builder: &mut QueryBuilder<'a, Postgres>| {
                builder.push("s.supervisor_id = ");
                builder.push_bind(faculty_id);
            };
            let is_examiner = |builder: &mut QueryBuilder<'a, Postgres>| {
                builder.push(
                    "EXISTS (SELECT 1 FROM examiner_assignments ea \
                     WHERE ea.submission_id = s.id AND ea.examiner_id = ",
                );
                builder.push_bind(faculty_id);
                builder.push(")");
            };

            match relation {
                FacultyRelation::Any => {
                    builder.push(" AND (");
                    is_supervisor(builder);
                    builder.push(" OR ");
                    is_examiner(builder);
                    builder.push(")");
                }
                FacultyRelation::Supervisor => {
                    builder.push(" AND ");
                    is_supervisor(builder);
                }
                FacultyRelation::ExaminerOnly => {
                    builder.push(" AND ");
                    is_examiner(builder);
                    builder.push(" AND s.supervisor_id IS DISTINCT FROM ");
                    builder.push_bind(faculty_id);
                }
            }
        }
    }

    if let Some(statuses) = filter.statuses {
        builder.push(" AND s.status = ANY(");
        builder.push_bind(statuses.to_vec());
        builder.push(")");
    }
    if let Some(from) = filter.date_from {
        builder.push(" AND s.exam_date >= ");
        builder.push_bind(from);
    }
    if let Some(before) = filter.date_before {
        builder.push(" AND s.exam_date < ");
        builder.push_bind(before);
    }
}
