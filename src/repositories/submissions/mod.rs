mod commands;
mod queries;
mod types;

pub(crate) use commands::{
    clear_supervisor, create, delete_for_student, schedule_if_accepted, transition,
};
pub(crate) use queries::{
    count, count_notifications, find_active_id_for_student, find_by_id, find_listing,
    latest_for_student, list, list_notifications,
};
pub(crate) use types::{
    CreateSubmission, FacultyRelation, ListingFilter, ListingOrder, ListingScope,
    NotificationRow, ScheduleSubmission, SubmissionListingRow,
};
