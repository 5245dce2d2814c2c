use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct FacultyWorkload {
    pub(crate) faculty_id: String,
    pub(crate) full_name: String,
    pub(crate) supervision_count: i64,
    pub(crate) examination_count: i64,
    pub(crate) total: i64,
}

#[derive(Debug, Serialize)]
pub(crate) struct WorkloadSummary {
    pub(crate) faculty: Vec<FacultyWorkload>,
    pub(crate) most: FacultyWorkload,
    pub(crate) least: FacultyWorkload,
    pub(crate) average: f64,
}
