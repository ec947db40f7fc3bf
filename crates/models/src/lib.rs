pub mod batch_status;
pub mod enrollment;
pub mod follow_up;
pub mod lead_status;
pub mod placement_status;
pub mod placement_terms;
pub mod student_status;
