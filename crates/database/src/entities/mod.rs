pub mod batch;
pub mod company;
pub mod course;
pub mod employee;
pub mod lead;
pub mod lead_follow_up;
pub mod placement;
pub mod student;
pub mod student_status_history;
