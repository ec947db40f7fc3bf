pub mod batch;
pub mod company;
pub mod course;
pub mod employee;
pub mod lead;
pub mod placement;
pub mod student;
