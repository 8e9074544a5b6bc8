pub mod course;
pub mod enrollment;
pub mod history;
pub mod instructor;
pub mod report;
pub mod student;
