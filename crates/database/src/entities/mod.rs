pub mod courses;
pub mod enrollment_instructors;
pub mod enrollments;
pub mod histories;
pub mod instructors;
pub mod students;
