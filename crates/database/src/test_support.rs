use migration::{Migrator, MigratorTrait};
use models::records::{NewCourse, NewEnrollment, NewInstructor, NewStudent};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// A fresh, migrated in-memory database. A single pooled connection keeps
/// every query on the same in-memory file.
pub async fn setup() -> DatabaseConnection {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("failed to open in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("failed to run migrations");
    db
}

pub fn sample_student(tag: &str) -> NewStudent {
    NewStudent {
        name: format!("Student {tag}"),
        national_id: format!("CC{tag}"),
        email: format!("{tag}@x.com"),
        semester: 1,
    }
}

pub fn sample_course(code: &str) -> NewCourse {
    NewCourse {
        name: format!("Course {code}"),
        credits: 3,
        code: code.to_owned(),
    }
}

pub fn sample_instructor(name: &str) -> NewInstructor {
    NewInstructor {
        name: name.to_owned(),
        specialty: Some("Mathematics".to_owned()),
    }
}

pub fn sample_enrollment(student_id: i32, course_id: i32, instructor_ids: Vec<i32>) -> NewEnrollment {
    NewEnrollment {
        student_id,
        course_id,
        final_grade: None,
        registered_on: None,
        instructor_ids,
    }
}
