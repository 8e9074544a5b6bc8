use crate::{
    entities::{courses, enrollment_instructors, enrollments, instructors, students},
    error::RecordResult,
    lifecycle::{find_any, listing},
};
use models::lifecycle::Visibility;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use std::collections::HashMap;

/// Shown in place of a course name once the course row is gone
pub const COURSE_REMOVED: &str = "course removed";

#[derive(Debug, Serialize)]
pub struct StudentReport {
    #[serde(flatten)]
    pub student: students::Model,
    pub enrollments: Vec<EnrollmentDetail>,
}

#[derive(Debug, Serialize)]
pub struct EnrollmentDetail {
    #[serde(flatten)]
    pub enrollment: enrollments::Model,
    pub course: String,
    pub instructors: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct InstructorRoster {
    #[serde(flatten)]
    pub instructor: instructors::Model,
    pub enrollments: Vec<String>,
}

pub struct ReportService;

impl ReportService {
    /// A student with every enrollment it has ever had, active or not,
    /// joined with course and instructor names
    pub async fn student_report<C: ConnectionTrait>(
        db: &C,
        student_id: i32,
    ) -> RecordResult<StudentReport> {
        let student = find_any::<students::Entity, _>(db, student_id).await?;

        let enrollments = enrollments::Entity::find()
            .filter(enrollments::Column::StudentId.eq(student.id))
            .order_by_asc(enrollments::Column::Id)
            .all(db)
            .await?;

        if enrollments.is_empty() {
            return Ok(StudentReport {
                student,
                enrollments: vec![],
            });
        }

        // Batch fetch the courses that still exist
        let course_ids: Vec<i32> = enrollments.iter().filter_map(|e| e.course_id).collect();
        let course_names: HashMap<i32, String> = courses::Entity::find()
            .filter(courses::Column::Id.is_in(course_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|course| (course.id, course.name))
            .collect();

        // Batch fetch all enrollment-instructor relationships
        let enrollment_ids: Vec<i32> = enrollments.iter().map(|e| e.id).collect();
        let mut instructors_by_enrollment: HashMap<i32, Vec<String>> = HashMap::new();
        for (link, instructor) in enrollment_instructors::Entity::find()
            .filter(enrollment_instructors::Column::EnrollmentId.is_in(enrollment_ids))
            .order_by_asc(enrollment_instructors::Column::InstructorId)
            .find_also_related(instructors::Entity)
            .all(db)
            .await?
        {
            if let Some(instructor) = instructor {
                instructors_by_enrollment
                    .entry(link.enrollment_id)
                    .or_default()
                    .push(instructor.name);
            }
        }

        let enrollments = enrollments
            .into_iter()
            .map(|enrollment| {
                let course = enrollment
                    .course_id
                    .and_then(|id| course_names.get(&id).cloned())
                    .unwrap_or_else(|| COURSE_REMOVED.to_owned());
                let instructors = instructors_by_enrollment
                    .remove(&enrollment.id)
                    .unwrap_or_default();

                EnrollmentDetail {
                    enrollment,
                    course,
                    instructors,
                }
            })
            .collect();

        Ok(StudentReport {
            student,
            enrollments,
        })
    }

    /// Every active instructor with a one-line summary of each linked
    /// enrollment. Students and courses are referenced by id only.
    pub async fn instructor_roster<C: ConnectionTrait>(
        db: &C,
    ) -> RecordResult<Vec<InstructorRoster>> {
        let instructors = listing::<instructors::Entity>(Visibility::Active)
            .all(db)
            .await?;

        if instructors.is_empty() {
            return Ok(vec![]);
        }

        let instructor_ids: Vec<i32> = instructors.iter().map(|i| i.id).collect();
        let mut summaries: HashMap<i32, Vec<String>> = HashMap::new();
        for (link, enrollment) in enrollment_instructors::Entity::find()
            .filter(enrollment_instructors::Column::InstructorId.is_in(instructor_ids))
            .order_by_asc(enrollment_instructors::Column::EnrollmentId)
            .find_also_related(enrollments::Entity)
            .all(db)
            .await?
        {
            if let Some(enrollment) = enrollment {
                summaries
                    .entry(link.instructor_id)
                    .or_default()
                    .push(summarize(&enrollment));
            }
        }

        Ok(instructors
            .into_iter()
            .map(|instructor| InstructorRoster {
                enrollments: summaries.remove(&instructor.id).unwrap_or_default(),
                instructor,
            })
            .collect())
    }
}

fn summarize(enrollment: &enrollments::Model) -> String {
    let course = enrollment
        .course_id
        .map_or_else(|| "-".to_owned(), |id| id.to_string());
    format!(
        "Enrollment ID {} (Student: {}, Course: {course})",
        enrollment.id, enrollment.student_id
    )
}
