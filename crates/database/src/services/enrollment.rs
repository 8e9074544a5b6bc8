use crate::{
    entities::{courses, enrollment_instructors, enrollments, instructors, students},
    error::{RecordError, RecordResult},
    lifecycle::{find_active, find_any, listing, set_active},
};
use chrono::Utc;
use log::{info, warn};
use models::{
    lifecycle::Visibility,
    records::{EnrollmentPatch, NewEnrollment},
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseTransaction,
    EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, TransactionTrait,
};

pub struct EnrollmentService;

impl EnrollmentService {
    /// Enroll a student in a course and link the requested instructors.
    ///
    /// Runs in one transaction. The student, the course and every instructor
    /// must exist and be active; if any check fails nothing is written. A
    /// (student, course) pair can only ever hold one enrollment row, so a
    /// second one is a `Conflict` whether the first is active or eliminated.
    pub async fn create<C: ConnectionTrait + TransactionTrait>(
        db: &C,
        input: NewEnrollment,
    ) -> RecordResult<enrollments::Model> {
        let (student_id, course_id) = (input.student_id, input.course_id);

        let result = db
            .transaction::<_, enrollments::Model, RecordError>(move |txn| {
                Box::pin(async move { Self::create_in(txn, input).await })
            })
            .await
            .map_err(RecordError::from);

        match &result {
            Ok(enrollment) => info!(
                "Created enrollment {} (student {student_id}, course {course_id})",
                enrollment.id
            ),
            Err(e) => warn!(
                "Rolled back enrollment of student {student_id} in course {course_id}: {e}"
            ),
        }

        result
    }

    async fn create_in(
        txn: &DatabaseTransaction,
        input: NewEnrollment,
    ) -> RecordResult<enrollments::Model> {
        let student = find_active::<students::Entity, _>(txn, input.student_id).await?;
        let course = find_active::<courses::Entity, _>(txn, input.course_id).await?;

        let existing = enrollments::Entity::find()
            .filter(enrollments::Column::StudentId.eq(student.id))
            .filter(enrollments::Column::CourseId.eq(course.id))
            .one(txn)
            .await?;
        match existing {
            Some(existing) if existing.active => {
                return Err(RecordError::Conflict(format!(
                    "student {} is already enrolled in course {}",
                    student.id, course.id
                )));
            }
            Some(existing) => {
                return Err(RecordError::Conflict(format!(
                    "enrollment {} already records student {} in course {}; reactivate it instead",
                    existing.id, student.id, course.id
                )));
            }
            None => {}
        }

        let enrollment = enrollments::ActiveModel {
            student_id: Set(student.id),
            course_id: Set(Some(course.id)),
            final_grade: Set(input.final_grade),
            registered_on: Set(input
                .registered_on
                .unwrap_or_else(|| Utc::now().date_naive())),
            active: Set(true),
            ..Default::default()
        }
        .insert(txn)
        .await?;

        for instructor_id in input.unique_instructor_ids() {
            find_active::<instructors::Entity, _>(txn, instructor_id).await?;

            // Create a many-to-many link between enrollment and instructor
            enrollment_instructors::Entity::insert(enrollment_instructors::ActiveModel {
                enrollment_id: Set(enrollment.id),
                instructor_id: Set(instructor_id),
            })
            .exec_without_returning(txn)
            .await?;
        }

        Ok(enrollment)
    }

    pub async fn get<C: ConnectionTrait>(db: &C, id: i32) -> RecordResult<enrollments::Model> {
        find_any::<enrollments::Entity, _>(db, id).await
    }

    pub async fn list<C: ConnectionTrait>(
        db: &C,
        visibility: Visibility,
    ) -> RecordResult<Vec<enrollments::Model>> {
        Ok(listing::<enrollments::Entity>(visibility).all(db).await?)
    }

    /// Every enrollment of a student, active or not
    pub async fn list_for_student<C: ConnectionTrait>(
        db: &C,
        student_id: i32,
    ) -> RecordResult<Vec<enrollments::Model>> {
        Ok(enrollments::Entity::find()
            .filter(enrollments::Column::StudentId.eq(student_id))
            .order_by_asc(enrollments::Column::Id)
            .all(db)
            .await?)
    }

    /// Instructors linked to an enrollment, in link order
    pub async fn instructors<C: ConnectionTrait>(
        db: &C,
        id: i32,
    ) -> RecordResult<Vec<instructors::Model>> {
        let enrollment = Self::get(db, id).await?;

        let linked = enrollment_instructors::Entity::find()
            .filter(enrollment_instructors::Column::EnrollmentId.eq(enrollment.id))
            .order_by_asc(enrollment_instructors::Column::InstructorId)
            .find_also_related(instructors::Entity)
            .all(db)
            .await?
            .into_iter()
            .filter_map(|(_, instructor)| instructor)
            .collect();

        Ok(linked)
    }

    /// Change grade, date or the active flag. The student and course of an
    /// enrollment cannot be changed.
    pub async fn update<C: ConnectionTrait>(
        db: &C,
        id: i32,
        patch: EnrollmentPatch,
    ) -> RecordResult<enrollments::Model> {
        let current = Self::get(db, id).await?;

        if let Some(student_id) = patch.student_id
            && student_id != current.student_id
        {
            return Err(RecordError::BadRequest(format!(
                "the student of enrollment {id} cannot be changed"
            )));
        }
        if let Some(course_id) = patch.course_id
            && Some(course_id) != current.course_id
        {
            return Err(RecordError::BadRequest(format!(
                "the course of enrollment {id} cannot be changed"
            )));
        }

        let mut enrollment = current.into_active_model();
        if let Some(final_grade) = patch.final_grade {
            enrollment.final_grade = Set(final_grade);
        }
        if let Some(registered_on) = patch.registered_on {
            enrollment.registered_on = Set(registered_on);
        }
        if let Some(active) = patch.active {
            enrollment.active = Set(active);
        }

        let enrollment = enrollment.update(db).await?;
        info!("Updated enrollment {id}");
        Ok(enrollment)
    }

    /// Soft delete only; instructor links are kept with the row
    pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> RecordResult<enrollments::Model> {
        set_active::<enrollments::Entity, _>(db, id, false).await?;
        info!("Marked enrollment {id} as eliminated");
        Self::get(db, id).await
    }
}
