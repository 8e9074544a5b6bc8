use crate::{
    entities::{enrollment_instructors, enrollments, histories, students},
    error::{RecordError, RecordResult},
    lifecycle::{find_any, listing, set_active},
};
use log::{debug, info};
use models::{
    lifecycle::{DeleteMode, Visibility},
    records::{NewStudent, StudentPatch},
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait,
    DatabaseTransaction, EntityTrait, IntoActiveModel, QueryFilter,
    TransactionTrait,
};

pub struct StudentService;

impl StudentService {
    /// Create a student. National id and email must be unique across every
    /// student, soft deleted or not.
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        input: NewStudent,
    ) -> RecordResult<students::Model> {
        Self::ensure_unique(db, Some(&input.national_id), Some(&input.email), None).await?;

        let student = students::ActiveModel {
            name: Set(input.name),
            national_id: Set(input.national_id),
            email: Set(input.email),
            semester: Set(input.semester),
            active: Set(true),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!("Created student {} ({})", student.id, student.national_id);
        Ok(student)
    }

    pub async fn get<C: ConnectionTrait>(db: &C, id: i32) -> RecordResult<students::Model> {
        find_any::<students::Entity, _>(db, id).await
    }

    pub async fn get_by_national_id<C: ConnectionTrait>(
        db: &C,
        national_id: &str,
    ) -> RecordResult<students::Model> {
        students::Entity::find()
            .filter(students::Column::NationalId.eq(national_id))
            .one(db)
            .await?
            .ok_or_else(|| RecordError::not_found("Student", national_id))
    }

    pub async fn get_by_email<C: ConnectionTrait>(
        db: &C,
        email: &str,
    ) -> RecordResult<students::Model> {
        students::Entity::find()
            .filter(students::Column::Email.eq(email))
            .one(db)
            .await?
            .ok_or_else(|| RecordError::not_found("Student", email))
    }

    pub async fn list<C: ConnectionTrait>(
        db: &C,
        visibility: Visibility,
    ) -> RecordResult<Vec<students::Model>> {
        Ok(listing::<students::Entity>(visibility).all(db).await?)
    }

    /// Apply the provided fields. Changing a unique key re-checks it against
    /// every other student.
    pub async fn update<C: ConnectionTrait>(
        db: &C,
        id: i32,
        patch: StudentPatch,
    ) -> RecordResult<students::Model> {
        let current = Self::get(db, id).await?;

        let national_id = patch
            .national_id
            .as_deref()
            .filter(|value| *value != current.national_id);
        let email = patch.email.as_deref().filter(|value| *value != current.email);
        Self::ensure_unique(db, national_id, email, Some(id)).await?;

        let mut student = current.into_active_model();
        if let Some(name) = patch.name {
            student.name = Set(name);
        }
        if let Some(national_id) = patch.national_id {
            student.national_id = Set(national_id);
        }
        if let Some(email) = patch.email {
            student.email = Set(email);
        }
        if let Some(semester) = patch.semester {
            student.semester = Set(semester);
        }
        if let Some(active) = patch.active {
            student.active = Set(active);
        }

        let student = student.update(db).await?;
        info!("Updated student {id}");
        Ok(student)
    }

    /// Soft delete flips the active flag. Hard delete removes the student
    /// together with its enrollments, their instructor links and its history.
    pub async fn delete<C: ConnectionTrait + TransactionTrait>(
        db: &C,
        id: i32,
        mode: DeleteMode,
    ) -> RecordResult<students::Model> {
        match mode {
            DeleteMode::Soft => {
                set_active::<students::Entity, _>(db, id, false).await?;
                info!("Marked student {id} as eliminated");
                Self::get(db, id).await
            }
            DeleteMode::Hard => {
                let removed = db
                    .transaction::<_, students::Model, RecordError>(move |txn| {
                        Box::pin(async move { Self::purge(txn, id).await })
                    })
                    .await?;
                info!("Removed student {id} and its dependent records");
                Ok(removed)
            }
        }
    }

    async fn purge(txn: &DatabaseTransaction, id: i32) -> RecordResult<students::Model> {
        let student = find_any::<students::Entity, _>(txn, id).await?;

        let enrollment_ids: Vec<i32> = enrollments::Entity::find()
            .filter(enrollments::Column::StudentId.eq(id))
            .all(txn)
            .await?
            .into_iter()
            .map(|enrollment| enrollment.id)
            .collect();

        // Links first, they reference the enrollments
        if !enrollment_ids.is_empty() {
            enrollment_instructors::Entity::delete_many()
                .filter(enrollment_instructors::Column::EnrollmentId.is_in(enrollment_ids.clone()))
                .exec(txn)
                .await?;
            enrollments::Entity::delete_many()
                .filter(enrollments::Column::Id.is_in(enrollment_ids.clone()))
                .exec(txn)
                .await?;
        }

        histories::Entity::delete_many()
            .filter(histories::Column::StudentId.eq(id))
            .exec(txn)
            .await?;

        students::Entity::delete_by_id(id).exec(txn).await?;

        debug!(
            "Cascaded removal of student {id}: {} enrollments",
            enrollment_ids.len()
        );
        Ok(student)
    }

    /// Reject values already held by another student. `None` skips a key.
    async fn ensure_unique<C: ConnectionTrait>(
        db: &C,
        national_id: Option<&str>,
        email: Option<&str>,
        exclude_id: Option<i32>,
    ) -> RecordResult<()> {
        let mut keys = Condition::any();
        if let Some(national_id) = national_id {
            keys = keys.add(students::Column::NationalId.eq(national_id));
        }
        if let Some(email) = email {
            keys = keys.add(students::Column::Email.eq(email));
        }
        if keys.is_empty() {
            return Ok(());
        }

        let mut query = students::Entity::find().filter(keys);
        if let Some(exclude_id) = exclude_id {
            query = query.filter(students::Column::Id.ne(exclude_id));
        }

        match query.one(db).await? {
            Some(existing) if national_id == Some(existing.national_id.as_str()) => {
                Err(RecordError::Conflict(format!(
                    "a student with national id '{}' already exists",
                    existing.national_id
                )))
            }
            Some(existing) => Err(RecordError::Conflict(format!(
                "a student with email '{}' already exists",
                existing.email
            ))),
            None => Ok(()),
        }
    }
}
