use crate::{
    entities::{histories, students},
    error::{RecordError, RecordResult},
    lifecycle::find_active,
};
use log::info;
use models::records::{HistoryPatch, NewHistory};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait,
    IntoActiveModel, ModelTrait, QueryFilter, QueryOrder,
};

pub struct HistoryService;

impl HistoryService {
    /// Create the academic history of an active student. A student has at
    /// most one; a second one is a `BadRequest`, not a `Conflict`.
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        input: NewHistory,
    ) -> RecordResult<histories::Model> {
        let student = find_active::<students::Entity, _>(db, input.student_id).await?;

        if Self::find_for_student(db, student.id).await?.is_some() {
            return Err(RecordError::BadRequest(format!(
                "student {} already has an academic history",
                student.id
            )));
        }

        let history = histories::ActiveModel {
            student_id: Set(student.id),
            average_grade: Set(input.average_grade),
            record_number: Set(input.record_number),
            issued_on: Set(input.issued_on),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!("Created history {} for student {}", history.id, student.id);
        Ok(history)
    }

    pub async fn get<C: ConnectionTrait>(db: &C, id: i32) -> RecordResult<histories::Model> {
        histories::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| RecordError::not_found("History", id))
    }

    pub async fn get_by_student<C: ConnectionTrait>(
        db: &C,
        student_id: i32,
    ) -> RecordResult<histories::Model> {
        Self::find_for_student(db, student_id)
            .await?
            .ok_or_else(|| RecordError::not_found("History for student", student_id))
    }

    pub async fn list<C: ConnectionTrait>(db: &C) -> RecordResult<Vec<histories::Model>> {
        Ok(histories::Entity::find()
            .order_by_asc(histories::Column::Id)
            .all(db)
            .await?)
    }

    /// Apply only the provided fields. The owning student is fixed at creation.
    pub async fn update<C: ConnectionTrait>(
        db: &C,
        id: i32,
        patch: HistoryPatch,
    ) -> RecordResult<histories::Model> {
        let current = Self::get(db, id).await?;

        if let Some(student_id) = patch.student_id
            && student_id != current.student_id
        {
            return Err(RecordError::BadRequest(format!(
                "history {id} belongs to student {}; create a new history for student {student_id} instead",
                current.student_id
            )));
        }

        let mut history = current.into_active_model();
        if let Some(average_grade) = patch.average_grade {
            history.average_grade = Set(average_grade);
        }
        if let Some(record_number) = patch.record_number {
            history.record_number = Set(record_number);
        }
        if let Some(issued_on) = patch.issued_on {
            history.issued_on = Set(issued_on);
        }

        let history = history.update(db).await?;
        info!("Updated history {id}");
        Ok(history)
    }

    /// Histories carry no active flag, so delete always removes the row
    pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> RecordResult<histories::Model> {
        let history = Self::get(db, id).await?;
        history.clone().delete(db).await?;
        info!("Removed history {id}");
        Ok(history)
    }

    async fn find_for_student<C: ConnectionTrait>(
        db: &C,
        student_id: i32,
    ) -> RecordResult<Option<histories::Model>> {
        Ok(histories::Entity::find()
            .filter(histories::Column::StudentId.eq(student_id))
            .one(db)
            .await?)
    }
}
