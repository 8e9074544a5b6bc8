use crate::{
    entities::{courses, enrollments},
    error::{RecordError, RecordResult},
    lifecycle::{find_any, listing, set_active},
};
use log::info;
use models::{
    lifecycle::{DeleteMode, Visibility},
    records::{CoursePatch, NewCourse},
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait,
    DatabaseTransaction, EntityTrait, IntoActiveModel, QueryFilter, TransactionTrait,
    sea_query::{Expr, Value},
};

pub struct CourseService;

impl CourseService {
    /// Create a course. The code must be unique across every course.
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        input: NewCourse,
    ) -> RecordResult<courses::Model> {
        Self::ensure_code_free(db, &input.code, None).await?;

        let course = courses::ActiveModel {
            name: Set(input.name),
            credits: Set(input.credits),
            code: Set(input.code),
            active: Set(true),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!("Created course {} ({})", course.id, course.code);
        Ok(course)
    }

    pub async fn get<C: ConnectionTrait>(db: &C, id: i32) -> RecordResult<courses::Model> {
        find_any::<courses::Entity, _>(db, id).await
    }

    pub async fn get_by_code<C: ConnectionTrait>(
        db: &C,
        code: &str,
    ) -> RecordResult<courses::Model> {
        courses::Entity::find()
            .filter(courses::Column::Code.eq(code))
            .one(db)
            .await?
            .ok_or_else(|| RecordError::not_found("Course", code))
    }

    /// List courses, optionally only those worth `credits`
    pub async fn list<C: ConnectionTrait>(
        db: &C,
        visibility: Visibility,
        credits: Option<i32>,
    ) -> RecordResult<Vec<courses::Model>> {
        let mut query = listing::<courses::Entity>(visibility);
        if let Some(credits) = credits {
            query = query.filter(courses::Column::Credits.eq(credits));
        }
        Ok(query.all(db).await?)
    }

    pub async fn update<C: ConnectionTrait>(
        db: &C,
        id: i32,
        patch: CoursePatch,
    ) -> RecordResult<courses::Model> {
        let current = Self::get(db, id).await?;
        if let Some(code) = patch.code.as_deref()
            && code != current.code
        {
            Self::ensure_code_free(db, code, Some(id)).await?;
        }

        let mut course = current.into_active_model();
        if let Some(name) = patch.name {
            course.name = Set(name);
        }
        if let Some(credits) = patch.credits {
            course.credits = Set(credits);
        }
        if let Some(code) = patch.code {
            course.code = Set(code);
        }
        if let Some(active) = patch.active {
            course.active = Set(active);
        }

        let course = course.update(db).await?;
        info!("Updated course {id}");
        Ok(course)
    }

    /// Soft delete flips the active flag. Hard delete removes the row; its
    /// enrollments are kept but detached, so reports show the course as removed.
    pub async fn delete<C: ConnectionTrait + TransactionTrait>(
        db: &C,
        id: i32,
        mode: DeleteMode,
    ) -> RecordResult<courses::Model> {
        match mode {
            DeleteMode::Soft => {
                set_active::<courses::Entity, _>(db, id, false).await?;
                info!("Marked course {id} as eliminated");
                Self::get(db, id).await
            }
            DeleteMode::Hard => {
                let removed = db
                    .transaction::<_, courses::Model, RecordError>(move |txn| {
                        Box::pin(async move { Self::purge(txn, id).await })
                    })
                    .await?;
                info!("Removed course {id}");
                Ok(removed)
            }
        }
    }

    async fn purge(txn: &DatabaseTransaction, id: i32) -> RecordResult<courses::Model> {
        let course = find_any::<courses::Entity, _>(txn, id).await?;

        let detached = enrollments::Entity::update_many()
            .col_expr(enrollments::Column::CourseId, Expr::value(Value::Int(None)))
            .filter(enrollments::Column::CourseId.eq(id))
            .exec(txn)
            .await?;
        courses::Entity::delete_by_id(id).exec(txn).await?;

        log::debug!(
            "Detached {} enrollments from course {id}",
            detached.rows_affected
        );
        Ok(course)
    }

    async fn ensure_code_free<C: ConnectionTrait>(
        db: &C,
        code: &str,
        exclude_id: Option<i32>,
    ) -> RecordResult<()> {
        let mut query = courses::Entity::find().filter(courses::Column::Code.eq(code));
        if let Some(exclude_id) = exclude_id {
            query = query.filter(courses::Column::Id.ne(exclude_id));
        }

        if query.one(db).await?.is_some() {
            return Err(RecordError::Conflict(format!(
                "a course with code '{code}' already exists"
            )));
        }
        Ok(())
    }
}
