use crate::{
    entities::instructors,
    error::RecordResult,
    lifecycle::{find_any, listing, set_active},
};
use log::info;
use models::{
    lifecycle::Visibility,
    records::{InstructorPatch, NewInstructor},
};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ConnectionTrait, IntoActiveModel};

pub struct InstructorService;

impl InstructorService {
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        input: NewInstructor,
    ) -> RecordResult<instructors::Model> {
        let instructor = instructors::ActiveModel {
            name: Set(input.name),
            specialty: Set(input.specialty),
            active: Set(true),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!("Created instructor {}", instructor.id);
        Ok(instructor)
    }

    pub async fn get<C: ConnectionTrait>(db: &C, id: i32) -> RecordResult<instructors::Model> {
        find_any::<instructors::Entity, _>(db, id).await
    }

    pub async fn list<C: ConnectionTrait>(
        db: &C,
        visibility: Visibility,
    ) -> RecordResult<Vec<instructors::Model>> {
        Ok(listing::<instructors::Entity>(visibility).all(db).await?)
    }

    pub async fn update<C: ConnectionTrait>(
        db: &C,
        id: i32,
        patch: InstructorPatch,
    ) -> RecordResult<instructors::Model> {
        let mut instructor = Self::get(db, id).await?.into_active_model();
        if let Some(name) = patch.name {
            instructor.name = Set(name);
        }
        if let Some(specialty) = patch.specialty {
            instructor.specialty = Set(specialty);
        }
        if let Some(active) = patch.active {
            instructor.active = Set(active);
        }

        let instructor = instructor.update(db).await?;
        info!("Updated instructor {id}");
        Ok(instructor)
    }

    /// Soft delete only; existing enrollment links are left in place
    pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> RecordResult<instructors::Model> {
        set_active::<instructors::Entity, _>(db, id, false).await?;
        info!("Marked instructor {id} as eliminated");
        Self::get(db, id).await
    }
}

#[cfg(test)]
mod test {
    use crate::{
        error::RecordError,
        services::instructor::InstructorService,
        test_support::{sample_instructor, setup},
    };
    use models::{lifecycle::Visibility, records::InstructorPatch};

    #[tokio::test]
    async fn test_instructor_lifecycle() {
        let db = setup().await;
        let ada = InstructorService::create(&db, sample_instructor("Ada"))
            .await
            .unwrap();
        // Names are not unique
        let twin = InstructorService::create(&db, sample_instructor("Ada"))
            .await
            .unwrap();
        assert_ne!(ada.id, twin.id);

        let deleted = InstructorService::delete(&db, ada.id).await.unwrap();
        assert!(!deleted.active);

        let active = InstructorService::list(&db, Visibility::Active).await.unwrap();
        assert_eq!(active.iter().map(|i| i.id).collect::<Vec<_>>(), vec![twin.id]);

        let patch = InstructorPatch {
            specialty: Some(Some("Physics".into())),
            active: Some(true),
            ..Default::default()
        };
        let restored = InstructorService::update(&db, ada.id, patch).await.unwrap();
        assert!(restored.active);
        assert_eq!(restored.specialty.as_deref(), Some("Physics"));
        assert_eq!(restored.name, "Ada");
    }

    #[tokio::test]
    async fn test_missing_instructor() {
        let db = setup().await;
        assert!(matches!(
            InstructorService::delete(&db, 3).await,
            Err(RecordError::NotFound { entity: "Instructor", .. })
        ));
    }
}
