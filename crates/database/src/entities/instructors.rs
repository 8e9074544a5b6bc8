use crate::lifecycle::Lifecycle;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "instructors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub specialty: Option<String>,
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::enrollment_instructors::Entity")]
    EnrollmentInstructors,
}

impl Related<super::enrollment_instructors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EnrollmentInstructors.def()
    }
}

// Many-to-many relationship with enrollments
impl Related<super::enrollments::Entity> for Entity {
    fn to() -> RelationDef {
        super::enrollment_instructors::Relation::Enrollment.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::enrollment_instructors::Relation::Instructor.def().rev())
    }
}

impl Lifecycle for Entity {
    const LABEL: &'static str = "Instructor";

    fn id_column() -> Column {
        Column::Id
    }

    fn active_column() -> Column {
        Column::Active
    }
}

impl ActiveModelBehavior for ActiveModel {}
