use crate::lifecycle::Lifecycle;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub credits: i32,
    #[sea_orm(unique)]
    pub code: String, // e.g. "MAT101"
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::enrollments::Entity")]
    Enrollments,
}

impl Related<super::enrollments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl Lifecycle for Entity {
    const LABEL: &'static str = "Course";

    fn id_column() -> Column {
        Column::Id
    }

    fn active_column() -> Column {
        Column::Active
    }
}

impl ActiveModelBehavior for ActiveModel {}
