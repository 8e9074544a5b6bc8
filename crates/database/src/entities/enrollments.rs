use crate::lifecycle::Lifecycle;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "enrollments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub student_id: i32,
    /// `None` once the course has been purged
    pub course_id: Option<i32>,
    #[sea_orm(column_type = "Double", nullable)]
    pub final_grade: Option<f64>,
    pub registered_on: Date,
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
    #[sea_orm(has_many = "super::enrollment_instructors::Entity")]
    EnrollmentInstructors,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::enrollment_instructors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EnrollmentInstructors.def()
    }
}

// Many-to-many relationship with instructors
impl Related<super::instructors::Entity> for Entity {
    fn to() -> RelationDef {
        super::enrollment_instructors::Relation::Instructor.def()
    }

    fn via() -> Option<RelationDef> {
        Some(
            super::enrollment_instructors::Relation::Enrollment
                .def()
                .rev(),
        )
    }
}

impl Lifecycle for Entity {
    const LABEL: &'static str = "Enrollment";

    fn id_column() -> Column {
        Column::Id
    }

    fn active_column() -> Column {
        Column::Active
    }
}

impl ActiveModelBehavior for ActiveModel {}
