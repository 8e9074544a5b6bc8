use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Default listings filter on the active flag
        manager
            .create_index(
                Index::create()
                    .name("idx_students_active")
                    .table(Students::Table)
                    .col(Students::Active)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_courses_active_credits")
                    .table(Courses::Table)
                    .col(Courses::Active)
                    .col(Courses::Credits)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_instructors_active")
                    .table(Instructors::Table)
                    .col(Instructors::Active)
                    .to_owned(),
            )
            .await?;

        // Course purges detach enrollments by course_id
        manager
            .create_index(
                Index::create()
                    .name("idx_enrollments_course_id")
                    .table(Enrollments::Table)
                    .col(Enrollments::CourseId)
                    .to_owned(),
            )
            .await?;

        // The composite primary key already covers lookups by enrollment_id
        manager
            .create_index(
                Index::create()
                    .name("idx_enrollment_instructors_instructor_id")
                    .table(EnrollmentInstructors::Table)
                    .col(EnrollmentInstructors::InstructorId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, table) in [
            ("idx_students_active", Students::Table.into_iden()),
            ("idx_courses_active_credits", Courses::Table.into_iden()),
            ("idx_instructors_active", Instructors::Table.into_iden()),
            ("idx_enrollments_course_id", Enrollments::Table.into_iden()),
            (
                "idx_enrollment_instructors_instructor_id",
                EnrollmentInstructors::Table.into_iden(),
            ),
        ] {
            manager
                .drop_index(Index::drop().name(name).table(table).to_owned())
                .await?;
        }

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Students {
    Table,
    Active,
}

#[derive(DeriveIden)]
enum Courses {
    Table,
    Active,
    Credits,
}

#[derive(DeriveIden)]
enum Instructors {
    Table,
    Active,
}

#[derive(DeriveIden)]
enum Enrollments {
    Table,
    CourseId,
}

#[derive(DeriveIden)]
enum EnrollmentInstructors {
    Table,
    InstructorId,
}
