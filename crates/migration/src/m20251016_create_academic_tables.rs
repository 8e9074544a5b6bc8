use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create students table
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Students::Name).string().not_null())
                    .col(
                        ColumnDef::new(Students::NationalId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Students::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Students::Semester).integer().not_null())
                    .col(
                        ColumnDef::new(Students::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        // Create courses table
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Courses::Name).string().not_null())
                    .col(ColumnDef::new(Courses::Credits).integer().not_null())
                    .col(
                        ColumnDef::new(Courses::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Courses::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        // Create instructors table
        manager
            .create_table(
                Table::create()
                    .table(Instructors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Instructors::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Instructors::Name).string().not_null())
                    .col(ColumnDef::new(Instructors::Specialty).string())
                    .col(
                        ColumnDef::new(Instructors::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        // Create enrollments table. Deletes never cascade at this level; the
        // services remove dependents explicitly inside their transaction.
        manager
            .create_table(
                Table::create()
                    .table(Enrollments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Enrollments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Enrollments::StudentId).integer().not_null())
                    .col(ColumnDef::new(Enrollments::CourseId).integer())
                    .col(ColumnDef::new(Enrollments::FinalGrade).double())
                    .col(ColumnDef::new(Enrollments::RegisteredOn).date().not_null())
                    .col(
                        ColumnDef::new(Enrollments::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-enrollments-student_id")
                            .from(Enrollments::Table, Enrollments::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-enrollments-course_id")
                            .from(Enrollments::Table, Enrollments::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        // One row per (student, course) regardless of the active flag
        manager
            .create_index(
                Index::create()
                    .name("uq-enrollments-student_id-course_id")
                    .table(Enrollments::Table)
                    .col(Enrollments::StudentId)
                    .col(Enrollments::CourseId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create enrollment_instructors junction table (many-to-many)
        manager
            .create_table(
                Table::create()
                    .table(EnrollmentInstructors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EnrollmentInstructors::EnrollmentId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EnrollmentInstructors::InstructorId)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(EnrollmentInstructors::EnrollmentId)
                            .col(EnrollmentInstructors::InstructorId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-enrollment_instructors-enrollment_id")
                            .from(
                                EnrollmentInstructors::Table,
                                EnrollmentInstructors::EnrollmentId,
                            )
                            .to(Enrollments::Table, Enrollments::Id)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-enrollment_instructors-instructor_id")
                            .from(
                                EnrollmentInstructors::Table,
                                EnrollmentInstructors::InstructorId,
                            )
                            .to(Instructors::Table, Instructors::Id)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        // Create histories table, at most one per student
        manager
            .create_table(
                Table::create()
                    .table(Histories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Histories::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Histories::StudentId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Histories::AverageGrade).double())
                    .col(ColumnDef::new(Histories::RecordNumber).string())
                    .col(ColumnDef::new(Histories::IssuedOn).date())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-histories-student_id")
                            .from(Histories::Table, Histories::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop dependents before the tables they reference
        manager
            .drop_table(Table::drop().table(Histories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EnrollmentInstructors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Enrollments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Instructors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Students {
    Table,
    Id,
    Name,
    NationalId,
    Email,
    Semester,
    Active,
}

#[derive(DeriveIden)]
enum Courses {
    Table,
    Id,
    Name,
    Credits,
    Code,
    Active,
}

#[derive(DeriveIden)]
enum Instructors {
    Table,
    Id,
    Name,
    Specialty,
    Active,
}

#[derive(DeriveIden)]
enum Enrollments {
    Table,
    Id,
    StudentId,
    CourseId,
    FinalGrade,
    RegisteredOn,
    Active,
}

#[derive(DeriveIden)]
enum EnrollmentInstructors {
    Table,
    EnrollmentId,
    InstructorId,
}

#[derive(DeriveIden)]
enum Histories {
    Table,
    Id,
    StudentId,
    AverageGrade,
    RecordNumber,
    IssuedOn,
}
