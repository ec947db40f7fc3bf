use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create courses table
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Courses::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Courses::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Courses::Description).text())
                    .col(ColumnDef::new(Courses::DurationMonths).integer().not_null())
                    .col(ColumnDef::new(Courses::Fees).decimal().not_null())
                    .col(ColumnDef::new(Courses::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Courses::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        // Create employees table
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employees::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Employees::EmployeeCode)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Employees::FirstName).string().not_null())
                    .col(ColumnDef::new(Employees::LastName).string().not_null())
                    .col(
                        ColumnDef::new(Employees::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Employees::Phone).string())
                    .col(ColumnDef::new(Employees::Department).string())
                    .col(ColumnDef::new(Employees::Role).string().not_null())
                    .col(ColumnDef::new(Employees::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Employees::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        // Create companies table
        manager
            .create_table(
                Table::create()
                    .table(Companies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Companies::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Companies::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Companies::Industry).string())
                    .col(ColumnDef::new(Companies::ContactPerson).string())
                    .col(ColumnDef::new(Companies::Email).string())
                    .col(ColumnDef::new(Companies::Address).text())
                    .col(ColumnDef::new(Companies::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Companies::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        // Create leads table
        manager
            .create_table(
                Table::create()
                    .table(Leads::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Leads::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Leads::FirstName).string().not_null())
                    .col(ColumnDef::new(Leads::LastName).string().not_null())
                    .col(ColumnDef::new(Leads::Email).string().unique_key())
                    .col(ColumnDef::new(Leads::Phone).string().not_null())
                    .col(ColumnDef::new(Leads::CourseInterest).string())
                    .col(ColumnDef::new(Leads::Source).string())
                    .col(ColumnDef::new(Leads::Status).string().not_null())
                    .col(ColumnDef::new(Leads::AssignedCounsellorId).uuid())
                    .col(ColumnDef::new(Leads::ConvertedDate).timestamp())
                    .col(ColumnDef::new(Leads::Notes).text())
                    .col(ColumnDef::new(Leads::NextFollowUpDate).timestamp())
                    .col(ColumnDef::new(Leads::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Leads::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-leads-assigned_counsellor_id")
                            .from(Leads::Table, Leads::AssignedCounsellorId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Create batches table
        manager
            .create_table(
                Table::create()
                    .table(Batches::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Batches::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Batches::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Batches::CourseId).uuid().not_null())
                    .col(ColumnDef::new(Batches::StartDate).date().not_null())
                    .col(ColumnDef::new(Batches::EndDate).date())
                    .col(ColumnDef::new(Batches::Capacity).integer().not_null())
                    .col(
                        ColumnDef::new(Batches::CurrentEnrollment)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Batches::Status).string().not_null())
                    .col(ColumnDef::new(Batches::InstructorId).uuid())
                    .col(ColumnDef::new(Batches::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Batches::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-batches-course_id")
                            .from(Batches::Table, Batches::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-batches-instructor_id")
                            .from(Batches::Table, Batches::InstructorId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Create students table
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Students::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Students::EnrollmentNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Students::FirstName).string().not_null())
                    .col(ColumnDef::new(Students::LastName).string().not_null())
                    .col(ColumnDef::new(Students::Email).string().unique_key())
                    .col(ColumnDef::new(Students::Phone).string().not_null())
                    .col(ColumnDef::new(Students::DateOfBirth).date())
                    .col(ColumnDef::new(Students::Address).text())
                    .col(ColumnDef::new(Students::BatchId).uuid())
                    .col(ColumnDef::new(Students::Status).string().not_null())
                    .col(ColumnDef::new(Students::EnrollmentDate).date().not_null())
                    .col(ColumnDef::new(Students::LeadId).uuid())
                    .col(ColumnDef::new(Students::GraduationDate).date())
                    .col(ColumnDef::new(Students::FinalGrade).string())
                    .col(ColumnDef::new(Students::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Students::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-students-batch_id")
                            .from(Students::Table, Students::BatchId)
                            .to(Batches::Table, Batches::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-students-lead_id")
                            .from(Students::Table, Students::LeadId)
                            .to(Leads::Table, Leads::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Create student_status_history table
        manager
            .create_table(
                Table::create()
                    .table(StudentStatusHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentStatusHistory::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StudentStatusHistory::StudentId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentStatusHistory::Status)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentStatusHistory::ChangeDate)
                            .timestamp()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StudentStatusHistory::Notes).text())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-student_status_history-student_id")
                            .from(
                                StudentStatusHistory::Table,
                                StudentStatusHistory::StudentId,
                            )
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create lead_follow_ups table
        manager
            .create_table(
                Table::create()
                    .table(LeadFollowUps::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LeadFollowUps::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LeadFollowUps::LeadId).uuid().not_null())
                    .col(
                        ColumnDef::new(LeadFollowUps::FollowUpDate)
                            .timestamp()
                            .not_null(),
                    )
                    .col(ColumnDef::new(LeadFollowUps::Notes).text())
                    .col(ColumnDef::new(LeadFollowUps::NextAction).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-lead_follow_ups-lead_id")
                            .from(LeadFollowUps::Table, LeadFollowUps::LeadId)
                            .to(Leads::Table, Leads::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create placements table
        manager
            .create_table(
                Table::create()
                    .table(Placements::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Placements::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Placements::StudentId).uuid().not_null())
                    .col(ColumnDef::new(Placements::CompanyId).uuid().not_null())
                    .col(ColumnDef::new(Placements::Position).string().not_null())
                    .col(ColumnDef::new(Placements::Salary).decimal())
                    .col(ColumnDef::new(Placements::PlacementDate).date().not_null())
                    .col(ColumnDef::new(Placements::Status).string().not_null())
                    .col(ColumnDef::new(Placements::ProbationPeriodMonths).integer())
                    .col(ColumnDef::new(Placements::JoiningDate).date())
                    .col(ColumnDef::new(Placements::EndDate).date())
                    .col(ColumnDef::new(Placements::Notes).text())
                    .col(ColumnDef::new(Placements::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Placements::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-placements-student_id")
                            .from(Placements::Table, Placements::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-placements-company_id")
                            .from(Placements::Table, Placements::CompanyId)
                            .to(Companies::Table, Companies::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order due to foreign key constraints
        manager
            .drop_table(Table::drop().table(Placements::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(LeadFollowUps::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(StudentStatusHistory::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Batches::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Leads::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Companies::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Courses {
    Table,
    Id,
    Name,
    Description,
    DurationMonths,
    Fees,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Employees {
    Table,
    Id,
    EmployeeCode,
    FirstName,
    LastName,
    Email,
    Phone,
    Department,
    Role,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Companies {
    Table,
    Id,
    Name,
    Industry,
    ContactPerson,
    Email,
    Address,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Leads {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    Phone,
    CourseInterest,
    Source,
    Status,
    AssignedCounsellorId,
    ConvertedDate,
    Notes,
    NextFollowUpDate,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Batches {
    Table,
    Id,
    Name,
    CourseId,
    StartDate,
    EndDate,
    Capacity,
    CurrentEnrollment,
    Status,
    InstructorId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Students {
    Table,
    Id,
    EnrollmentNumber,
    FirstName,
    LastName,
    Email,
    Phone,
    DateOfBirth,
    Address,
    BatchId,
    Status,
    EnrollmentDate,
    LeadId,
    GraduationDate,
    FinalGrade,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum StudentStatusHistory {
    Table,
    Id,
    StudentId,
    Status,
    ChangeDate,
    Notes,
}

#[derive(Iden)]
enum LeadFollowUps {
    Table,
    Id,
    LeadId,
    FollowUpDate,
    Notes,
    NextAction,
}

#[derive(Iden)]
enum Placements {
    Table,
    Id,
    StudentId,
    CompanyId,
    Position,
    Salary,
    PlacementDate,
    Status,
    ProbationPeriodMonths,
    JoiningDate,
    EndDate,
    Notes,
    CreatedAt,
    UpdatedAt,
}
