use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Indexes on batches for common query patterns
        manager
            .create_index(
                Index::create()
                    .name("idx_batches_course_id")
                    .table(Batches::Table)
                    .col(Batches::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_batches_status")
                    .table(Batches::Table)
                    .col(Batches::Status)
                    .to_owned(),
            )
            .await?;

        // Indexes on students for batch membership and status filters
        manager
            .create_index(
                Index::create()
                    .name("idx_students_batch_id")
                    .table(Students::Table)
                    .col(Students::BatchId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_students_status")
                    .table(Students::Table)
                    .col(Students::Status)
                    .to_owned(),
            )
            .await?;

        // Indexes on leads for pipeline and follow-up queries
        manager
            .create_index(
                Index::create()
                    .name("idx_leads_status")
                    .table(Leads::Table)
                    .col(Leads::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_leads_next_follow_up_date")
                    .table(Leads::Table)
                    .col(Leads::NextFollowUpDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_leads_assigned_counsellor_id")
                    .table(Leads::Table)
                    .col(Leads::AssignedCounsellorId)
                    .to_owned(),
            )
            .await?;

        // Indexes on the append-only logs for per-parent reads
        manager
            .create_index(
                Index::create()
                    .name("idx_student_status_history_student_id")
                    .table(StudentStatusHistory::Table)
                    .col(StudentStatusHistory::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_lead_follow_ups_lead_id")
                    .table(LeadFollowUps::Table)
                    .col(LeadFollowUps::LeadId)
                    .to_owned(),
            )
            .await?;

        // Indexes on placements for outcome queries
        manager
            .create_index(
                Index::create()
                    .name("idx_placements_student_id")
                    .table(Placements::Table)
                    .col(Placements::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_placements_company_id")
                    .table(Placements::Table)
                    .col(Placements::CompanyId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_placements_status")
                    .table(Placements::Table)
                    .col(Placements::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_batches_course_id",
            "idx_batches_status",
            "idx_students_batch_id",
            "idx_students_status",
            "idx_leads_status",
            "idx_leads_next_follow_up_date",
            "idx_leads_assigned_counsellor_id",
            "idx_student_status_history_student_id",
            "idx_lead_follow_ups_lead_id",
            "idx_placements_student_id",
            "idx_placements_company_id",
            "idx_placements_status",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }

        Ok(())
    }
}

#[derive(Iden)]
enum Batches {
    Table,
    CourseId,
    Status,
}

#[derive(Iden)]
enum Students {
    Table,
    BatchId,
    Status,
}

#[derive(Iden)]
enum Leads {
    Table,
    Status,
    NextFollowUpDate,
    AssignedCounsellorId,
}

#[derive(Iden)]
enum StudentStatusHistory {
    Table,
    StudentId,
}

#[derive(Iden)]
enum LeadFollowUps {
    Table,
    LeadId,
}

#[derive(Iden)]
enum Placements {
    Table,
    StudentId,
    CompanyId,
    Status,
}
