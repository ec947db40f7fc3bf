//! End-to-end ledger and conversion scenarios against a real Postgres
//! instance. Run with DATABASE_URL configured and the schema migrated:
//!
//!     cargo test -p database -- --ignored

use chrono::{NaiveDate, Utc};
use database::db::create_connection;
use database::error::ServiceError;
use database::services::batch::BatchService;
use database::services::course::CourseService;
use database::services::lead::{ConvertLead, CreateLead, LeadService};
use rust_decimal::Decimal;
use uuid::Uuid;

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()
}

async fn fresh_batch(
    db: &sea_orm::DatabaseConnection,
    capacity: i32,
) -> (database::entities::course::Model, database::entities::batch::Model) {
    let tag = Uuid::new_v4();
    let course = CourseService::create_course(
        db,
        format!("Ledger Test Course {tag}"),
        None,
        6,
        Decimal::new(45_000, 0),
    )
    .await
    .expect("course creation");

    let batch = BatchService::create_batch(
        db,
        format!("LEDGER-{tag}"),
        course.id,
        start_date(),
        capacity,
        None,
    )
    .await
    .expect("batch creation");

    (course, batch)
}

async fn cleanup(
    db: &sea_orm::DatabaseConnection,
    course_id: Uuid,
    batch_id: Uuid,
) {
    let _ = BatchService::delete_batch(db, batch_id).await;
    let _ = CourseService::delete_course(db, course_id).await;
}

#[tokio::test]
#[ignore = "requires a running Postgres with DATABASE_URL set"]
async fn fill_drain_delete_scenario() {
    let db = create_connection().await.expect("database connection");
    let (course, batch) = fresh_batch(&db, 2).await;

    BatchService::increment_enrollment(&db, batch.id).await.unwrap();
    let filled = BatchService::increment_enrollment(&db, batch.id).await.unwrap();
    assert_eq!(filled.current_enrollment, 2);

    let err = BatchService::increment_enrollment(&db, batch.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::CapacityExceeded(_)));

    let err = BatchService::delete_batch(&db, batch.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));

    BatchService::decrement_enrollment(&db, batch.id).await.unwrap();
    let drained = BatchService::decrement_enrollment(&db, batch.id).await.unwrap();
    assert_eq!(drained.current_enrollment, 0);

    BatchService::delete_batch(&db, batch.id).await.unwrap();
    cleanup(&db, course.id, batch.id).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore = "requires a running Postgres with DATABASE_URL set"]
async fn concurrent_increments_never_overshoot_capacity() {
    let db = create_connection().await.expect("database connection");
    let (course, batch) = fresh_batch(&db, 5).await;

    for _ in 0..3 {
        BatchService::increment_enrollment(&db, batch.id).await.unwrap();
    }

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let db = db.clone();
            let batch_id = batch.id;
            tokio::spawn(async move { BatchService::increment_enrollment(&db, batch_id).await })
        })
        .collect();

    let mut successes = 0;
    let mut refusals = 0;
    for handle in handles {
        match handle.await.expect("task join") {
            Ok(_) => successes += 1,
            Err(ServiceError::CapacityExceeded(_)) => refusals += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(successes, 2);
    assert_eq!(refusals, 8);

    let final_state = BatchService::get_batch(&db, batch.id).await.unwrap();
    assert_eq!(final_state.current_enrollment, 5);

    for _ in 0..5 {
        BatchService::decrement_enrollment(&db, batch.id).await.unwrap();
    }
    cleanup(&db, course.id, batch.id).await;
}

#[tokio::test]
#[ignore = "requires a running Postgres with DATABASE_URL set"]
async fn conversion_claims_a_slot_and_seals_the_lead() {
    let db = create_connection().await.expect("database connection");
    // The converted lead pins the student and the batch slot, so this
    // scenario leaves its rows behind on purpose
    let (_course, batch) = fresh_batch(&db, 5).await;
    let tag = Uuid::new_v4().as_u128() % 1_000_000_000;

    let lead = LeadService::create_lead(
        &db,
        CreateLead {
            first_name: "Convert".to_string(),
            last_name: format!("Scenario{tag}"),
            email: None,
            phone: format!("9{tag:09}"),
            course_interest: None,
            source: Some("Referral".to_string()),
            assigned_counsellor_id: None,
            notes: None,
        },
    )
    .await
    .expect("lead creation");

    let student = LeadService::convert_to_student(
        &db,
        lead.id,
        ConvertLead {
            enrollment_date: Utc::now().date_naive(),
            batch_id: Some(batch.id),
            address: None,
            date_of_birth: None,
        },
    )
    .await
    .expect("conversion");

    assert_eq!(student.lead_id, Some(lead.id));
    assert_eq!(student.batch_id, Some(batch.id));

    let lead = LeadService::get_lead(&db, lead.id).await.unwrap();
    assert!(lead.is_converted());
    assert!(lead.converted_date.is_some());

    let batch_state = BatchService::get_batch(&db, batch.id).await.unwrap();
    assert_eq!(batch_state.current_enrollment, 1);

    // A second conversion attempt must fail and change nothing
    let err = LeadService::convert_to_student(
        &db,
        lead.id,
        ConvertLead {
            enrollment_date: Utc::now().date_naive(),
            batch_id: None,
            address: None,
            date_of_birth: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
}
