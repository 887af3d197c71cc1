//! Repository-level tests against the in-memory store.
//!
//! Exercises the relationship rules shared by every store implementation:
//! - Trainer reference must resolve when an appointment is written
//! - Deleting a trainer keeps its appointments and clears their reference
//! - Updates replace every writable field
//! - Listing order, including null placement and the id tie-break

use assert_matches::assert_matches;
use bodyfit_core::appointment::{
    AppointmentFields, AppointmentOrder, AppointmentSortField, AppointmentStatus, SortDirection,
};
use bodyfit_core::trainer::TrainerFields;
use bodyfit_db::repositories::{AppointmentRepository, MemoryStore, TrainerRepository};
use bodyfit_db::StoreError;
use chrono::{TimeZone, Utc};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_trainer(last_name: &str) -> TrainerFields {
    TrainerFields {
        last_name: last_name.to_string(),
        first_name: "Анна".to_string(),
        middle_name: "Сергеевна".to_string(),
        name_of_training_session: "Йога".to_string(),
        phone: None,
        email: None,
        specialization: None,
        experience_years: 0,
    }
}

fn new_appointment(last_name: &str, trainer_id: Option<i64>) -> AppointmentFields {
    AppointmentFields {
        last_name: last_name.to_string(),
        first_name: "Игорь".to_string(),
        phone: "+79000000000".to_string(),
        name_of_training_session: "Кроссфит".to_string(),
        trainer_id,
        comment: None,
        appointment_date: None,
        status: AppointmentStatus::Planned,
    }
}

fn ids(items: &[bodyfit_db::models::appointment::Appointment]) -> Vec<i64> {
    items.iter().map(|a| a.id).collect()
}

// ---------------------------------------------------------------------------
// Trainers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn trainer_ids_are_assigned_sequentially() {
    let store = MemoryStore::new();
    let a = TrainerRepository::create(&store, &new_trainer("Петрова")).await.unwrap();
    let b = TrainerRepository::create(&store, &new_trainer("Орлова")).await.unwrap();
    assert_eq!(a.id, 1);
    assert_eq!(b.id, 2);
    assert_eq!(TrainerRepository::list(&store).await.unwrap().len(), 2);
}

#[tokio::test]
async fn trainer_update_replaces_every_field() {
    let store = MemoryStore::new();
    let mut input = new_trainer("Петрова");
    input.phone = Some("+7 111".to_string());
    input.experience_years = 4;
    let created = TrainerRepository::create(&store, &input).await.unwrap();

    let replacement = new_trainer("Сидорова");
    let updated = TrainerRepository::update(&store, created.id, &replacement)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.last_name, "Сидорова");
    assert_eq!(updated.phone, None);
    assert_eq!(updated.experience_years, 0);
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
async fn update_missing_trainer_returns_none() {
    let store = MemoryStore::new();
    let result = TrainerRepository::update(&store, 404, &new_trainer("X")).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn delete_missing_trainer_returns_false() {
    let store = MemoryStore::new();
    assert!(!TrainerRepository::delete(&store, 7).await.unwrap());
}

// ---------------------------------------------------------------------------
// Trainer reference
// ---------------------------------------------------------------------------

#[tokio::test]
async fn appointment_with_unknown_trainer_is_rejected() {
    let store = MemoryStore::new();
    let result = AppointmentRepository::create(&store, &new_appointment("Ким", Some(99))).await;
    assert_matches!(result, Err(StoreError::ForeignKey(_)));
    assert!(AppointmentRepository::list(&store, AppointmentOrder::default())
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn appointment_resolves_trainer_summary() {
    let store = MemoryStore::new();
    let trainer = TrainerRepository::create(&store, &new_trainer("Петрова")).await.unwrap();
    let appt = AppointmentRepository::create(&store, &new_appointment("Ким", Some(trainer.id)))
        .await
        .unwrap();

    let summary = appt.trainer.expect("trainer summary");
    assert_eq!(summary.id, trainer.id);
    assert_eq!(summary.last_name, "Петрова");
    assert!(appt.date.is_some());
}

#[tokio::test]
async fn deleting_trainer_clears_reference_but_keeps_appointment() {
    let store = MemoryStore::new();
    let trainer = TrainerRepository::create(&store, &new_trainer("Петрова")).await.unwrap();
    let appt = AppointmentRepository::create(&store, &new_appointment("Ким", Some(trainer.id)))
        .await
        .unwrap();

    assert!(TrainerRepository::delete(&store, trainer.id).await.unwrap());

    let reloaded = AppointmentRepository::find_by_id(&store, appt.id)
        .await
        .unwrap()
        .expect("appointment survives trainer deletion");
    assert!(reloaded.trainer.is_none());
    assert_eq!(reloaded.last_name, "Ким");
}

#[tokio::test]
async fn trainer_rename_is_visible_through_appointments() {
    let store = MemoryStore::new();
    let trainer = TrainerRepository::create(&store, &new_trainer("Петрова")).await.unwrap();
    let appt = AppointmentRepository::create(&store, &new_appointment("Ким", Some(trainer.id)))
        .await
        .unwrap();

    TrainerRepository::update(&store, trainer.id, &new_trainer("Волкова"))
        .await
        .unwrap();

    let reloaded = AppointmentRepository::find_by_id(&store, appt.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.trainer.unwrap().last_name, "Волкова");
}

#[tokio::test]
async fn update_with_unknown_trainer_leaves_appointment_untouched() {
    let store = MemoryStore::new();
    let appt = AppointmentRepository::create(&store, &new_appointment("Ким", None))
        .await
        .unwrap();

    let result =
        AppointmentRepository::update(&store, appt.id, &new_appointment("Ли", Some(5))).await;
    assert_matches!(result, Err(StoreError::ForeignKey(_)));

    let reloaded = AppointmentRepository::find_by_id(&store, appt.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.last_name, "Ким");
}

#[tokio::test]
async fn list_by_trainer_filters() {
    let store = MemoryStore::new();
    let t1 = TrainerRepository::create(&store, &new_trainer("Петрова")).await.unwrap();
    let t2 = TrainerRepository::create(&store, &new_trainer("Орлова")).await.unwrap();
    let a = AppointmentRepository::create(&store, &new_appointment("А", Some(t1.id)))
        .await
        .unwrap();
    AppointmentRepository::create(&store, &new_appointment("Б", Some(t2.id)))
        .await
        .unwrap();
    let c = AppointmentRepository::create(&store, &new_appointment("В", Some(t1.id)))
        .await
        .unwrap();
    AppointmentRepository::create(&store, &new_appointment("Г", None))
        .await
        .unwrap();

    let items = AppointmentRepository::list_by_trainer(&store, t1.id).await.unwrap();
    assert_eq!(ids(&items), vec![a.id, c.id]);
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_sorts_by_requested_field() {
    let store = MemoryStore::new();
    let b = AppointmentRepository::create(&store, &new_appointment("Борисов", None))
        .await
        .unwrap();
    let a = AppointmentRepository::create(&store, &new_appointment("Абрамов", None))
        .await
        .unwrap();
    let c = AppointmentRepository::create(&store, &new_appointment("Власов", None))
        .await
        .unwrap();

    let asc = AppointmentOrder {
        field: AppointmentSortField::LastName,
        direction: SortDirection::Asc,
    };
    let items = AppointmentRepository::list(&store, asc).await.unwrap();
    assert_eq!(ids(&items), vec![a.id, b.id, c.id]);

    let desc = AppointmentOrder {
        direction: SortDirection::Desc,
        ..asc
    };
    let items = AppointmentRepository::list(&store, desc).await.unwrap();
    assert_eq!(ids(&items), vec![c.id, b.id, a.id]);
}

#[tokio::test]
async fn null_appointment_dates_sort_last_both_ways() {
    let store = MemoryStore::new();
    let mut early = new_appointment("Ранний", None);
    early.appointment_date = Some(Utc.with_ymd_and_hms(2026, 1, 1, 10, 0, 0).unwrap());
    let mut late = new_appointment("Поздний", None);
    late.appointment_date = Some(Utc.with_ymd_and_hms(2026, 6, 1, 10, 0, 0).unwrap());

    let undated = AppointmentRepository::create(&store, &new_appointment("Без даты", None))
        .await
        .unwrap();
    let late = AppointmentRepository::create(&store, &late).await.unwrap();
    let early = AppointmentRepository::create(&store, &early).await.unwrap();

    let asc = AppointmentOrder {
        field: AppointmentSortField::AppointmentDate,
        direction: SortDirection::Asc,
    };
    let items = AppointmentRepository::list(&store, asc).await.unwrap();
    assert_eq!(ids(&items), vec![early.id, late.id, undated.id]);

    let desc = AppointmentOrder {
        direction: SortDirection::Desc,
        ..asc
    };
    let items = AppointmentRepository::list(&store, desc).await.unwrap();
    assert_eq!(ids(&items), vec![late.id, early.id, undated.id]);
}

#[tokio::test]
async fn equal_keys_fall_back_to_id_order() {
    let store = MemoryStore::new();
    let first = AppointmentRepository::create(&store, &new_appointment("Same", None))
        .await
        .unwrap();
    let second = AppointmentRepository::create(&store, &new_appointment("Same", None))
        .await
        .unwrap();

    let desc = AppointmentOrder {
        field: AppointmentSortField::LastName,
        direction: SortDirection::Desc,
    };
    let items = AppointmentRepository::list(&store, desc).await.unwrap();
    assert_eq!(ids(&items), vec![first.id, second.id]);
}

#[tokio::test]
async fn text_sort_is_code_point_order() {
    let store = MemoryStore::new();
    let cyrillic = AppointmentRepository::create(&store, &new_appointment("Абрамов", None))
        .await
        .unwrap();
    let lower = AppointmentRepository::create(&store, &new_appointment("adams", None))
        .await
        .unwrap();
    let upper = AppointmentRepository::create(&store, &new_appointment("Zane", None))
        .await
        .unwrap();

    let asc = AppointmentOrder {
        field: AppointmentSortField::LastName,
        direction: SortDirection::Asc,
    };
    let items = AppointmentRepository::list(&store, asc).await.unwrap();
    assert_eq!(ids(&items), vec![upper.id, lower.id, cyrillic.id]);
}
