//! End-to-end wizard flows over the file-backed snapshot store.

use std::sync::Arc;

use chrono::NaiveDate;
use tempfile::TempDir;

use ju_app::{NavOutcome, WizardSession};
use ju_core::form::{DobParts, FieldName};
use ju_core::media::{MediaFile, MediaInput};
use ju_core::ports::{ClockPort, FixedClock, SnapshotStorePort};
use ju_core::validation::FieldError;
use ju_core::wizard::WizardStep;
use ju_infra::{FileSnapshotRepository, FsMediaReader};

fn clock() -> Arc<dyn ClockPort> {
    Arc::new(FixedClock(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()))
}

fn store(dir: &TempDir) -> Arc<FileSnapshotRepository> {
    Arc::new(FileSnapshotRepository::with_defaults(dir.path().to_path_buf()))
}

async fn open(dir: &TempDir) -> WizardSession {
    WizardSession::open(store(dir), clock(), Arc::new(FsMediaReader::new())).await
}

async fn fill_first_two_steps(session: &WizardSession) {
    let mut c = session.controller().await;
    c.set_field(FieldName::FirstName, "Bat");
    c.set_field(FieldName::LastName, "Dorj");
    c.set_field(FieldName::Username, "batdorj");
    assert!(matches!(c.go_next(), NavOutcome::Moved { .. }));
    c.set_field(FieldName::Email, "bat@example.mn");
    c.set_field(FieldName::Phone, "1234-5678");
    c.set_field(FieldName::Password, "abcdef");
    c.set_field(FieldName::ConfirmPassword, "abcdef");
    assert!(matches!(c.go_next(), NavOutcome::Moved { .. }));
}

#[tokio::test]
async fn test_progress_survives_restart() {
    let dir = TempDir::new().unwrap();

    let session = open(&dir).await;
    fill_first_two_steps(&session).await;
    session.flush().await;
    let before = session.controller().await.snapshot();
    drop(session);

    let resumed = open(&dir).await;
    let after = resumed.controller().await.snapshot();

    assert_eq!(after, before);
    assert_eq!(after.step, WizardStep::Profile);
    assert_eq!(after.data.phone, "1234-5678");
}

#[tokio::test]
async fn test_reset_removes_stored_snapshot() {
    let dir = TempDir::new().unwrap();
    let session = open(&dir).await;
    fill_first_two_steps(&session).await;

    session.controller().await.reset();
    session.flush().await;

    assert!(store(&dir).load().await.unwrap().is_none());
    let view = session.view().await;
    assert_eq!(view.current_step, 1);
    assert!(!view.is_done);
}

#[tokio::test]
async fn test_non_image_upload_keeps_profile_image_error() {
    let dir = TempDir::new().unwrap();
    let notes = dir.path().join("notes.txt");
    tokio::fs::write(&notes, b"not an image").await.unwrap();

    let session = open(&dir).await;
    fill_first_two_steps(&session).await;
    session
        .controller()
        .await
        .set_dob_parts(DobParts::new("1990", "01", "15"));

    let report = session
        .attach_profile_image(MediaInput::Picked(vec![MediaFile::from_path(&notes)]))
        .await;
    assert!(!report.applied);

    let mut c = session.controller().await;
    match c.submit() {
        NavOutcome::Blocked(errors) => {
            assert_eq!(
                errors.get(&FieldName::ProfileImage),
                Some(&FieldError::ProfileImageRequired)
            );
            assert!(!errors.contains_key(&FieldName::Dob));
        }
        other => panic!("expected blocked submit, got {other:?}"),
    }
    assert!(!c.is_done());
}

#[tokio::test]
async fn test_image_upload_completes_wizard() {
    let dir = TempDir::new().unwrap();
    let avatar = dir.path().join("avatar.png");
    tokio::fs::write(&avatar, b"\x89PNG\r\n").await.unwrap();

    let session = open(&dir).await;
    fill_first_two_steps(&session).await;
    session.controller().await.set_field(FieldName::Dob, "2008-10-19");

    let report = session
        .attach_profile_image(MediaInput::Dropped(vec![MediaFile::from_path(&avatar)]))
        .await;
    assert!(report.applied);

    assert_eq!(session.controller().await.submit(), NavOutcome::Completed);
    session.flush().await;

    let stored = store(&dir).load().await.unwrap().unwrap();
    assert!(stored.done);
    assert!(stored.data.profile_image_url.starts_with("data:image/png;base64,"));
}

#[tokio::test]
async fn test_exactly_eighteen_today_is_accepted_one_day_short_is_not() {
    let dir = TempDir::new().unwrap();
    let session = open(&dir).await;
    let mut c = session.controller().await;

    c.set_field(FieldName::Dob, "2008-10-20");
    let short = ju_core::compute_errors(WizardStep::Profile, c.data(), clock().today());
    assert_eq!(short.get(&FieldName::Dob), Some(&FieldError::Underage));

    c.set_field(FieldName::Dob, "2008-10-19");
    let exact = ju_core::compute_errors(WizardStep::Profile, c.data(), clock().today());
    assert!(!exact.contains_key(&FieldName::Dob));
}
