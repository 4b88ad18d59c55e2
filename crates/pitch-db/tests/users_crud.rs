use std::collections::HashSet;
use std::sync::Arc;
use std::thread::sleep;
use std::time::Duration;

use pitch_db::{Database, EntityRepository, NotFoundPhase, RepoError, UserRepository};
use pitch_types::api::{CreateUserRequest, UpdateUserRequest};
use pitch_types::models::{EntityKind, RequestContext};

fn repo() -> UserRepository {
    let db = Arc::new(Database::open_in_memory().unwrap());
    UserRepository::new(db)
}

fn jane() -> CreateUserRequest {
    CreateUserRequest {
        name: "Jane".into(),
        email: "jane@x.com".into(),
        image_path: None,
    }
}

#[test]
fn create_then_read_returns_same_fields() {
    let repo = repo();
    let ctx = RequestContext::generate();

    let id = repo.create(&ctx, &jane()).unwrap();
    let user = repo.read(&ctx, &id).unwrap();

    assert_eq!(user.name, "Jane");
    assert_eq!(user.email, "jane@x.com");
    assert_eq!(user.image_path, None);
    assert_eq!(user.created_at, user.updated_at);
}

#[test]
fn create_keeps_image_path() {
    let repo = repo();
    let ctx = RequestContext::generate();

    let req = CreateUserRequest {
        image_path: Some("avatars/jane.png".into()),
        ..jane()
    };
    let id = repo.create(&ctx, &req).unwrap();

    let user = repo.read(&ctx, &id).unwrap();
    assert_eq!(user.image_path.as_deref(), Some("avatars/jane.png"));
}

#[test]
fn sequential_creates_return_distinct_ids() {
    let repo = repo();
    let ctx = RequestContext::generate();

    let ids: HashSet<String> = (0..50)
        .map(|i| {
            repo.create(
                &ctx,
                &CreateUserRequest {
                    name: format!("user {i}"),
                    email: format!("user{i}@x.com"),
                    image_path: None,
                },
            )
            .unwrap()
        })
        .collect();

    assert_eq!(ids.len(), 50);
}

#[test]
fn duplicate_email_is_write_failure() {
    let repo = repo();
    let ctx = RequestContext::generate();

    repo.create(&ctx, &jane()).unwrap();
    let err = repo.create(&ctx, &jane()).unwrap_err();

    assert!(matches!(err, RepoError::WriteFailure { kind: EntityKind::User, .. }));
}

#[test]
fn update_replaces_given_fields_and_bumps_updated_at() {
    let repo = repo();
    let ctx = RequestContext::generate();

    let id = repo.create(&ctx, &jane()).unwrap();
    let before = repo.read(&ctx, &id).unwrap();

    sleep(Duration::from_millis(5));
    let updated = repo
        .update(
            &ctx,
            &id,
            &UpdateUserRequest {
                name: Some("Jane D.".into()),
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(updated.name, "Jane D.");
    assert_eq!(updated.email, "jane@x.com");
    assert!(updated.updated_at > before.updated_at);

    let after = repo.read(&ctx, &id).unwrap();
    assert_eq!(after.created_at, before.created_at);
    assert_eq!(after.updated_at, updated.updated_at);
}

#[test]
fn update_to_taken_email_is_write_failure() {
    let repo = repo();
    let ctx = RequestContext::generate();

    repo.create(&ctx, &jane()).unwrap();
    let other = repo
        .create(
            &ctx,
            &CreateUserRequest {
                name: "John".into(),
                email: "john@x.com".into(),
                image_path: None,
            },
        )
        .unwrap();

    let err = repo
        .update(
            &ctx,
            &other,
            &UpdateUserRequest {
                email: Some("jane@x.com".into()),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, RepoError::WriteFailure { .. }));

    assert_eq!(repo.read(&ctx, &other).unwrap().email, "john@x.com");
}

#[test]
fn missing_id_is_not_found_everywhere() {
    let repo = repo();
    let ctx = RequestContext::generate();

    let err = repo.read(&ctx, "nope").unwrap_err();
    assert_eq!(err.missing_id(), Some("nope"));

    let err = repo
        .update(&ctx, "nope", &UpdateUserRequest::default())
        .unwrap_err();
    match err {
        RepoError::NotFound { id, phase, .. } => {
            assert_eq!(id, "nope");
            assert_eq!(phase, NotFoundPhase::AfterUpdate);
        }
        other => panic!("expected NotFound, got {other:?}"),
    }

    let err = repo.delete(&ctx, "nope").unwrap_err();
    assert_eq!(err.to_string(), "user with id nope not found");
}

#[test]
fn delete_is_final() {
    let repo = repo();
    let ctx = RequestContext::generate();

    let id = repo.create(&ctx, &jane()).unwrap();
    repo.delete(&ctx, &id).unwrap();

    assert!(repo.read(&ctx, &id).unwrap_err().is_not_found());
    assert!(repo.delete(&ctx, &id).unwrap_err().is_not_found());
}

#[test]
fn jane_lifecycle() {
    let repo = repo();
    let ctx = RequestContext::generate();

    let u1 = repo.create(&ctx, &jane()).unwrap();

    let read = repo.read(&ctx, &u1).unwrap();
    assert_eq!(read.name, "Jane");
    assert_eq!(read.email, "jane@x.com");
    assert_eq!(read.created_at, read.updated_at);
    let t0 = read.updated_at;

    sleep(Duration::from_millis(5));
    let updated = repo
        .update(
            &ctx,
            &u1,
            &UpdateUserRequest {
                name: Some("Jane D.".into()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(updated.name, "Jane D.");
    assert!(updated.updated_at > t0);

    repo.delete(&ctx, &u1).unwrap();

    let err = repo.read(&ctx, &u1).unwrap_err();
    assert_eq!(err.missing_id(), Some(u1.as_str()));
}
