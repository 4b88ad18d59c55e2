use std::collections::HashSet;
use std::sync::Arc;

use pitch_db::{Database, EntityRepository, UserRepository, VideoRepository};
use pitch_types::api::{CreateUserRequest, CreateVideoRequest, UpdateVideoRequest};
use pitch_types::models::{EntityKind, RequestContext};

fn clip(n: usize) -> CreateVideoRequest {
    CreateVideoRequest {
        title: format!("clip {n}"),
        description: "a short clip".into(),
    }
}

#[test]
fn create_read_update_delete() {
    let repo = VideoRepository::new(Arc::new(Database::open_in_memory().unwrap()));
    let ctx = RequestContext::generate();

    let id = repo.create(&ctx, &clip(1)).unwrap();
    let video = repo.read(&ctx, &id).unwrap();
    assert_eq!(video.title, "clip 1");
    assert_eq!(video.created_at, video.updated_at);

    let updated = repo
        .update(
            &ctx,
            &id,
            &UpdateVideoRequest {
                description: Some("a longer clip".into()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(updated.title, "clip 1");
    assert_eq!(updated.description, "a longer clip");
    assert!(updated.updated_at >= video.updated_at);

    repo.delete(&ctx, &id).unwrap();
    let err = repo.read(&ctx, &id).unwrap_err();
    assert_eq!(err.kind(), EntityKind::Video);
    assert!(err.is_not_found());
}

#[test]
fn ids_are_distinct() {
    let repo = VideoRepository::new(Arc::new(Database::open_in_memory().unwrap()));
    let ctx = RequestContext::generate();

    let ids: HashSet<String> = (0..25).map(|n| repo.create(&ctx, &clip(n)).unwrap()).collect();
    assert_eq!(ids.len(), 25);
}

#[test]
fn kinds_share_the_handle_but_not_rows() {
    let db = Arc::new(Database::open_in_memory().unwrap());
    let videos = VideoRepository::new(db.clone());
    let users = UserRepository::new(db);
    let ctx = RequestContext::generate();

    let video_id = videos.create(&ctx, &clip(0)).unwrap();
    let user_id = users
        .create(
            &ctx,
            &CreateUserRequest {
                name: "Jane".into(),
                email: "jane@x.com".into(),
                image_path: None,
            },
        )
        .unwrap();

    assert!(users.read(&ctx, &video_id).unwrap_err().is_not_found());
    assert!(videos.delete(&ctx, &user_id).unwrap_err().is_not_found());
    assert!(users.read(&ctx, &user_id).is_ok());
}
