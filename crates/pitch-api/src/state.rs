use std::sync::Arc;

use pitch_db::{ChallengeRepository, Database, UserRepository, VideoRepository};

use crate::service::EntityService;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub users: EntityService<UserRepository>,
    pub challenges: EntityService<ChallengeRepository>,
    pub videos: EntityService<VideoRepository>,
}

impl AppStateInner {
    /// One repository per entity kind, all over the same handle.
    pub fn new(db: Arc<Database>) -> AppState {
        Arc::new(Self {
            users: EntityService::new(UserRepository::new(db.clone())),
            challenges: EntityService::new(ChallengeRepository::new(db.clone())),
            videos: EntityService::new(VideoRepository::new(db)),
        })
    }
}
