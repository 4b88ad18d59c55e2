use std::sync::{Arc, Mutex};

use pitch_types::api::{CreateVideoRequest, UpdateVideoRequest, UpdatedVideo, VideoRecord};
use pitch_types::models::{EntityKind, RequestContext};
use rusqlite::params;
use tracing::{debug, info};

use crate::Database;
use crate::error::{NotFoundPhase, RepoResult, classify_read, classify_write};
use crate::repo::{self, EntityRepository};

const INSERT_SQL: &str = "INSERT INTO videos (id, title, description, created_at, updated_at)
     VALUES (?1, ?2, ?3, ?4, ?5)";

const SELECT_SQL: &str =
    "SELECT title, description, created_at, updated_at FROM videos WHERE id = ?1";

const UPDATE_SQL: &str = "UPDATE videos
     SET title = COALESCE(?1, title),
         description = COALESCE(?2, description),
         updated_at = ?3
     WHERE id = ?4";

const REREAD_SQL: &str = "SELECT title, description, updated_at FROM videos WHERE id = ?1";

const DELETE_SQL: &str = "DELETE FROM videos WHERE id = ?1";

pub struct VideoRepository {
    db: Arc<Database>,
    lock: Mutex<()>,
}

impl VideoRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            db,
            lock: Mutex::new(()),
        }
    }
}

impl EntityRepository for VideoRepository {
    type Create = CreateVideoRequest;
    type Update = UpdateVideoRequest;
    type Record = VideoRecord;
    type Updated = UpdatedVideo;

    const KIND: EntityKind = EntityKind::Video;

    fn create(&self, ctx: &RequestContext, req: &CreateVideoRequest) -> RepoResult<String> {
        let _guard = repo::acquire(&self.lock);

        let id = repo::new_id();
        let now = repo::utc_now();

        debug!(request_id = %ctx.request_id, "video: executing insert for {}", id);
        self.db
            .with_conn_mut(|conn| {
                conn.execute(INSERT_SQL, params![id, req.title, req.description, now, now])
            })
            .map_err(|e| classify_write(Self::KIND, e))?;

        info!(request_id = %ctx.request_id, "video {} created", id);
        Ok(id)
    }

    fn read(&self, ctx: &RequestContext, id: &str) -> RepoResult<VideoRecord> {
        let _guard = repo::acquire(&self.lock);

        debug!(request_id = %ctx.request_id, "video: executing select for {}", id);
        self.db
            .with_conn(|conn| {
                conn.query_row(SELECT_SQL, [id], |row| {
                    Ok(VideoRecord {
                        title: row.get(0)?,
                        description: row.get(1)?,
                        created_at: row.get(2)?,
                        updated_at: row.get(3)?,
                    })
                })
            })
            .map_err(|e| classify_read(Self::KIND, id, NotFoundPhase::Lookup, e))
    }

    fn update(
        &self,
        ctx: &RequestContext,
        id: &str,
        req: &UpdateVideoRequest,
    ) -> RepoResult<UpdatedVideo> {
        let _guard = repo::acquire(&self.lock);

        let now = repo::utc_now();

        debug!(request_id = %ctx.request_id, "video: executing update for {}", id);
        self.db
            .with_conn_mut(|conn| {
                conn.execute(UPDATE_SQL, params![req.title, req.description, now, id])
            })
            .map_err(|e| classify_write(Self::KIND, e))?;

        debug!(request_id = %ctx.request_id, "video: re-reading after update for {}", id);
        let updated = self
            .db
            .with_conn(|conn| {
                conn.query_row(REREAD_SQL, [id], |row| {
                    Ok(UpdatedVideo {
                        title: row.get(0)?,
                        description: row.get(1)?,
                        updated_at: row.get(2)?,
                    })
                })
            })
            .map_err(|e| classify_read(Self::KIND, id, NotFoundPhase::AfterUpdate, e))?;

        info!(request_id = %ctx.request_id, "video {} updated", id);
        Ok(updated)
    }

    fn delete(&self, ctx: &RequestContext, id: &str) -> RepoResult<()> {
        let _guard = repo::acquire(&self.lock);
        repo::delete_row(&self.db, Self::KIND, DELETE_SQL, ctx, id)
    }
}
