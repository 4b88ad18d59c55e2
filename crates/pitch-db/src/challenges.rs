use std::sync::{Arc, Mutex};

use pitch_types::api::{
    ChallengeRecord, CreateChallengeRequest, UpdateChallengeRequest, UpdatedChallenge,
};
use pitch_types::models::{EntityKind, RequestContext};
use rusqlite::params;
use tracing::{debug, info};

use crate::Database;
use crate::error::{NotFoundPhase, RepoResult, classify_read, classify_write};
use crate::repo::{self, EntityRepository};

const INSERT_SQL: &str =
    "INSERT INTO challenges (id, title, description, difficulty, created_at, updated_at)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

const SELECT_SQL: &str =
    "SELECT title, description, difficulty, created_at, updated_at FROM challenges WHERE id = ?1";

const UPDATE_SQL: &str = "UPDATE challenges
     SET title = COALESCE(?1, title),
         description = COALESCE(?2, description),
         difficulty = COALESCE(?3, difficulty),
         updated_at = ?4
     WHERE id = ?5";

const REREAD_SQL: &str =
    "SELECT title, description, difficulty, updated_at FROM challenges WHERE id = ?1";

const DELETE_SQL: &str = "DELETE FROM challenges WHERE id = ?1";

pub struct ChallengeRepository {
    db: Arc<Database>,
    lock: Mutex<()>,
}

impl ChallengeRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            db,
            lock: Mutex::new(()),
        }
    }
}

impl EntityRepository for ChallengeRepository {
    type Create = CreateChallengeRequest;
    type Update = UpdateChallengeRequest;
    type Record = ChallengeRecord;
    type Updated = UpdatedChallenge;

    const KIND: EntityKind = EntityKind::Challenge;

    fn create(&self, ctx: &RequestContext, req: &CreateChallengeRequest) -> RepoResult<String> {
        let _guard = repo::acquire(&self.lock);

        let id = repo::new_id();
        let now = repo::utc_now();

        debug!(request_id = %ctx.request_id, "challenge: executing insert for {}", id);
        self.db
            .with_conn_mut(|conn| {
                conn.execute(
                    INSERT_SQL,
                    params![id, req.title, req.description, req.difficulty, now, now],
                )
            })
            .map_err(|e| classify_write(Self::KIND, e))?;

        info!(request_id = %ctx.request_id, "challenge {} created", id);
        Ok(id)
    }

    fn read(&self, ctx: &RequestContext, id: &str) -> RepoResult<ChallengeRecord> {
        let _guard = repo::acquire(&self.lock);

        debug!(request_id = %ctx.request_id, "challenge: executing select for {}", id);
        self.db
            .with_conn(|conn| {
                conn.query_row(SELECT_SQL, [id], |row| {
                    Ok(ChallengeRecord {
                        title: row.get(0)?,
                        description: row.get(1)?,
                        difficulty: row.get(2)?,
                        created_at: row.get(3)?,
                        updated_at: row.get(4)?,
                    })
                })
            })
            .map_err(|e| classify_read(Self::KIND, id, NotFoundPhase::Lookup, e))
    }

    fn update(
        &self,
        ctx: &RequestContext,
        id: &str,
        req: &UpdateChallengeRequest,
    ) -> RepoResult<UpdatedChallenge> {
        let _guard = repo::acquire(&self.lock);

        let now = repo::utc_now();

        debug!(request_id = %ctx.request_id, "challenge: executing update for {}", id);
        self.db
            .with_conn_mut(|conn| {
                conn.execute(
                    UPDATE_SQL,
                    params![req.title, req.description, req.difficulty, now, id],
                )
            })
            .map_err(|e| classify_write(Self::KIND, e))?;

        debug!(request_id = %ctx.request_id, "challenge: re-reading after update for {}", id);
        let updated = self
            .db
            .with_conn(|conn| {
                conn.query_row(REREAD_SQL, [id], |row| {
                    Ok(UpdatedChallenge {
                        title: row.get(0)?,
                        description: row.get(1)?,
                        difficulty: row.get(2)?,
                        updated_at: row.get(3)?,
                    })
                })
            })
            .map_err(|e| classify_read(Self::KIND, id, NotFoundPhase::AfterUpdate, e))?;

        info!(request_id = %ctx.request_id, "challenge {} updated", id);
        Ok(updated)
    }

    fn delete(&self, ctx: &RequestContext, id: &str) -> RepoResult<()> {
        let _guard = repo::acquire(&self.lock);
        repo::delete_row(&self.db, Self::KIND, DELETE_SQL, ctx, id)
    }
}
