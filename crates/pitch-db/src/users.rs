use std::sync::{Arc, Mutex};

use pitch_types::api::{CreateUserRequest, UpdateUserRequest, UpdatedUser, UserRecord};
use pitch_types::models::{EntityKind, RequestContext};
use rusqlite::params;
use tracing::{debug, info};

use crate::Database;
use crate::error::{NotFoundPhase, RepoResult, classify_read, classify_write};
use crate::repo::{self, EntityRepository};

const INSERT_SQL: &str = "INSERT INTO users (id, name, email, image_path, created_at, updated_at)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

const SELECT_SQL: &str =
    "SELECT name, email, image_path, created_at, updated_at FROM users WHERE id = ?1";

const UPDATE_SQL: &str = "UPDATE users
     SET name = COALESCE(?1, name),
         email = COALESCE(?2, email),
         image_path = COALESCE(?3, image_path),
         updated_at = ?4
     WHERE id = ?5";

const REREAD_SQL: &str = "SELECT name, email, image_path, updated_at FROM users WHERE id = ?1";

const DELETE_SQL: &str = "DELETE FROM users WHERE id = ?1";

/// Users live behind a unique email constraint; a clash on create or update
/// is a write failure.
pub struct UserRepository {
    db: Arc<Database>,
    lock: Mutex<()>,
}

impl UserRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            db,
            lock: Mutex::new(()),
        }
    }
}

impl EntityRepository for UserRepository {
    type Create = CreateUserRequest;
    type Update = UpdateUserRequest;
    type Record = UserRecord;
    type Updated = UpdatedUser;

    const KIND: EntityKind = EntityKind::User;

    fn create(&self, ctx: &RequestContext, req: &CreateUserRequest) -> RepoResult<String> {
        let _guard = repo::acquire(&self.lock);

        let id = repo::new_id();
        let now = repo::utc_now();

        debug!(request_id = %ctx.request_id, "user: executing insert for {}", id);
        self.db
            .with_conn_mut(|conn| {
                conn.execute(
                    INSERT_SQL,
                    params![id, req.name, req.email, req.image_path, now, now],
                )
            })
            .map_err(|e| classify_write(Self::KIND, e))?;

        info!(request_id = %ctx.request_id, "user {} created", id);
        Ok(id)
    }

    fn read(&self, ctx: &RequestContext, id: &str) -> RepoResult<UserRecord> {
        let _guard = repo::acquire(&self.lock);

        debug!(request_id = %ctx.request_id, "user: executing select for {}", id);
        self.db
            .with_conn(|conn| {
                conn.query_row(SELECT_SQL, [id], |row| {
                    Ok(UserRecord {
                        name: row.get(0)?,
                        email: row.get(1)?,
                        image_path: row.get(2)?,
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
        req: &UpdateUserRequest,
    ) -> RepoResult<UpdatedUser> {
        let _guard = repo::acquire(&self.lock);

        let now = repo::utc_now();

        debug!(request_id = %ctx.request_id, "user: executing update for {}", id);
        self.db
            .with_conn_mut(|conn| {
                conn.execute(
                    UPDATE_SQL,
                    params![req.name, req.email, req.image_path, now, id],
                )
            })
            .map_err(|e| classify_write(Self::KIND, e))?;

        debug!(request_id = %ctx.request_id, "user: re-reading after update for {}", id);
        let updated = self
            .db
            .with_conn(|conn| {
                conn.query_row(REREAD_SQL, [id], |row| {
                    Ok(UpdatedUser {
                        name: row.get(0)?,
                        email: row.get(1)?,
                        image_path: row.get(2)?,
                        updated_at: row.get(3)?,
                    })
                })
            })
            .map_err(|e| classify_read(Self::KIND, id, NotFoundPhase::AfterUpdate, e))?;

        info!(request_id = %ctx.request_id, "user {} updated", id);
        Ok(updated)
    }

    fn delete(&self, ctx: &RequestContext, id: &str) -> RepoResult<()> {
        let _guard = repo::acquire(&self.lock);
        repo::delete_row(&self.db, Self::KIND, DELETE_SQL, ctx, id)
    }
}
