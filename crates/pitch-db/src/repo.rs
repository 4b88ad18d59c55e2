//! Contract shared by the entity repositories plus the pieces every
//! repository uses the same way: id generation, UTC stamping, the per-kind
//! guard and the delete path.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{SecondsFormat, Utc};
use pitch_types::models::{EntityKind, RequestContext};
use tracing::{debug, info};
use uuid::Uuid;

use crate::Database;
use crate::error::{RepoError, RepoResult, classify_write};

/// CRUD over one entity kind. Every call holds the repository's exclusive
/// guard from start to finish.
pub trait EntityRepository: Send + Sync + 'static {
    type Create: Send + 'static;
    type Update: Send + 'static;
    type Record: Send + 'static;
    type Updated: Send + 'static;

    const KIND: EntityKind;

    fn create(&self, ctx: &RequestContext, req: &Self::Create) -> RepoResult<String>;

    fn read(&self, ctx: &RequestContext, id: &str) -> RepoResult<Self::Record>;

    /// Write first, then re-read the row. A row that disappears between the
    /// two statements surfaces as `NotFound` after update.
    fn update(&self, ctx: &RequestContext, id: &str, req: &Self::Update)
    -> RepoResult<Self::Updated>;

    fn delete(&self, ctx: &RequestContext, id: &str) -> RepoResult<()>;
}

pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Fixed-width RFC 3339 with microseconds, so stored text sorts by time.
pub(crate) fn utc_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// The guard protects no data, only ordering, so a panic in another
/// operation does not leave anything to repair.
pub(crate) fn acquire(lock: &Mutex<()>) -> MutexGuard<'_, ()> {
    lock.lock().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn delete_row(
    db: &Database,
    kind: EntityKind,
    sql: &str,
    ctx: &RequestContext,
    id: &str,
) -> RepoResult<()> {
    debug!(request_id = %ctx.request_id, "{}: executing delete for {}", kind, id);
    let affected = db
        .with_conn_mut(|conn| conn.execute(sql, [id]))
        .map_err(|e| classify_write(kind, e))?;

    if affected == 0 {
        return Err(RepoError::not_found(kind, id));
    }

    info!(request_id = %ctx.request_id, "{} {} deleted", kind, id);
    Ok(())
}
