use pitch_db::{EntityRepository, RepoError};
use pitch_types::envelope::Envelope;
use pitch_types::models::RequestContext;

/// Wraps repository results in the success envelope. Errors pass through
/// untouched; translating them is the HTTP boundary's job.
pub struct EntityService<R> {
    repo: R,
}

impl<R: EntityRepository> EntityService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create(
        &self,
        ctx: &RequestContext,
        req: &R::Create,
    ) -> Result<Envelope<String>, RepoError> {
        let id = self.repo.create(ctx, req)?;
        Ok(Envelope::created(R::KIND, id))
    }

    pub fn select(&self, ctx: &RequestContext, id: &str) -> Result<Envelope<R::Record>, RepoError> {
        let record = self.repo.read(ctx, id)?;
        Ok(Envelope::selected(R::KIND, record))
    }

    pub fn update(
        &self,
        ctx: &RequestContext,
        id: &str,
        req: &R::Update,
    ) -> Result<Envelope<R::Updated>, RepoError> {
        let updated = self.repo.update(ctx, id, req)?;
        Ok(Envelope::updated(R::KIND, updated))
    }

    pub fn delete(&self, ctx: &RequestContext, id: &str) -> Result<Envelope<()>, RepoError> {
        self.repo.delete(ctx, id)?;
        Ok(Envelope::deleted(R::KIND))
    }
}
