use anyhow::Result;
use uuid::Uuid;

use crate::models::ProjectRecord;

/// Persistent storage for project records.
///
/// Records are written and read whole; there are no partial or merge writes.
/// Implementations report a missing record as `Ok(None)` / `Ok(false)` and
/// reserve `Err` for storage failures.
pub trait ProjectStore {
    /// Store a new record and return its id.
    fn create_record(&self, record: &ProjectRecord) -> Result<Uuid>;

    fn get_record(&self, id: Uuid) -> Result<Option<ProjectRecord>>;

    /// Overwrite an existing record. Returns `false` if no record has this id.
    fn update_record(&self, id: Uuid, record: &ProjectRecord) -> Result<bool>;

    /// Returns `false` if no record has this id.
    fn delete_record(&self, id: Uuid) -> Result<bool>;

    fn list_records(&self) -> Result<Vec<(Uuid, ProjectRecord)>>;
}
