mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Transaction};
use uuid::Uuid;

use crate::estimate::ProjectStore;
use crate::models::*;

/// SQLite-backed project storage.
///
/// Clones share one connection; access is serialized through a mutex.
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

/// Raw `projects` row before JSON columns are decoded.
struct ProjectRow {
    id: String,
    name: String,
    owner: String,
    description: String,
    industry: String,
    cost_model: String,
    inclusions: String,
    comments: String,
    notes: String,
}

const PROJECT_COLUMNS: &str =
    "id, name, owner, description, industry, cost_model, inclusions, comments, notes";

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_default() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "effort-estimator")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        let db_path = dirs.data_dir().join("estimator.db");
        Self::open(db_path)
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.lock()?;
        schema::run_migrations(&conn)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow::anyhow!("database lock poisoned"))
    }

    // ============================================================
    // Project operations
    // ============================================================

    pub fn get_project_summaries(&self) -> Result<Vec<ProjectSummary>> {
        Ok(self
            .list_records()?
            .iter()
            .map(|(id, record)| ProjectSummary::from_record(*id, record))
            .collect())
    }

    fn read_project_row(conn: &Connection, id: Uuid) -> Result<Option<ProjectRow>> {
        let row = conn
            .query_row(
                &format!("SELECT {} FROM projects WHERE id = ?", PROJECT_COLUMNS),
                [id.to_string()],
                map_project_row,
            )
            .optional()?;
        Ok(row)
    }

    fn read_features(conn: &Connection, project_id: &str) -> Result<Vec<Feature>> {
        let mut stmt = conn.prepare(
            "SELECT id, module, name, quantity_multiplier, size, hours
             FROM features WHERE project_id = ? ORDER BY position",
        )?;

        let features = stmt
            .query_map([project_id], |row| {
                Ok(Feature {
                    id: parse_uuid(row.get::<_, String>(0)?),
                    module: row.get(1)?,
                    name: row.get(2)?,
                    quantity_multiplier: row.get(3)?,
                    size: parse_size(4, row.get::<_, String>(4)?)?,
                    hours: row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(features)
    }

    fn write_features(tx: &Transaction<'_>, project_id: &str, features: &[Feature]) -> Result<()> {
        tx.execute("DELETE FROM features WHERE project_id = ?", [project_id])?;

        let mut stmt = tx.prepare(
            "INSERT INTO features (id, project_id, position, module, name, quantity_multiplier, size, hours)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )?;
        for (position, feature) in features.iter().enumerate() {
            stmt.execute((
                feature.id.to_string(),
                project_id,
                position as i64,
                &feature.module,
                &feature.name,
                feature.quantity_multiplier,
                feature.size.as_str(),
                feature.hours,
            ))?;
        }
        Ok(())
    }
}

impl ProjectStore for Database {
    fn create_record(&self, record: &ProjectRecord) -> Result<Uuid> {
        let mut conn = self.lock()?;
        let id = Uuid::new_v4();
        let now = Utc::now().to_rfc3339();

        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO projects (id, name, owner, description, industry, cost_model, inclusions, comments, notes, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            rusqlite::params![
                id.to_string(),
                &record.metadata.name,
                &record.metadata.owner,
                &record.metadata.description,
                &record.metadata.industry,
                serde_json::to_string(&record.cost_model)?,
                serde_json::to_string(&record.inclusions)?,
                serde_json::to_string(&record.comments)?,
                serde_json::to_string(&record.notes)?,
                &now,
                &now,
            ],
        )?;
        Self::write_features(&tx, &id.to_string(), &record.features)?;
        tx.commit()?;

        tracing::debug!("Created project record {}", id);
        Ok(id)
    }

    fn get_record(&self, id: Uuid) -> Result<Option<ProjectRecord>> {
        let conn = self.lock()?;
        let Some(row) = Self::read_project_row(&conn, id)? else {
            return Ok(None);
        };
        let features = Self::read_features(&conn, &row.id)?;
        decode_record(row, features).map(Some)
    }

    fn update_record(&self, id: Uuid, record: &ProjectRecord) -> Result<bool> {
        let mut conn = self.lock()?;
        let now = Utc::now().to_rfc3339();

        let tx = conn.transaction()?;
        let rows = tx.execute(
            "UPDATE projects SET name = ?, owner = ?, description = ?, industry = ?,
                    cost_model = ?, inclusions = ?, comments = ?, notes = ?, updated_at = ?
             WHERE id = ?",
            rusqlite::params![
                &record.metadata.name,
                &record.metadata.owner,
                &record.metadata.description,
                &record.metadata.industry,
                serde_json::to_string(&record.cost_model)?,
                serde_json::to_string(&record.inclusions)?,
                serde_json::to_string(&record.comments)?,
                serde_json::to_string(&record.notes)?,
                &now,
                id.to_string(),
            ],
        )?;
        if rows == 0 {
            return Ok(false);
        }
        Self::write_features(&tx, &id.to_string(), &record.features)?;
        tx.commit()?;

        Ok(true)
    }

    fn delete_record(&self, id: Uuid) -> Result<bool> {
        let conn = self.lock()?;
        let rows = conn.execute("DELETE FROM projects WHERE id = ?", [id.to_string()])?;
        Ok(rows > 0)
    }

    fn list_records(&self) -> Result<Vec<(Uuid, ProjectRecord)>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM projects ORDER BY name, created_at",
            PROJECT_COLUMNS
        ))?;
        let rows = stmt
            .query_map([], map_project_row)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|row| -> Result<(Uuid, ProjectRecord)> {
                let id = parse_uuid(row.id.clone());
                let features = Self::read_features(&conn, &row.id)?;
                Ok((id, decode_record(row, features)?))
            })
            .collect()
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
        }
    }
}

fn map_project_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ProjectRow> {
    Ok(ProjectRow {
        id: row.get(0)?,
        name: row.get(1)?,
        owner: row.get(2)?,
        description: row.get(3)?,
        industry: row.get(4)?,
        cost_model: row.get(5)?,
        inclusions: row.get(6)?,
        comments: row.get(7)?,
        notes: row.get(8)?,
    })
}

fn decode_record(row: ProjectRow, features: Vec<Feature>) -> Result<ProjectRecord> {
    Ok(ProjectRecord {
        metadata: ProjectMetadata {
            name: row.name,
            owner: row.owner,
            description: row.description,
            industry: row.industry,
        },
        cost_model: serde_json::from_str(&row.cost_model)
            .with_context(|| format!("Invalid cost model stored for project {}", row.id))?,
        features,
        inclusions: serde_json::from_str(&row.inclusions)
            .with_context(|| format!("Invalid inclusions stored for project {}", row.id))?,
        comments: serde_json::from_str(&row.comments)
            .with_context(|| format!("Invalid comments stored for project {}", row.id))?,
        notes: serde_json::from_str(&row.notes)
            .with_context(|| format!("Invalid technical notes stored for project {}", row.id))?,
    })
}

fn parse_uuid(s: String) -> Uuid {
    Uuid::parse_str(&s).unwrap_or_else(|_| Uuid::nil())
}

fn parse_size(index: usize, s: String) -> rusqlite::Result<Size> {
    Size::from_str(&s).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            index,
            rusqlite::types::Type::Text,
            format!("unknown size '{}'", s).into(),
        )
    })
}
