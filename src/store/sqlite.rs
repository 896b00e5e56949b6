use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};

use super::Store;
use super::schema::SCHEMA;
use crate::error::{Error, Result};
use crate::types::*;

const SOURCE_COLUMNS: &str =
    "s.id, s.key, s.text, s.domain_id, s.created_by_id, s.created_at, s.updated_at";

const SOURCE_FILTER: &str = "
    FROM sources s
    JOIN domains d ON d.id = s.domain_id
    WHERE (?1 IS NULL OR s.domain_id = ?1)
      AND (?2 IS NULL OR EXISTS (
            SELECT 1 FROM translations t WHERE t.source_id = s.id AND t.language_id = ?2))
      AND (?3 IS NULL
            OR lower(s.key) LIKE ?3 ESCAPE '\\'
            OR lower(s.text) LIKE ?3 ESCAPE '\\'
            OR lower(d.name) LIKE ?3 ESCAPE '\\')";

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Opens a private in-memory database. Useful for tests and throwaway servers.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            // Handle SQLite's default datetime format: "YYYY-MM-DD HH:MM:SS"
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            tracing::error!("Invalid datetime in database: '{}' - {}", s, e);
            Utc::now()
        })
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

/// Maps constraint failures onto the store's error kinds.
fn constraint_error(err: rusqlite::Error) -> Error {
    if let rusqlite::Error::SqliteFailure(e, _) = &err {
        match e.extended_code {
            rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE | rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                return Error::AlreadyExists;
            }
            rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY => return Error::InvalidReference,
            _ => {}
        }
    }
    Error::Database(err)
}

fn domain_from_row(row: &Row<'_>) -> rusqlite::Result<Domain> {
    Ok(Domain {
        id: row.get(0)?,
        name: row.get(1)?,
        created_at: parse_datetime(&row.get::<_, String>(2)?),
    })
}

fn language_from_row(row: &Row<'_>) -> rusqlite::Result<Language> {
    Ok(Language {
        id: row.get(0)?,
        name: row.get(1)?,
        code: row.get(2)?,
        created_at: parse_datetime(&row.get::<_, String>(3)?),
    })
}

fn source_from_row(row: &Row<'_>) -> rusqlite::Result<Source> {
    Ok(Source {
        id: row.get(0)?,
        key: row.get(1)?,
        text: row.get(2)?,
        domain_id: row.get(3)?,
        created_by_id: row.get(4)?,
        created_at: parse_datetime(&row.get::<_, String>(5)?),
        updated_at: parse_datetime(&row.get::<_, String>(6)?),
    })
}

fn translation_from_row(row: &Row<'_>) -> rusqlite::Result<Translation> {
    Ok(Translation {
        id: row.get(0)?,
        text: row.get(1)?,
        language_id: row.get(2)?,
        source_id: row.get(3)?,
        created_by_id: row.get(4)?,
        created_at: parse_datetime(&row.get::<_, String>(5)?),
        updated_at: parse_datetime(&row.get::<_, String>(6)?),
    })
}

fn insert_translation(conn: &Connection, translation: &Translation) -> Result<()> {
    conn.execute(
        "INSERT INTO translations (id, text, language_id, source_id, created_by_id, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            translation.id,
            translation.text,
            translation.language_id,
            translation.source_id,
            translation.created_by_id,
            format_datetime(&translation.created_at),
            format_datetime(&translation.updated_at),
        ],
    )
    .map_err(constraint_error)?;
    Ok(())
}

impl Store for SqliteStore {
    fn initialize(&self) -> Result<()> {
        self.conn().execute_batch(SCHEMA)?;
        Ok(())
    }

    fn is_initialized(&self) -> Result<bool> {
        let count: i64 = self.conn().query_row(
            "SELECT COUNT(*) FROM sqlite_master
             WHERE type = 'table' AND name IN ('domains', 'languages', 'sources', 'translations')",
            [],
            |row| row.get(0),
        )?;
        Ok(count == 4)
    }

    // Domain operations

    fn create_domain(&self, domain: &Domain) -> Result<()> {
        self.conn()
            .execute(
                "INSERT INTO domains (id, name, created_at) VALUES (?1, ?2, ?3)",
                params![domain.id, domain.name, format_datetime(&domain.created_at)],
            )
            .map_err(constraint_error)?;
        Ok(())
    }

    fn get_domain(&self, id: &str) -> Result<Option<Domain>> {
        self.conn()
            .query_row(
                "SELECT id, name, created_at FROM domains WHERE id = ?1",
                params![id],
                domain_from_row,
            )
            .optional()
            .map_err(Error::from)
    }

    fn get_domain_by_name(&self, name: &str) -> Result<Option<Domain>> {
        self.conn()
            .query_row(
                "SELECT id, name, created_at FROM domains WHERE name = ?1",
                params![name],
                domain_from_row,
            )
            .optional()
            .map_err(Error::from)
    }

    fn list_domains(&self) -> Result<Vec<Domain>> {
        let conn = self.conn();
        let mut stmt = conn.prepare("SELECT id, name, created_at FROM domains ORDER BY name ASC")?;
        let rows = stmt.query_map([], domain_from_row)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn delete_domain(&self, id: &str) -> Result<bool> {
        let rows = self
            .conn()
            .execute("DELETE FROM domains WHERE id = ?1", params![id])
            .map_err(constraint_error)?;
        Ok(rows > 0)
    }

    fn count_domain_sources(&self, id: &str) -> Result<i64> {
        let count: i64 = self.conn().query_row(
            "SELECT COUNT(*) FROM sources WHERE domain_id = ?1",
            params![id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    // Language operations

    fn create_language(&self, language: &Language) -> Result<()> {
        self.conn()
            .execute(
                "INSERT INTO languages (id, name, code, created_at) VALUES (?1, ?2, ?3, ?4)",
                params![
                    language.id,
                    language.name,
                    language.code,
                    format_datetime(&language.created_at),
                ],
            )
            .map_err(constraint_error)?;
        Ok(())
    }

    fn get_language(&self, id: &str) -> Result<Option<Language>> {
        self.conn()
            .query_row(
                "SELECT id, name, code, created_at FROM languages WHERE id = ?1",
                params![id],
                language_from_row,
            )
            .optional()
            .map_err(Error::from)
    }

    fn get_language_by_name(&self, name: &str) -> Result<Option<Language>> {
        self.conn()
            .query_row(
                "SELECT id, name, code, created_at FROM languages WHERE name = ?1",
                params![name],
                language_from_row,
            )
            .optional()
            .map_err(Error::from)
    }

    fn get_language_by_code(&self, code: &str) -> Result<Option<Language>> {
        self.conn()
            .query_row(
                "SELECT id, name, code, created_at FROM languages WHERE code = ?1",
                params![code],
                language_from_row,
            )
            .optional()
            .map_err(Error::from)
    }

    fn list_languages(&self) -> Result<Vec<Language>> {
        let conn = self.conn();
        let mut stmt =
            conn.prepare("SELECT id, name, code, created_at FROM languages ORDER BY name ASC")?;
        let rows = stmt.query_map([], language_from_row)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn delete_language(&self, id: &str) -> Result<bool> {
        let rows = self
            .conn()
            .execute("DELETE FROM languages WHERE id = ?1", params![id])
            .map_err(constraint_error)?;
        Ok(rows > 0)
    }

    fn count_language_translations(&self, id: &str) -> Result<i64> {
        let count: i64 = self.conn().query_row(
            "SELECT COUNT(*) FROM translations WHERE language_id = ?1",
            params![id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    // Source operations

    fn create_source(&self, source: &Source, translations: &[Translation]) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO sources (id, key, text, domain_id, created_by_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                source.id,
                source.key,
                source.text,
                source.domain_id,
                source.created_by_id,
                format_datetime(&source.created_at),
                format_datetime(&source.updated_at),
            ],
        )
        .map_err(constraint_error)?;

        for translation in translations {
            insert_translation(&tx, translation)?;
        }

        tx.commit()?;
        Ok(())
    }

    fn get_source(&self, id: &str) -> Result<Option<Source>> {
        self.conn()
            .query_row(
                &format!("SELECT {SOURCE_COLUMNS} FROM sources s WHERE s.id = ?1"),
                params![id],
                source_from_row,
            )
            .optional()
            .map_err(Error::from)
    }

    fn get_source_by_key(&self, key: &str) -> Result<Option<Source>> {
        self.conn()
            .query_row(
                &format!("SELECT {SOURCE_COLUMNS} FROM sources s WHERE s.key = ?1"),
                params![key],
                source_from_row,
            )
            .optional()
            .map_err(Error::from)
    }

    fn get_source_detail(&self, id: &str) -> Result<Option<SourceDetail>> {
        let Some(source) = self.get_source(id)? else {
            return Ok(None);
        };
        let domain = self.get_domain(&source.domain_id)?.ok_or(Error::NotFound)?;
        let translations = self.list_source_translations(&source.id)?;

        Ok(Some(SourceDetail {
            source,
            domain,
            translations,
        }))
    }

    fn query_sources(&self, query: &SourceQuery) -> Result<Page<SourceSummary>> {
        let conn = self.conn();
        let pattern = query.search_pattern();

        let total: i64 = conn.query_row(
            &format!("SELECT COUNT(*) {SOURCE_FILTER}"),
            params![query.domain_id, query.language_id, pattern],
            |row| row.get(0),
        )?;

        let sql = format!(
            "SELECT {SOURCE_COLUMNS}, d.name,
                    (SELECT COUNT(*) FROM translations t WHERE t.source_id = s.id)
             {SOURCE_FILTER}
             ORDER BY {column} {direction}, s.key {direction}
             LIMIT ?4 OFFSET ?5",
            column = query.sort.column(),
            direction = query.direction.sql(),
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(
            params![
                query.domain_id,
                query.language_id,
                pattern,
                query.per_page,
                query.offset(),
            ],
            |row| {
                Ok(SourceSummary {
                    source: source_from_row(row)?,
                    domain_name: row.get(7)?,
                    translation_count: row.get(8)?,
                })
            },
        )?;

        let items = rows.collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Page { items, total })
    }

    fn update_source(&self, source: &Source) -> Result<()> {
        let rows = self
            .conn()
            .execute(
                "UPDATE sources SET text = ?1, domain_id = ?2, updated_at = ?3 WHERE id = ?4",
                params![
                    source.text,
                    source.domain_id,
                    format_datetime(&source.updated_at),
                    source.id
                ],
            )
            .map_err(constraint_error)?;

        if rows == 0 {
            return Err(Error::NotFound);
        }
        Ok(())
    }

    fn delete_source(&self, id: &str) -> Result<bool> {
        let rows = self
            .conn()
            .execute("DELETE FROM sources WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }

    // Translation operations

    fn create_translation(&self, translation: &Translation) -> Result<()> {
        insert_translation(&self.conn(), translation)
    }

    fn get_translation(&self, id: &str) -> Result<Option<Translation>> {
        self.conn()
            .query_row(
                "SELECT id, text, language_id, source_id, created_by_id, created_at, updated_at
                 FROM translations WHERE id = ?1",
                params![id],
                translation_from_row,
            )
            .optional()
            .map_err(Error::from)
    }

    fn list_source_translations(&self, source_id: &str) -> Result<Vec<TranslationWithLanguage>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT t.id, t.text, t.language_id, t.source_id, t.created_by_id, t.created_at, t.updated_at,
                    l.id, l.name, l.code, l.created_at
             FROM translations t
             JOIN languages l ON l.id = t.language_id
             WHERE t.source_id = ?1
             ORDER BY l.name ASC",
        )?;

        let rows = stmt.query_map(params![source_id], |row| {
            Ok(TranslationWithLanguage {
                translation: translation_from_row(row)?,
                language: Language {
                    id: row.get(7)?,
                    name: row.get(8)?,
                    code: row.get(9)?,
                    created_at: parse_datetime(&row.get::<_, String>(10)?),
                },
            })
        })?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn update_translation(&self, translation: &Translation) -> Result<()> {
        let rows = self
            .conn()
            .execute(
                "UPDATE translations SET text = ?1, language_id = ?2, updated_at = ?3 WHERE id = ?4",
                params![
                    translation.text,
                    translation.language_id,
                    format_datetime(&translation.updated_at),
                    translation.id
                ],
            )
            .map_err(constraint_error)?;

        if rows == 0 {
            return Err(Error::NotFound);
        }
        Ok(())
    }

    fn delete_translation(&self, id: &str) -> Result<bool> {
        let rows = self
            .conn()
            .execute("DELETE FROM translations WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }

    fn resolve_translation(&self, key: &str, code: &str) -> Result<Option<String>> {
        // Most recently updated row wins if a pair is ever duplicated.
        self.conn()
            .query_row(
                "SELECT t.text
                 FROM translations t
                 JOIN sources s ON s.id = t.source_id
                 JOIN languages l ON l.id = t.language_id
                 WHERE s.key = ?1 AND l.code = ?2
                 ORDER BY t.updated_at DESC, t.id DESC
                 LIMIT 1",
                params![key, code],
                |row| row.get(0),
            )
            .optional()
            .map_err(Error::from)
    }
}
