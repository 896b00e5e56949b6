pub const SCHEMA: &str = r#"
-- Domains group translation keys by product area
CREATE TABLE IF NOT EXISTS domains (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    created_at TEXT DEFAULT (datetime('now'))
);

-- Languages are addressed by their locale code on the lookup path
CREATE TABLE IF NOT EXISTS languages (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    code TEXT NOT NULL UNIQUE,
    created_at TEXT DEFAULT (datetime('now'))
);

-- Sources: a unique key plus its canonical text
CREATE TABLE IF NOT EXISTS sources (
    id TEXT PRIMARY KEY,
    key TEXT NOT NULL UNIQUE,
    text TEXT NOT NULL,
    domain_id TEXT NOT NULL REFERENCES domains(id) ON DELETE RESTRICT,
    created_by_id TEXT,
    created_at TEXT DEFAULT (datetime('now')),
    updated_at TEXT DEFAULT (datetime('now'))
);

-- Translations are owned by their source; one per language
CREATE TABLE IF NOT EXISTS translations (
    id TEXT PRIMARY KEY,
    text TEXT NOT NULL,
    language_id TEXT NOT NULL REFERENCES languages(id) ON DELETE RESTRICT,
    source_id TEXT NOT NULL REFERENCES sources(id) ON DELETE CASCADE,
    created_by_id TEXT,
    created_at TEXT DEFAULT (datetime('now')),
    updated_at TEXT DEFAULT (datetime('now')),

    UNIQUE(source_id, language_id)
);

CREATE INDEX IF NOT EXISTS idx_sources_domain ON sources(domain_id);
CREATE INDEX IF NOT EXISTS idx_translations_language ON translations(language_id);
CREATE INDEX IF NOT EXISTS idx_translations_source ON translations(source_id);
"#;
