use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use super::schema_gen::{generate_create_table, generate_indexes, generate_insert};
use crate::error::LookupError;
use crate::lookup::TypeLookup;
use crate::parser::{read_records, Record};
use crate::query::list_types;
use crate::schema::{TableSchema, ALL_TABLES, POKEMON, TYPES};
use crate::ui::{Phase, Ui};

/// Rows between progress updates
const PROGRESS_INTERVAL: usize = 50;

/// Outcome of loading one table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableStats {
    pub inserted: u64,
    /// Rows skipped because their key already existed
    pub skipped: u64,
}

/// Outcome of a full load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub records_read: u64,
    pub types: TableStats,
    pub pokemon: TableStats,
}

pub struct SqliteWriter {
    conn: Connection,
}

impl SqliteWriter {
    /// Open (or create) the database file. With `fresh`, any existing file
    /// is removed first.
    pub fn open(db_path: &Path, fresh: bool) -> Result<Self> {
        if fresh && db_path.exists() {
            std::fs::remove_file(db_path).context("Failed to remove existing database")?;
        }

        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open database: {:?}", db_path))?;

        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;

        Ok(Self { conn })
    }

    /// Wrap an already open connection, e.g. an in-memory database
    pub fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute("PRAGMA foreign_keys = ON", [])?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn into_connection(self) -> Connection {
        self.conn
    }

    /// Create all tables for the given schemas
    pub fn create_tables(&self, schemas: &[&TableSchema]) -> Result<()> {
        for schema in schemas {
            let sql = generate_create_table(schema);
            self.conn
                .execute(&sql, [])
                .with_context(|| format!("Failed to create table: {}", schema.name))?;

            for index_sql in generate_indexes(schema) {
                self.conn
                    .execute(&index_sql, [])
                    .with_context(|| format!("Failed to create index for: {}", schema.name))?;
            }
        }

        Ok(())
    }

    /// Load the lookup already stored in the Types table
    pub fn read_types(&self) -> Result<TypeLookup> {
        let rows = list_types(&self.conn)?;
        let lookup = TypeLookup::from_persisted(rows).context("Failed to read existing types")?;
        Ok(lookup)
    }

    /// Persist the type lookup. Rows already stored with the same id and
    /// type are skipped; any other clash is an error.
    pub fn write_types(&mut self, lookup: &TypeLookup) -> Result<TableStats> {
        let sql = generate_insert(&TYPES);
        let tx = self.conn.transaction()?;
        let mut stats = TableStats::default();

        {
            let mut stmt = tx.prepare_cached(&sql)?;
            let mut existing = tx.prepare_cached("SELECT id FROM Types WHERE type = ?1")?;
            for (id, type_name) in lookup.iter() {
                let changed = stmt
                    .execute(params![id, type_name])
                    .with_context(|| format!("Failed to insert type: {}", type_name))?;

                if changed == 0 {
                    let stored: Option<u32> = existing
                        .query_row(params![type_name], |row| row.get(0))
                        .optional()?;
                    if stored != Some(id) {
                        return Err(LookupError::Conflict {
                            id,
                            type_name: type_name.to_string(),
                        }
                        .into());
                    }
                }
                tally(&mut stats, changed);
            }
        }

        tx.commit()?;
        Ok(stats)
    }

    /// Insert every record, resolving its type through `lookup`.
    /// A record whose name already exists is skipped.
    pub fn write_records(
        &mut self,
        records: &[Record],
        lookup: &TypeLookup,
        ui: &mut impl Ui,
    ) -> Result<TableStats> {
        let sql = generate_insert(&POKEMON);
        let total = records.len() as u64;
        let tx = self.conn.transaction()?;
        let mut stats = TableStats::default();

        {
            let mut stmt = tx.prepare_cached(&sql)?;
            for (idx, record) in records.iter().enumerate() {
                let type_id = lookup
                    .resolve(&record.primary_type)
                    .with_context(|| format!("Failed to load pokemon: {}", record.name))?;

                let changed = stmt
                    .execute(params![
                        record.name,
                        type_id,
                        record.hp,
                        record.attack,
                        record.defense,
                        record.speed,
                        record.special_attack,
                        record.special_defense,
                    ])
                    .with_context(|| format!("Failed to insert pokemon: {}", record.name))?;
                tally(&mut stats, changed);

                if (idx + 1) % PROGRESS_INTERVAL == 0 {
                    ui.set_progress(idx as u64 + 1, total, POKEMON.name);
                }
            }
        }

        tx.commit()?;
        ui.set_progress(total, total, POKEMON.name);
        ui.clear_progress();

        Ok(stats)
    }

    /// Extend the stored type lookup with `records` and load both tables
    pub fn load(&mut self, records: &[Record], ui: &mut impl Ui) -> Result<LoadSummary> {
        ui.set_phase(Phase::CreatingTables);
        self.create_tables(ALL_TABLES)?;

        ui.set_phase(Phase::LoadingTypes);
        let mut lookup = self.read_types()?;
        lookup.extend(records);
        let types = self.write_types(&lookup)?;
        ui.log(format!(
            "{}: {} inserted, {} already present",
            TYPES.name, types.inserted, types.skipped
        ));

        ui.set_phase(Phase::LoadingPokemon);
        let pokemon = self.write_records(records, &lookup, ui)?;
        ui.log(format!(
            "{}: {} inserted, {} skipped",
            POKEMON.name, pokemon.inserted, pokemon.skipped
        ));

        Ok(LoadSummary {
            records_read: records.len() as u64,
            types,
            pokemon,
        })
    }

    /// Finalize the database. Leaves rollback journaling on so the file
    /// can be opened read-only afterwards.
    pub fn finalize(self) -> Result<()> {
        self.conn.execute_batch(
            "PRAGMA optimize;
             PRAGMA journal_mode = DELETE;",
        )?;
        self.conn
            .close()
            .map_err(|(_, e)| e)
            .context("Failed to close database")?;
        Ok(())
    }
}

fn tally(stats: &mut TableStats, changed: usize) {
    if changed == 0 {
        stats.skipped += 1;
    } else {
        stats.inserted += changed as u64;
    }
}

/// Read the JSON dataset and load it into the SQLite database
pub fn convert_to_sqlite(
    input: &Path,
    output_db: &Path,
    fresh: bool,
    ui: &mut impl Ui,
) -> Result<LoadSummary> {
    ui.set_phase(Phase::Reading);
    let records = read_records(input)?;
    ui.set_info(format!("{} records in {:?}", records.len(), input));

    let mut writer = SqliteWriter::open(output_db, fresh)?;
    let summary = writer.load(&records, ui)?;
    writer.finalize()?;

    ui.set_phase(Phase::Complete);
    Ok(summary)
}
