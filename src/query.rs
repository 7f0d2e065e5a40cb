//! Read-only queries over a loaded database.
//!
//! Every query returns rows in load order (`Pokemon.rowid`) and an empty
//! `Vec` when nothing matches.

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OpenFlags, Params, Row};
use serde::Serialize;
use std::path::Path;

/// Default margin for [`special_attack_of_type`]
pub const DEFAULT_SPECIAL_ATTACK_DELTA: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct HpRow {
    pub name: String,
    pub type_id: u32,
    pub hp: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct SpeedDefenseRow {
    pub name: String,
    pub speed: u32,
    pub defense: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct TypedSpeedDefenseRow {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub speed: u32,
    pub defense: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct SpecialAttackRow {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub attack: u32,
    pub special_attack: u32,
}

/// Open an existing database for queries. SQLite rejects any write, and a
/// missing file is an error rather than a new empty database.
pub fn open_read_only(db: &Path) -> Result<Connection> {
    Connection::open_with_flags(db, OpenFlags::SQLITE_OPEN_READ_ONLY)
        .with_context(|| format!("Failed to open database: {:?} (run `load` first)", db))
}

fn collect<T, P, F>(conn: &Connection, sql: &str, params: P, map: F) -> Result<Vec<T>>
where
    P: Params,
    F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
{
    let mut stmt = conn
        .prepare_cached(sql)
        .with_context(|| format!("Failed to prepare query: {}", sql))?;
    let rows = stmt
        .query_map(params, map)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to read query results")?;
    Ok(rows)
}

/// Pokemon whose hp equals `hp`
pub fn pokemon_by_hp(conn: &Connection, hp: u32) -> Result<Vec<HpRow>> {
    collect(
        conn,
        "SELECT name, type_id, hp FROM Pokemon
         WHERE hp = ?1
         ORDER BY rowid",
        params![hp],
        |row| {
            Ok(HpRow {
                name: row.get(0)?,
                type_id: row.get(1)?,
                hp: row.get(2)?,
            })
        },
    )
}

/// Pokemon with hp above `hp` whose speed equals their attack
pub fn above_hp_equal_speed_attack(conn: &Connection, hp: u32) -> Result<Vec<SpeedDefenseRow>> {
    collect(
        conn,
        "SELECT name, speed, defense FROM Pokemon
         WHERE hp > ?1 AND speed = attack
         ORDER BY rowid",
        params![hp],
        |row| {
            Ok(SpeedDefenseRow {
                name: row.get(0)?,
                speed: row.get(1)?,
                defense: row.get(2)?,
            })
        },
    )
}

/// Pokemon of `type_name` faster than `speed` with defense above `defense`
pub fn above_speed_above_defense_of_type(
    conn: &Connection,
    speed: u32,
    defense: u32,
    type_name: &str,
) -> Result<Vec<TypedSpeedDefenseRow>> {
    collect(
        conn,
        "SELECT p.name, t.type, p.speed, p.defense
         FROM Pokemon p
         JOIN Types t ON p.type_id = t.id
         WHERE p.speed > ?1 AND p.defense > ?2 AND t.type = ?3
         ORDER BY p.rowid",
        params![speed, defense, type_name],
        |row| {
            Ok(TypedSpeedDefenseRow {
                name: row.get(0)?,
                type_name: row.get(1)?,
                speed: row.get(2)?,
                defense: row.get(3)?,
            })
        },
    )
}

/// Pokemon of `type_name` whose special attack is at least `threshold`
/// above their attack
pub fn special_attack_of_type(
    conn: &Connection,
    type_name: &str,
    threshold: u32,
) -> Result<Vec<SpecialAttackRow>> {
    collect(
        conn,
        "SELECT p.name, t.type, p.attack, p.special_attack
         FROM Pokemon p
         JOIN Types t ON p.type_id = t.id
         WHERE t.type = ?1 AND p.special_attack >= p.attack + ?2
         ORDER BY p.rowid",
        params![type_name, threshold],
        |row| {
            Ok(SpecialAttackRow {
                name: row.get(0)?,
                type_name: row.get(1)?,
                attack: row.get(2)?,
                special_attack: row.get(3)?,
            })
        },
    )
}

/// All `(id, type)` pairs in id order
pub fn list_types(conn: &Connection) -> Result<Vec<(u32, String)>> {
    collect(conn, "SELECT id, type FROM Types ORDER BY id", [], |row| {
        Ok((row.get(0)?, row.get(1)?))
    })
}

pub fn count_pokemon(conn: &Connection) -> Result<u64> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM Pokemon", [], |row| row.get(0))
        .context("Failed to count pokemon")?;
    Ok(count as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_records;
    use crate::ui::SilentUi;
    use crate::writer::SqliteWriter;

    const SAMPLE: &str = r#"[
        {"name": "bulbasaur", "type": ["grass", "poison"], "hp": 45, "attack": 49,
         "defense": 49, "speed": 45, "special-attack": 65},
        {"name": "charmander", "type": ["fire"], "hp": 39, "attack": 52,
         "defense": 43, "speed": 65, "special-attack": 60},
        {"name": "vulpix", "type": ["fire"], "hp": 38, "attack": 41,
         "defense": 40, "speed": 65, "special-attack": 50},
        {"name": "ninetales", "type": ["fire"], "hp": 73, "attack": 76,
         "defense": 75, "speed": 100, "special-attack": 81},
        {"name": "ponyta", "type": ["fire"], "hp": 50, "attack": 85,
         "defense": 55, "speed": 90, "special-attack": 65},
        {"name": "abra", "type": ["psychic"], "hp": 25, "attack": 20,
         "defense": 15, "speed": 90, "special-attack": 105},
        {"name": "venusaur", "type": ["grass", "poison"], "hp": 80, "attack": 82,
         "defense": 83, "speed": 80, "special-attack": 100},
        {"name": "oddish", "type": ["grass"], "hp": 45, "attack": 50,
         "defense": 55, "speed": 30, "special-attack": 75},
        {"name": "persian", "type": ["normal"], "hp": 65, "attack": 70,
         "defense": 60, "speed": 115, "special-attack": 65},
        {"name": "dodrio", "type": ["normal"], "hp": 60, "attack": 110,
         "defense": 70, "speed": 110, "special-attack": 60},
        {"name": "arcanine", "type": ["fire"], "hp": 90, "attack": 110,
         "defense": 80, "speed": 95, "special-attack": 100}
    ]"#;

    fn loaded() -> Connection {
        let records = parse_records(SAMPLE).unwrap();
        let mut writer =
            SqliteWriter::from_connection(Connection::open_in_memory().unwrap()).unwrap();
        writer.load(&records, &mut SilentUi::new()).unwrap();
        writer.into_connection()
    }

    #[test]
    fn test_pokemon_by_hp_keeps_load_order() {
        let conn = loaded();
        let rows = pokemon_by_hp(&conn, 45).unwrap();
        assert_eq!(
            rows,
            vec![
                HpRow {
                    name: "bulbasaur".into(),
                    type_id: 0,
                    hp: 45,
                },
                HpRow {
                    name: "oddish".into(),
                    type_id: 0,
                    hp: 45,
                },
            ]
        );
        assert!(pokemon_by_hp(&conn, 999).unwrap().is_empty());
    }

    #[test]
    fn test_above_hp_equal_speed_attack() {
        let conn = loaded();
        // dodrio has hp 60, which is not strictly above 60
        assert!(above_hp_equal_speed_attack(&conn, 60).unwrap().is_empty());

        let rows = above_hp_equal_speed_attack(&conn, 59).unwrap();
        assert_eq!(
            rows,
            vec![SpeedDefenseRow {
                name: "dodrio".into(),
                speed: 110,
                defense: 70,
            }]
        );
    }

    #[test]
    fn test_above_speed_above_defense_of_type() {
        let conn = loaded();
        let rows = above_speed_above_defense_of_type(&conn, 60, 50, "fire").unwrap();
        let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["ninetales", "ponyta", "arcanine"]);
        assert_eq!(
            rows[0],
            TypedSpeedDefenseRow {
                name: "ninetales".into(),
                type_name: "fire".into(),
                speed: 100,
                defense: 75,
            }
        );
    }

    #[test]
    fn test_unknown_type_yields_no_rows() {
        let conn = loaded();
        assert!(above_speed_above_defense_of_type(&conn, 0, 0, "dragon")
            .unwrap()
            .is_empty());
        assert!(above_speed_above_defense_of_type(&conn, 0, 0, "Fire")
            .unwrap()
            .is_empty());
        assert!(special_attack_of_type(&conn, "dragon", 0).unwrap().is_empty());
    }

    #[test]
    fn test_special_attack_of_type() {
        let conn = loaded();
        let rows = special_attack_of_type(&conn, "grass", DEFAULT_SPECIAL_ATTACK_DELTA).unwrap();
        assert_eq!(
            rows,
            vec![SpecialAttackRow {
                name: "oddish".into(),
                type_name: "grass".into(),
                attack: 50,
                special_attack: 75,
            }]
        );

        // venusaur sits exactly on the boundary at 18
        let rows = special_attack_of_type(&conn, "grass", 18).unwrap();
        let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["venusaur", "oddish"]);

        let rows = special_attack_of_type(&conn, "fire", 0).unwrap();
        let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["charmander", "vulpix", "ninetales"]);
    }

    #[test]
    fn test_list_types_and_count() {
        let conn = loaded();
        let types = list_types(&conn).unwrap();
        assert_eq!(
            types,
            vec![
                (0, "grass".to_string()),
                (1, "fire".to_string()),
                (2, "psychic".to_string()),
                (3, "normal".to_string()),
            ]
        );
        assert_eq!(count_pokemon(&conn).unwrap(), 11);
    }
}
