//! Table schema definitions for the Pokemon dataset

use super::types::*;

/// Distinct primary types, ids assigned in first-seen order
pub static TYPES: TableSchema = TableSchema {
    name: "Types",
    columns: &[
        Column::primary("id", ColumnType::Integer),
        Column::required("type", ColumnType::Text).unique(),
    ],
    foreign_keys: &[],
};

/// One row per creature. `rowid` follows input order.
pub static POKEMON: TableSchema = TableSchema {
    name: "Pokemon",
    columns: &[
        Column::primary("name", ColumnType::Text),
        Column::required("type_id", ColumnType::Integer),
        Column::required("hp", ColumnType::Integer),
        Column::required("attack", ColumnType::Integer),
        Column::required("defense", ColumnType::Integer),
        Column::required("speed", ColumnType::Integer),
        Column::required("special_attack", ColumnType::Integer),
        Column::new("special_defense", ColumnType::Integer),
    ],
    foreign_keys: &[ForeignKey::new("type_id", "Types")],
};

/// All tables, parents before children
pub static ALL_TABLES: &[&TableSchema] = &[&TYPES, &POKEMON];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pokemon_has_eight_columns() {
        assert_eq!(POKEMON.columns.len(), 8);
        assert_eq!(POKEMON.column_names()[0], "name");
    }

    #[test]
    fn test_parents_come_first() {
        let names: Vec<_> = ALL_TABLES.iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["Types", "Pokemon"]);
    }
}
