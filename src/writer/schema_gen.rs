use crate::schema::TableSchema;

/// Generate CREATE TABLE SQL for a table schema
pub fn generate_create_table(schema: &TableSchema) -> String {
    let mut sql = format!("CREATE TABLE IF NOT EXISTS {} (\n", schema.name);
    let mut columns = Vec::new();

    for col in schema.columns {
        let pk = if col.primary_key { " PRIMARY KEY" } else { "" };
        let null_constraint = if !col.nullable && !col.primary_key {
            " NOT NULL"
        } else {
            ""
        };
        let unique = if col.unique { " UNIQUE" } else { "" };

        columns.push(format!(
            "    {} {}{}{}{}",
            col.name,
            col.col_type.sql_type(),
            pk,
            null_constraint,
            unique
        ));
    }

    // Add foreign key constraints
    for fk in schema.foreign_keys {
        columns.push(format!(
            "    FOREIGN KEY ({}) REFERENCES {}({})",
            fk.column, fk.references_table, fk.references_column
        ));
    }

    sql.push_str(&columns.join(",\n"));
    sql.push_str("\n)");

    sql
}

/// Generate CREATE INDEX statements for foreign key columns
pub fn generate_indexes(schema: &TableSchema) -> Vec<String> {
    schema
        .foreign_keys
        .iter()
        .map(|fk| {
            format!(
                "CREATE INDEX IF NOT EXISTS idx_{}_{} ON {}({})",
                schema.name.to_lowercase(),
                fk.column,
                schema.name,
                fk.column
            )
        })
        .collect()
}

/// Generate an `INSERT OR IGNORE` statement covering every column
pub fn generate_insert(schema: &TableSchema) -> String {
    let columns = schema.column_names();
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{}", i)).collect();
    format!(
        "INSERT OR IGNORE INTO {} ({}) VALUES ({})",
        schema.name,
        columns.join(", "),
        placeholders.join(", ")
    )
}
