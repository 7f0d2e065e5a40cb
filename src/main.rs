use anyhow::Result;
use pokedex_to_sqlite::{
    cli::{Cli, Commands, QueryArgs},
    query,
    ui::ConsoleUi,
    writer::convert_to_sqlite,
};
use serde::Serialize;
use std::fmt::Debug;
use std::time::Instant;

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    match cli.command.unwrap_or_else(Commands::default_load) {
        Commands::Load {
            input,
            output,
            fresh,
        } => {
            let start = Instant::now();
            let mut ui = ConsoleUi::new();

            let summary = convert_to_sqlite(&input, &output, fresh, &mut ui)?;

            let elapsed = start.elapsed();
            println!(
                "\nLoaded {:?} ({} types, {} pokemon, {} skipped) from {} records in {:.1}s",
                output,
                summary.types.inserted,
                summary.pokemon.inserted,
                summary.pokemon.skipped,
                summary.records_read,
                elapsed.as_secs_f64()
            );
        }

        Commands::ByHp { hp, args } => {
            let conn = query::open_read_only(&args.db)?;
            print_rows(&query::pokemon_by_hp(&conn, hp)?, &args)?;
        }

        Commands::FastAttackers { hp, args } => {
            let conn = query::open_read_only(&args.db)?;
            print_rows(&query::above_hp_equal_speed_attack(&conn, hp)?, &args)?;
        }

        Commands::FastDefenders {
            speed,
            defense,
            type_name,
            args,
        } => {
            let conn = query::open_read_only(&args.db)?;
            let rows = query::above_speed_above_defense_of_type(&conn, speed, defense, &type_name)?;
            print_rows(&rows, &args)?;
        }

        Commands::SpecialAttackers {
            type_name,
            threshold,
            args,
        } => {
            let conn = query::open_read_only(&args.db)?;
            let rows = query::special_attack_of_type(&conn, &type_name, threshold)?;
            print_rows(&rows, &args)?;
        }

        Commands::ListTypes { db } => {
            let conn = query::open_read_only(&db)?;
            println!("Known types:\n");
            for (id, name) in query::list_types(&conn)? {
                println!("  {:>3}  {}", id, name);
            }
        }
    }

    Ok(())
}

fn print_rows<T: Serialize + Debug>(rows: &[T], args: &QueryArgs) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(rows)?);
        return Ok(());
    }

    for row in rows {
        println!("{:?}", row);
    }
    println!("\n{} rows", rows.len());
    Ok(())
}
