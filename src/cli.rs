use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::query::DEFAULT_SPECIAL_ATTACK_DELTA;

pub const DEFAULT_INPUT: &str = "pokemon.json";
pub const DEFAULT_DB: &str = "pokemon.db";

#[derive(Parser, Debug)]
#[command(name = "pokedex-to-sqlite")]
#[command(version, about = "Load a Pokemon stats dataset into SQLite and query it")]
pub struct Cli {
    /// Defaults to `load` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Options shared by every query command
#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// SQLite database path
    #[arg(long, default_value = DEFAULT_DB)]
    pub db: PathBuf,

    /// Print rows as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load the JSON dataset into the database
    Load {
        /// Input JSON file
        #[arg(short, long, default_value = DEFAULT_INPUT)]
        input: PathBuf,

        /// Output SQLite database path
        #[arg(short, long, default_value = DEFAULT_DB)]
        output: PathBuf,

        /// Delete an existing database before loading
        #[arg(short, long)]
        fresh: bool,
    },

    /// Pokemon with exactly this hp
    ByHp {
        hp: u32,

        #[command(flatten)]
        args: QueryArgs,
    },

    /// Pokemon above this hp whose speed equals their attack
    FastAttackers {
        hp: u32,

        #[command(flatten)]
        args: QueryArgs,
    },

    /// Pokemon of a type above both a speed and a defense
    FastDefenders {
        speed: u32,
        defense: u32,
        #[arg(value_name = "TYPE")]
        type_name: String,

        #[command(flatten)]
        args: QueryArgs,
    },

    /// Pokemon of a type whose special attack beats attack by a margin
    SpecialAttackers {
        #[arg(value_name = "TYPE")]
        type_name: String,

        /// Required margin of special attack over attack
        #[arg(short, long, default_value_t = DEFAULT_SPECIAL_ATTACK_DELTA)]
        threshold: u32,

        #[command(flatten)]
        args: QueryArgs,
    },

    /// List all known types with their ids
    ListTypes {
        /// SQLite database path
        #[arg(long, default_value = DEFAULT_DB)]
        db: PathBuf,
    },
}

impl Commands {
    /// The command run when none is given
    pub fn default_load() -> Self {
        Commands::Load {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_DB),
            fresh: false,
        }
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
