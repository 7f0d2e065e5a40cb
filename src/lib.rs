pub mod cli;
pub mod error;
pub mod lookup;
pub mod parser;
pub mod query;
pub mod schema;
pub mod ui;
pub mod writer;

pub use cli::{Cli, Commands};
pub use error::LookupError;
pub use lookup::TypeLookup;
pub use parser::Record;
pub use ui::{ConsoleUi, Phase, SilentUi, Ui};
