use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// One creature as it appears in the input file
#[derive(Debug, Clone, Deserialize)]
struct RawRecord {
    name: String,
    #[serde(rename = "type")]
    types: Vec<String>,
    hp: u32,
    attack: u32,
    defense: u32,
    speed: u32,
    #[serde(rename = "special-attack")]
    special_attack: u32,
    #[serde(rename = "special-defense", default)]
    special_defense: Option<u32>,
}

/// A parsed record ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub name: String,
    /// First entry of the input `type` array
    pub primary_type: String,
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    pub special_attack: u32,
    pub special_defense: Option<u32>,
}

impl RawRecord {
    fn into_record(self) -> Result<Record> {
        let Some(primary_type) = self.types.into_iter().next() else {
            bail!("Record '{}' has an empty type list", self.name);
        };

        Ok(Record {
            name: self.name,
            primary_type,
            hp: self.hp,
            attack: self.attack,
            defense: self.defense,
            speed: self.speed,
            special_attack: self.special_attack,
            special_defense: self.special_defense,
        })
    }
}

/// Parse a JSON array of records
pub fn parse_records(json: &str) -> Result<Vec<Record>> {
    let raw: Vec<RawRecord> = serde_json::from_str(json).context("Failed to parse JSON")?;
    raw.into_iter().map(RawRecord::into_record).collect()
}

/// Read and parse the dataset file
pub fn read_records(path: &Path) -> Result<Vec<Record>> {
    let file = File::open(path).with_context(|| format!("Failed to open: {:?}", path))?;
    let raw: Vec<RawRecord> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse JSON in {:?}", path))?;

    raw.into_iter()
        .map(RawRecord::into_record)
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("Invalid record in {:?}", path))
}
