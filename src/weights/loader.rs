//! Weight table loaders.
//!
//! Three on-disk layouts are supported, all using the flat row shape
//! `question_id, choice, energy, positivity, curiosity`:
//!
//! ```json
//! [{"question_id": 1, "choice": "A", "energy": 1, "positivity": 1, "curiosity": 0}]
//! ```
//!
//! ```jsonl
//! {"question_id": 1, "choice": "A", "energy": 1, "positivity": 1, "curiosity": 0}
//! {"question_id": 1, "choice": "B", "energy": -1, "positivity": 0, "curiosity": 2}
//! ```
//!
//! ```csv
//! question_id,choice,energy,positivity,curiosity
//! 1,A,1,1,0
//! ```

use std::fs;
use std::path::Path;

use csv::ReaderBuilder;
use log::debug;

use crate::error::{Result, TidecastError};
use crate::weights::table::{ChoiceWeightEntry, WeightRow, WeightTable};

/// A trait for reading a [`WeightTable`] from a particular file format.
///
/// # Example
///
/// ```no_run
/// use tidecast::weights::{CsvWeightLoader, WeightTableLoader};
///
/// let table = CsvWeightLoader::new().load("weights.csv").unwrap();
/// println!("{} entries", table.len());
/// ```
pub trait WeightTableLoader {
    /// Parse a weight table from in-memory text.
    fn parse(&self, input: &str) -> Result<WeightTable>;

    /// Read and parse a weight table file.
    fn load<P: AsRef<Path>>(&self, path: P) -> Result<WeightTable> {
        let path = path.as_ref();
        let input = fs::read_to_string(path)?;
        let table = self.parse(&input)?;
        debug!(
            "Loaded {} weight entries from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }
}

/// Loader for a JSON array of entries.
#[derive(Debug, Clone, Default)]
pub struct JsonWeightLoader;

impl JsonWeightLoader {
    pub fn new() -> Self {
        JsonWeightLoader
    }
}

impl WeightTableLoader for JsonWeightLoader {
    fn parse(&self, input: &str) -> Result<WeightTable> {
        let rows: Vec<ChoiceWeightEntry> = serde_json::from_str(input)
            .map_err(|e| TidecastError::parse(format!("Failed to parse weight table JSON: {e}")))?;
        Ok(WeightTable::new(rows))
    }
}

/// Loader for JSON Lines, one entry per line. Blank lines are skipped.
#[derive(Debug, Clone, Default)]
pub struct JsonlWeightLoader;

impl JsonlWeightLoader {
    pub fn new() -> Self {
        JsonlWeightLoader
    }
}

impl WeightTableLoader for JsonlWeightLoader {
    fn parse(&self, input: &str) -> Result<WeightTable> {
        let mut table = WeightTable::default();

        for (line_num, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let entry: ChoiceWeightEntry = serde_json::from_str(line).map_err(|e| {
                TidecastError::parse(format!("Failed to parse line {}: {e}", line_num + 1))
            })?;
            table.push(entry);
        }

        Ok(table)
    }
}

/// Loader for CSV with a header row.
#[derive(Debug, Clone)]
pub struct CsvWeightLoader {
    /// CSV delimiter byte (default: b',')
    delimiter: u8,
}

impl Default for CsvWeightLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvWeightLoader {
    /// Create a new CSV loader with comma delimiter.
    pub fn new() -> Self {
        CsvWeightLoader { delimiter: b',' }
    }

    /// Set a custom delimiter byte.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

impl WeightTableLoader for CsvWeightLoader {
    fn parse(&self, input: &str) -> Result<WeightTable> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(csv::Trim::All)
            .from_reader(input.as_bytes());

        let mut table = WeightTable::default();
        for (index, record) in reader.deserialize::<WeightRow>().enumerate() {
            // Header is line 1.
            let row = record.map_err(|e| {
                TidecastError::parse(format!("Failed to read CSV row {}: {e}", index + 2))
            })?;
            table.push(row.into());
        }

        Ok(table)
    }
}

/// Load a weight table, choosing the loader from the file extension.
///
/// `.csv` and `.tsv` use [`CsvWeightLoader`], `.jsonl` and `.ndjson` use
/// [`JsonlWeightLoader`], anything else is read as a JSON array.
pub fn load_weight_table<P: AsRef<Path>>(path: P) -> Result<WeightTable> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("csv") => CsvWeightLoader::new().load(path),
        Some("tsv") => CsvWeightLoader::new().with_delimiter(b'\t').load(path),
        Some("jsonl") | Some("ndjson") => JsonlWeightLoader::new().load(path),
        _ => JsonWeightLoader::new().load(path),
    }
}
