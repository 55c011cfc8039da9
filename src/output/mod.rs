//! Output formatting for CLI results

use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::Result;

pub mod json;
pub mod report;
pub mod table;

/// Trait for types that can be formatted for output
pub trait Formattable {
    /// Format the data according to the specified format
    fn format(&self, format: OutputFormat) -> Result<String>;

    /// Format and print to stdout
    fn print(&self, format: OutputFormat) -> Result<()> {
        println!("{}", self.format(format)?);
        Ok(())
    }
}

impl<T: Tabled + Serialize> Formattable for Vec<T> {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Table => Ok(table::format_table(self)),
            OutputFormat::Json => Ok(json::format_json(self)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Tabled, Serialize)]
    struct Row {
        #[tabled(rename = "REPO")]
        repo: String,
    }

    #[test]
    fn test_vec_formats_as_table_or_json() {
        let rows = vec![Row {
            repo: "web-app".to_string(),
        }];

        let table = rows.format(OutputFormat::Table).unwrap();
        assert!(table.contains("REPO"));
        assert!(table.contains("web-app"));

        let json = rows.format(OutputFormat::Json).unwrap();
        assert!(json.contains("\"repo\": \"web-app\""));
        assert!(json.contains("\"count\": 1"));
    }
}
