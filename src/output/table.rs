//! Table output formatting

use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

/// Printed instead of an empty table
pub const EMPTY_MESSAGE: &str = "No results found.";

/// Format rows as a rounded table with a centered header
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    if data.is_empty() {
        return EMPTY_MESSAGE.to_string();
    }

    let mut table = Table::new(data);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Tabled)]
    struct PrivilegeRow {
        #[tabled(rename = "REPO")]
        repo: &'static str,
        #[tabled(rename = "PERMISSION")]
        permission: &'static str,
    }

    #[test]
    fn test_empty_table_message() {
        let rows: Vec<PrivilegeRow> = vec![];
        assert_eq!(format_table(&rows), EMPTY_MESSAGE);
    }

    #[test]
    fn test_rows_in_order() {
        let rows = vec![
            PrivilegeRow {
                repo: "web-app",
                permission: "write",
            },
            PrivilegeRow {
                repo: "api",
                permission: "read",
            },
        ];

        let result = format_table(&rows);
        assert!(result.contains("PERMISSION"));
        assert!(result.find("web-app").unwrap() < result.find("api").unwrap());
        // rounded corners
        assert!(result.contains('╭'));
    }
}
