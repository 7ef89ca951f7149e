//! Output formatting.

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use serde::Serialize;

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table format
    Table,
    /// JSON format
    Json,
    /// Plain text format
    #[default]
    Plain,
}

/// Trait for plain text output.
pub trait PlainPrint {
    /// Print as plain text with formatting.
    fn plain_print(&self);
}

/// Trait for table row generation.
pub trait TableRow {
    /// Get table headers.
    fn headers() -> Vec<&'static str>;
    /// Get row data as strings.
    fn row(&self) -> Vec<String>;
}

/// Print items in plain text format.
pub fn print_plain<T: PlainPrint>(items: &[T]) {
    if items.is_empty() {
        println!("No results");
        return;
    }
    for item in items {
        item.plain_print();
    }
}

/// Format a price for display.
pub fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}

/// Print a table of items with proper formatting for each output mode.
pub fn print_table<T: TableRow + Serialize + PlainPrint>(items: Vec<T>, format: OutputFormat) {
    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(&items) {
            Ok(json) => println!("{}", json),
            Err(err) => eprintln!("Failed to serialize output: {}", err),
        },
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No results");
                return;
            }
            let mut table = Table::new();
            table.load_preset(UTF8_FULL_CONDENSED);
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(T::headers());
            for item in &items {
                table.add_row(item.row());
            }
            println!("{table}");
        }
        OutputFormat::Plain => {
            print_plain(&items);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(1.5), "$1.50");
        assert_eq!(format_price(10.0), "$10.00");
        assert_eq!(format_price(0.333), "$0.33");
    }

    struct Unserializable;

    impl serde::Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(
            &self,
            _serializer: S,
        ) -> Result<S::Ok, S::Error> {
            use serde::ser::Error;
            Err(S::Error::custom("not serializable"))
        }
    }

    impl TableRow for Unserializable {
        fn headers() -> Vec<&'static str> {
            vec!["X"]
        }
        fn row(&self) -> Vec<String> {
            vec!["x".to_owned()]
        }
    }

    impl PlainPrint for Unserializable {
        fn plain_print(&self) {
            println!("x");
        }
    }

    #[test]
    fn test_json_output_survives_serialization_failure() {
        // reports to stderr instead of panicking or printing an empty line
        print_table(vec![Unserializable], OutputFormat::Json);
    }
}
