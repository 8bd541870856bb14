//! Parsers for class schedule tables.
//!
//! # Parsers
//!
//! - [`csv_parser`]: Read and write the flat session CSV, annotations included
//!
//! # Example
//!
//! ```no_run
//! use class_collisions::parsing::csv_parser::parse_schedule_csv_to_records;
//! use std::path::Path;
//!
//! let records = parse_schedule_csv_to_records(Path::new("schedule.csv"))
//!     .expect("Failed to parse schedule");
//! println!("Loaded {} sessions", records.len());
//! ```

pub mod csv_parser;


pub use csv_parser::{
    dataframe_to_records, parse_schedule_csv, parse_schedule_csv_to_records, records_to_dataframe,
    write_schedule_csv,
};
