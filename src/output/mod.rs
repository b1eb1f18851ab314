pub mod writer;

pub use writer::{save_history_csv, write_output_json};
