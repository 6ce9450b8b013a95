mod service_table;

pub use service_table::{ServiceTable, CANDIDATE_TEXT_COLUMNS};
