pub mod access_ops;
mod walk_time_record;

pub use walk_time_record::WalkTimeRecord;
