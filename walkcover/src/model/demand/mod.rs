mod student_table;

pub use student_table::StudentTable;
