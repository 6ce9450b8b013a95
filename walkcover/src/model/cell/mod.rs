mod cell_code;
pub mod centroid_ops;
mod population_cell;

pub use cell_code::CellCode;
pub use population_cell::PopulationCell;
