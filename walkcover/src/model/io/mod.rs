pub mod csv_ops;
pub mod geojson_ops;

pub use csv_ops::FlexibleTable;
pub use geojson_ops::PointFeature;
