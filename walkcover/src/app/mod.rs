pub mod coverage;
pub mod match_stops;
pub mod suggest;
pub mod walk_times;
