pub mod match_ops;
pub mod normalize;
mod stop_school_match;

pub use stop_school_match::StopSchoolMatch;
