mod candidate_stop;
pub mod placement_ops;

pub use candidate_stop::CandidateStop;
