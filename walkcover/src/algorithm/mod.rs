pub mod fuzzy;
pub mod search;
