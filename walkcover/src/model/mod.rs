pub mod access;
pub mod cell;
pub mod demand;
pub mod error;
pub mod io;
pub mod kpi;
pub mod matching;
pub mod network;
pub mod placement;
pub mod service;
