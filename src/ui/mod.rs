//! Terminal output for listings and documents

pub mod listing;
pub mod preview;
