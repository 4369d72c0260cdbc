//! Job-market dashboard core: load job posting datasets, normalize them into
//! canonical records, filter them against the user's selection and derive
//! every chart dataset from the result.

pub mod config;
pub mod data;
pub mod error;
pub mod state;
