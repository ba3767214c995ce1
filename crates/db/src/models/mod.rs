//! Raw row types for the relational backend.
//!
//! Rows mirror the tables exactly, nullable columns included. Converting a
//! row into its domain record is the single place where absent values are
//! default-filled.

pub mod plant;
pub mod quote;
