//! Shared test utilities for the civet workspace.
//!
//! This crate provides standardised fixtures so crate test suites do not
//! each hand-roll metadata tables and data directories. It is a
//! dev-dependency only and never published.
//!
//! # Modules
//!
//! - [`fixtures`] — metadata tables from `test-fixtures/`
//! - [`workspace`] — [`TestWorkspace`](workspace::TestWorkspace) builder for a run directory

pub mod fixtures;
pub mod workspace;
