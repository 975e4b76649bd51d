//! Query resolution and the metadata query engine
//!
//! Turns the user's query request into one query CSV on disk:
//!
//! - [`input`] classifies the positional argument (IDs, CSV or config file)
//! - [`filter`] parses `column=value` metadata filters into predicates
//! - [`matcher`] selects the metadata rows satisfying every predicate
//! - [`materialize`] writes selected rows or an ID list as a query file
//! - [`resolve`] picks the query source and records the result in the config

pub mod filter;
pub mod input;
pub mod matcher;
pub mod materialize;
pub mod resolve;

pub use filter::{Matcher, Predicate, parse_filters};
pub use input::QueryInput;
pub use matcher::select_rows;
pub use materialize::{
    FILTERED_QUERY_FILE, ID_PREVIEW_LIMIT, ID_QUERY_FILE, MaterializedQuery, write_filtered_query,
    write_id_query,
};
pub use resolve::{QueryOrigin, resolve_fasta, resolve_query};
