//! Infrastructure layer: connections, schema setup, error translation and
//! application state assembly.

pub mod db;
pub mod db_errors;
pub mod schema_guard;
pub mod state;
