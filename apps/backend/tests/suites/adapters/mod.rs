mod conflicts;
mod schema;
