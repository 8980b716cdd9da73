pub mod sql;

pub use sql::{contains_pattern, escape_like_pattern};
