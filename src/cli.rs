//! CLI domain: parse, route and output only.
//! Conversion itself lives in [`crate::convert`].

mod output;
mod parse;
mod route;

pub use output::map_error;
pub use parse::Cli;
pub use route::RunContext;
