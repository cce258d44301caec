// noteloom-common: I/O-free note engine shared by the store and the CLI.

pub mod diff;
pub mod frontmatter;
pub mod lines;
pub mod path;
pub mod protocol;
pub mod types;
