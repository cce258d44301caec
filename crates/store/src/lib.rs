// noteloom-store: filesystem-backed note repository and tool dispatch.

pub mod config;
pub mod error;
pub mod fsio;
pub mod hash;
pub mod repo;
pub mod search;
pub mod tools;

pub use config::NoteloomConfig;
pub use error::NoteError;
pub use repo::NoteRepository;
