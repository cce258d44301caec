pub mod normalize;
pub mod sandbox;
pub mod title;

pub use normalize::{normalize_identifier, note_file_name, strip_note_extension, PathError};
pub use sandbox::{resolve, PathSandbox};
pub use title::identifier_from_title;
