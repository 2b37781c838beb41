pub mod artifacts;
pub mod io;

pub use artifacts::ArtifactSet;
pub use io::{open_reader, read_book_input, read_catalog, read_tables};
