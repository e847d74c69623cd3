//! Writing the matrix out: the CSV table and the optional route files.

mod artifact;
mod table;

pub use artifact::{ArtifactDownloader, ArtifactError};
pub use table::{HEADER, MISSING, MatrixWriter, OutputError};
