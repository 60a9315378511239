//! Finding and loading `.proto` sources on disk.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::errors::PbError;
use crate::syntax::parser::{parse_complete, ParseResult};

pub const DEFAULT_EXTENSION: &str = "proto";

/// Expands `roots` into the files to parse.
///
/// A root that names a file is taken as is. Directories are walked
/// recursively and contribute every file ending in `.{extension}`. The list is
/// sorted so runs are deterministic.
pub fn discover_proto_files<P: AsRef<Path>>(
    roots: &[P],
    extension: &str,
) -> Result<Vec<PathBuf>, PbError> {
    let mut files = Vec::new();
    for root in roots {
        let root = root.as_ref();
        if root.is_file() {
            files.push(root.to_path_buf());
            continue;
        }
        for entry in WalkDir::new(root) {
            let entry = entry.map_err(|source| PbError::Walk {
                path: root.to_path_buf(),
                source,
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if !has_extension(path, extension) {
                continue;
            }

            files.push(path.to_path_buf());
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

pub fn read_source(path: &Path) -> Result<String, PbError> {
    std::fs::read_to_string(path).map_err(|source| PbError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads and parses one file. Trailing input that is not a statement is an
/// error, and diagnostics name the file.
pub fn parse_file(path: &Path) -> Result<ParseResult, PbError> {
    let source = read_source(path)?;
    Ok(parse_complete(&path.display().to_string(), &source)?)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == extension)
}
