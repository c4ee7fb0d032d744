//! Plain-text resource loading.
//!
//! The profanity word list and the prompt template are shipped as text
//! files in the resource directory and read once at startup. Callers
//! decide what a missing resource means: the profanity list degrades to
//! a permissive filter, a missing prompt template fails generation
//! requests only.

use std::io;
use std::path::Path;

/// Read a named resource from the resource directory.
pub fn load_resource(dir: &Path, name: &str) -> io::Result<String> {
    let path = dir.join(name.trim());
    std::fs::read_to_string(&path).map_err(|e| {
        io::Error::new(
            e.kind(),
            format!("resource '{}' not readable: {e}", path.display()),
        )
    })
}
