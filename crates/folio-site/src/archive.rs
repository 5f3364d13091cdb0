//! Zip packaging for the download bundle.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::renderer::RenderError;

/// File name the packaged site is offered under.
pub const ARCHIVE_NAME: &str = "portfolio.zip";

/// Errors that can occur while packaging or writing the site.
#[derive(Debug, thiserror::Error)]
pub enum PackagingError {
    #[error("No preview to package")]
    MissingPreview,

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Failed to write archive entry {name}: {message}")]
    Entry { name: String, message: String },

    #[error("Failed to finish archive: {0}")]
    Finish(String),

    #[error("Failed to write output: {0}")]
    Write(String),
}

/// Pack `(name, contents)` pairs into an in-memory zip archive, in order.
pub fn pack<'a, I>(files: I) -> Result<Vec<u8>, PackagingError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644);

    for (name, contents) in files {
        let entry_error = |e: &dyn std::fmt::Display| PackagingError::Entry {
            name: name.to_string(),
            message: e.to_string(),
        };

        zip.start_file(name, options).map_err(|e| entry_error(&e))?;
        zip.write_all(contents.as_bytes())
            .map_err(|e| entry_error(&e))?;
    }

    let cursor = zip
        .finish()
        .map_err(|e| PackagingError::Finish(e.to_string()))?;

    Ok(cursor.into_inner())
}
