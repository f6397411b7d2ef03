// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Asynchronous access to configuration and template files.
//!
//! Reading happens in two steps so callers can tell an unreachable file apart
//! from one that exists but cannot be decoded as text.

use std::path::Path;

use tokio::{fs::File, io::AsyncReadExt};
use tracing::{debug, error};

use crate::error::{Error, access_error, read_error};

/// Opens `path` for reading and returns its whole content as UTF-8 text.
///
/// # Errors
///
/// Returns [`Error::Access`] when the file cannot be opened (missing file,
/// denied permission) and [`Error::Read`] when reading fails or the content
/// is not valid UTF-8. Both errors carry the offending path and are logged
/// before being returned.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
///
/// use tplgen::try_read_file;
///
/// # async fn example() -> Result<(), tplgen::Error> {
/// let contents = try_read_file(Path::new("templates/record.json")).await?;
/// println!("{} bytes", contents.len());
/// # Ok(())
/// # }
/// ```
pub async fn try_read_file(path: &Path) -> Result<String, Error> {
    let mut file = File::open(path).await.map_err(|source| {
        error!("cannot access {}: {source}", path.display());
        access_error(path, source)
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).await.map_err(|source| {
        error!("failed to read {}: {source}", path.display());
        read_error(path, source)
    })?;

    debug!("read {} bytes from {}", contents.len(), path.display());
    Ok(contents)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::{NamedTempFile, tempdir};

    use super::*;

    #[tokio::test]
    async fn reads_whole_file() {
        let mut file = NamedTempFile::new().expect("failed to create temp file");
        file.write_all("first line\nsecond line\n".as_bytes())
            .expect("failed to write temp file");

        let contents = try_read_file(file.path()).await.expect("read failed");
        assert_eq!(contents, "first line\nsecond line\n");
    }

    #[tokio::test]
    async fn reads_empty_file() {
        let file = NamedTempFile::new().expect("failed to create temp file");
        let contents = try_read_file(file.path()).await.expect("read failed");
        assert!(contents.is_empty());
    }

    #[tokio::test]
    async fn missing_file_is_an_access_error() {
        let dir = tempdir().expect("failed to create tempdir");
        let path = dir.path().join("missing.yaml");

        let error = try_read_file(&path).await.expect_err("expected access error");
        match error {
            Error::Access {
                path: ref stored,
                ref source
            } => {
                assert_eq!(stored, &path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected access error, got {other:?}")
        }
    }

    #[tokio::test]
    async fn invalid_utf8_is_a_read_error() {
        let mut file = NamedTempFile::new().expect("failed to create temp file");
        file.write_all(&[0xff, 0xfe, 0x00, 0x80])
            .expect("failed to write temp file");

        let error = try_read_file(file.path()).await.expect_err("expected read error");
        assert!(matches!(error, Error::Read { .. }));
        assert!(error.to_string().contains(&file.path().display().to_string()));
    }
}
