// crates/worldcities-core/src/loader/common_io.rs
use crate::error::{Result, StoreError};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

#[cfg(feature = "compact")]
use flate2::{read::GzDecoder, write::GzEncoder, Compression};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// How a snapshot is written to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMode {
    Gzip,
    None,
}

impl Default for CompressionMode {
    fn default() -> Self {
        #[cfg(feature = "compact")]
        {
            CompressionMode::Gzip
        }
        #[cfg(not(feature = "compact"))]
        {
            CompressionMode::None
        }
    }
}

/// Reads a whole file, transparently un-gzipping it when it starts with the
/// gzip magic bytes.
pub(crate) fn read_payload(path: &Path) -> Result<Vec<u8>> {
    let file = File::open(path).map_err(|e| {
        StoreError::Io(std::io::Error::new(
            e.kind(),
            format!("cannot open {}: {e}", path.display()),
        ))
    })?;
    let mut raw = Vec::new();
    BufReader::new(file).read_to_end(&mut raw)?;

    if !raw.starts_with(&GZIP_MAGIC) {
        return Ok(raw);
    }

    #[cfg(feature = "compact")]
    {
        let mut out = Vec::new();
        GzDecoder::new(raw.as_slice()).read_to_end(&mut out)?;
        Ok(out)
    }
    #[cfg(not(feature = "compact"))]
    {
        Err(StoreError::InvalidData(
            "snapshot is gzip-compressed but 'compact' is disabled".into(),
        ))
    }
}

/// Writes a file through a sibling temp file that replaces `path` only
/// once `encode` succeeded and the data (gzip trailer included) is on disk.
/// A failed save leaves the previous file untouched.
pub(crate) fn write_atomic<F>(path: &Path, compression: CompressionMode, encode: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut writer = BufWriter::new(NamedTempFile::new_in(dir)?);

    match compression {
        CompressionMode::Gzip => {
            #[cfg(feature = "compact")]
            {
                let mut gz = GzEncoder::new(&mut writer, Compression::default());
                encode(&mut gz)?;
                gz.finish()?;
            }
            #[cfg(not(feature = "compact"))]
            {
                let _ = encode;
                return Err(StoreError::InvalidData(
                    "gzip requested but 'compact' is disabled".into(),
                ));
            }
        }
        CompressionMode::None => encode(&mut writer)?,
    }

    let tmp = writer.into_inner().map_err(|e| e.into_error())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
