use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Seek, Write};
use std::path::{Path, PathBuf};

use crate::{atom, ErrorKind, ReadConfig, ReplaceMode, WriteConfig, BACKUP_SUFFIX};

/// The metadata stored in the item list of a MPEG-4 container.
///
/// Every field that is `Some` is written, absent fields are omitted. Reading fills in every
/// field whose item is present.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagInfo {
    /// The title (`©nam`).
    pub title: Option<String>,
    /// The artist (`©ART`).
    pub artist: Option<String>,
    /// The album (`©alb`).
    pub album: Option<String>,
    /// The comment (`©cmt`).
    pub comment: Option<String>,
    /// The encoder (`©too`).
    pub encoder: Option<String>,
    /// The artwork (`covr`), as JPEG encoded bytes.
    pub artwork: Option<Vec<u8>>,
}

impl TagInfo {
    /// Attempts to read a MPEG-4 audio tag from the reader.
    pub fn read_from(reader: &mut (impl Read + Seek)) -> crate::Result<Self> {
        Self::read_with(reader, &ReadConfig::DEFAULT)
    }

    /// Attempts to read a MPEG-4 audio tag from the reader, using the configured limits.
    ///
    /// Only the movie atom (`moov`) is loaded into memory, all other top-level atoms are skipped.
    pub fn read_with(reader: &mut (impl Read + Seek), cfg: &ReadConfig) -> crate::Result<Self> {
        atom::read_tag(reader, cfg)
    }

    /// Attempts to read a MPEG-4 audio tag from the file at the indicated path.
    pub fn read_from_path(path: impl AsRef<Path>) -> crate::Result<Self> {
        Self::read_with_path(path, &ReadConfig::DEFAULT)
    }

    /// Attempts to read a MPEG-4 audio tag from the file at the indicated path, using the
    /// configured limits.
    pub fn read_with_path(path: impl AsRef<Path>, cfg: &ReadConfig) -> crate::Result<Self> {
        let mut file = BufReader::new(File::open(path)?);
        Self::read_with(&mut file, cfg)
    }

    /// Attempts to copy the container from the reader to the writer, replacing its metadata with
    /// this tag.
    pub fn write_to(
        &self,
        reader: &mut impl Read,
        writer: &mut impl Write,
        cfg: &WriteConfig,
    ) -> crate::Result<()> {
        atom::write_tag(reader, writer, self, cfg)
    }

    /// Attempts to write the MPEG-4 audio tag to the file at the indicated path, keeping a backup
    /// of the original file.
    pub fn write_to_path(&self, path: impl AsRef<Path>) -> crate::Result<()> {
        self.write_with_path(path, &WriteConfig::DEFAULT)
    }

    /// Attempts to write the MPEG-4 audio tag to the file at the indicated path.
    ///
    /// The new container is written to a temporary file next to the original, which is then
    /// moved into place. Depending on [`WriteConfig::replace`] the original file is either
    /// replaced or renamed by appending [`BACKUP_SUFFIX`]. The original file is left untouched if
    /// an error occurs before that.
    pub fn write_with_path(&self, path: impl AsRef<Path>, cfg: &WriteConfig) -> crate::Result<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        let file = File::open(path)?;
        let permissions = file.metadata()?.permissions();
        let mut reader = BufReader::new(file);

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        self.write_to(&mut reader, &mut BufWriter::new(tmp.as_file_mut()), cfg)?;
        tmp.as_file().set_permissions(permissions)?;
        drop(reader);

        if cfg.replace == ReplaceMode::Backup {
            let backup = backup_path(path);
            fs::rename(path, &backup)?;
            log::debug!("moved original file to {}", backup.display());
        }
        tmp.persist(path).map_err(|e| {
            crate::Error::new(
                ErrorKind::Io(e.error),
                format!("Error moving rewritten file to {}", path.display()),
            )
        })?;

        Ok(())
    }
}

/// Returns the path the original file is moved to in [`ReplaceMode::Backup`].
fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Attempts to read the cover image at the indicated path.
///
/// An empty path means no cover. A file that doesn't exist is logged and treated the same way,
/// any other error is returned.
pub fn read_cover_bytes(path: impl AsRef<Path>) -> crate::Result<Option<Vec<u8>>> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Ok(None);
    }

    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("cover file {} not found, writing tag without artwork", path.display());
            Ok(None)
        }
        Err(e) => Err(crate::Error::new(
            ErrorKind::Io(e),
            format!("Error reading cover file {}", path.display()),
        )),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn backup_suffix() {
        assert_eq!(backup_path(Path::new("dir/song.m4a")), Path::new("dir/song.m4a.old"));
    }

    #[test]
    fn cover_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let cover = dir.path().join("cover.jpg");
        fs::write(&cover, b"\xff\xd8\xff\xe0").unwrap();

        assert_eq!(read_cover_bytes(&cover).unwrap(), Some(b"\xff\xd8\xff\xe0".to_vec()));
        assert_eq!(read_cover_bytes("").unwrap(), None);
        assert_eq!(read_cover_bytes(dir.path().join("missing.jpg")).unwrap(), None);
    }

    #[test]
    fn cover_is_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_cover_bytes(dir.path()).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Io(_)));
    }
}
