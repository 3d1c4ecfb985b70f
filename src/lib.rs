//! A library for stamping iTunes style metadata into MPEG-4 audio files.
//!
//! The movie atom (`moov`) is rebuilt with a new metadata hierarchy while every other top-level
//! atom, including the media data (`mdat`), is copied byte for byte. Chunk offsets are corrected
//! when the media data follows the movie atom.
//!
//! # Examples
//!
//! ## The easy way
//! ```no_run
//! m4atag::update_tag(false, "music.m4a", "title", "artist", "album", "comment", "cover.jpg")
//!     .unwrap();
//!
//! let tag = m4atag::read_tag("music.m4a").unwrap();
//! println!("{}", tag.artist.unwrap());
//! ```
//!
//! ## The configurable way
//! ```no_run
//! use m4atag::{ReadConfig, ReplaceMode, TagInfo, WriteConfig};
//!
//! let read = ReadConfig { max_atom_size: 10_000_000 };
//! let mut tag = TagInfo::read_with_path("music.m4a", &read).unwrap();
//!
//! tag.encoder = Some("encoder".to_owned());
//!
//! let cfg = WriteConfig { read, replace: ReplaceMode::Overwrite };
//! tag.write_with_path("music.m4a", &cfg).unwrap();
//! ```
#![warn(missing_docs)]

use std::path::Path;

pub use crate::atom::ident::{self, Fourcc};
pub use crate::config::{
    ReadConfig, ReplaceMode, WriteConfig, BACKUP_SUFFIX, DEFAULT_MAX_ATOM_SIZE,
};
pub use crate::error::{Error, ErrorKind, Result};
pub use crate::tag::{read_cover_bytes, TagInfo};

mod atom;
mod config;
mod error;
mod tag;

/// Attempts to write the title, artist, album, comment and cover to the file at the indicated
/// path.
///
/// All four text items are written, even when empty. The cover is read from `cover_path`, an
/// empty or missing cover path writes the tag without artwork. If `overwrite` is false the
/// original file is kept with [`BACKUP_SUFFIX`] appended to its name.
pub fn update_tag(
    overwrite: bool,
    path: impl AsRef<Path>,
    title: &str,
    artist: &str,
    album: &str,
    comment: &str,
    cover_path: impl AsRef<Path>,
) -> Result<()> {
    let tag = TagInfo {
        title: Some(title.to_owned()),
        artist: Some(artist.to_owned()),
        album: Some(album.to_owned()),
        comment: Some(comment.to_owned()),
        encoder: None,
        artwork: read_cover_bytes(cover_path)?,
    };

    let cfg = match overwrite {
        true => WriteConfig::OVERWRITE,
        false => WriteConfig::DEFAULT,
    };
    tag.write_with_path(path, &cfg)
}

/// Attempts to read the title, artist, album and comment from the file at the indicated path.
pub fn read_tag(path: impl AsRef<Path>) -> Result<TagInfo> {
    TagInfo::read_from_path(path)
}
