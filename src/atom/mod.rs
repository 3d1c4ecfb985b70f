use std::io::{Read, Seek, Write};
use std::ops::Deref;

use crate::{ErrorKind, ReadConfig, TagInfo, WriteConfig};

pub use ident::*;

use data::Data;
use hdlr::{Hdlr, META_HANDLER};
use head::*;
use ilst::Ilst;
use meta::Meta;
use metaitem::{DataIdent, MetaItem, APPLE_ITUNES_MEAN};
use split::{children, find_child, Child, RawAtom};
use udta::build_udta;
use util::*;

#[macro_use]
mod util;

/// A module for working with identifiers.
pub mod ident;

mod data;
mod hdlr;
mod head;
mod ilst;
mod meta;
mod metaitem;
mod moov;
mod split;
mod stco;
mod udta;

/// Attempts to read the tag from the movie atom (`moov`) of the reader.
pub(crate) fn read_tag(reader: &mut (impl Read + Seek), cfg: &ReadConfig) -> crate::Result<TagInfo> {
    let moov = split::find_atom(reader, cfg, MOVIE)?.ok_or_else(|| {
        crate::Error::new(ErrorKind::Parsing, "No movie (moov) atom found")
    })?;

    moov::read_moov_tag(moov.content())
}

/// Attempts to copy the container from the reader to the writer, replacing the metadata inside
/// the movie atom (`moov`). All other top-level atoms are written unchanged, in their original
/// order.
pub(crate) fn write_tag(
    reader: &mut impl Read,
    writer: &mut impl Write,
    tag: &TagInfo,
    cfg: &WriteConfig,
) -> crate::Result<()> {
    let atoms = split::split_atoms(reader, &cfg.read)?;

    let moov_idx = atoms.iter().position(|a| a.fourcc() == MOVIE).ok_or_else(|| {
        crate::Error::new(ErrorKind::Parsing, "No movie (moov) atom found")
    })?;
    let mdat_after_moov = !atoms[..moov_idx].iter().any(|a| a.fourcc() == MEDIA_DATA);
    let moov = moov::rewrite_moov(&atoms[moov_idx], tag, mdat_after_moov)?;
    log::debug!(
        "rewrote moov from {} to {} bytes, media data {} moov",
        atoms[moov_idx].len(),
        moov.len(),
        if mdat_after_moov { "after" } else { "before" },
    );

    for (i, a) in atoms.iter().enumerate() {
        if i == moov_idx {
            writer.write_all(&moov.bytes)?;
        } else {
            writer.write_all(&a.bytes)?;
        }
    }
    writer.flush()?;

    Ok(())
}
