use std::array::TryFromSliceError;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

// Top level
/// (`ftyp`) Leading atom naming the brand of the container.
pub const FILETYPE: Fourcc = Fourcc(*b"ftyp");
/// (`mdat`) The interleaved media samples, never interpreted.
pub const MEDIA_DATA: Fourcc = Fourcc(*b"mdat");
/// (`moov`) The movie atom holding track structure and metadata.
pub const MOVIE: Fourcc = Fourcc(*b"moov");
/// (`free`) Padding.
pub const FREE: Fourcc = Fourcc(*b"free");

// Movie structure
/// (`mvhd`)
pub const MOVIE_HEADER: Fourcc = Fourcc(*b"mvhd");
/// (`trak`) A single track of the movie.
pub const TRACK: Fourcc = Fourcc(*b"trak");
/// (`mdia`)
pub const MEDIA: Fourcc = Fourcc(*b"mdia");
/// (`minf`)
pub const MEDIA_INFORMATION: Fourcc = Fourcc(*b"minf");
/// (`stbl`)
pub const SAMPLE_TABLE: Fourcc = Fourcc(*b"stbl");
/// (`stco`) Table of 32 bit absolute chunk offsets.
pub const SAMPLE_TABLE_CHUNK_OFFSET: Fourcc = Fourcc(*b"stco");
/// (`co64`) Table of 64 bit absolute chunk offsets.
pub const SAMPLE_TABLE_CHUNK_OFFSET_64: Fourcc = Fourcc(*b"co64");

// Metadata hierarchy
/// (`udta`) User data, the parent of the metadata atom.
pub const USER_DATA: Fourcc = Fourcc(*b"udta");
/// (`meta`) A full atom holding the handler and the item list.
pub const METADATA: Fourcc = Fourcc(*b"meta");
/// (`hdlr`)
pub const HANDLER_REFERENCE: Fourcc = Fourcc(*b"hdlr");
/// (`ilst`) The list of metadata items.
pub const ITEM_LIST: Fourcc = Fourcc(*b"ilst");
/// (`data`) A typed value of a metadata item.
pub const DATA: Fourcc = Fourcc(*b"data");
/// (`mean`)
pub const MEAN: Fourcc = Fourcc(*b"mean");
/// (`name`)
pub const NAME: Fourcc = Fourcc(*b"name");

// Items
/// (`----`) A freeform item, identified by its mean and name children.
pub const FREEFORM: Fourcc = Fourcc(*b"----");
/// (`©alb`)
pub const ALBUM: Fourcc = Fourcc(*b"\xa9alb");
/// (`©ART`)
pub const ARTIST: Fourcc = Fourcc(*b"\xa9ART");
/// (`covr`)
pub const ARTWORK: Fourcc = Fourcc(*b"covr");
/// (`©cmt`)
pub const COMMENT: Fourcc = Fourcc(*b"\xa9cmt");
/// (`©too`)
pub const ENCODER: Fourcc = Fourcc(*b"\xa9too");
/// (`©nam`)
pub const TITLE: Fourcc = Fourcc(*b"\xa9nam");

/// A 4 byte atom identifier (four character code).
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Fourcc(pub [u8; 4]);

impl Deref for Fourcc {
    type Target = [u8; 4];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromStr for Fourcc {
    type Err = TryFromSliceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <[u8; 4]>::try_from(s.as_bytes()).map(Fourcc)
    }
}

/// Bytes are shown as latin-1 characters, so `b"\xa9ART"` reads as `©ART`.
impl fmt::Display for Fourcc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: String = self.0.iter().copied().map(char::from).collect();
        f.write_str(&s)
    }
}

impl fmt::Debug for Fourcc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fourcc({self})")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display_copyright_prefix() {
        assert_eq!(ARTIST.to_string(), "©ART");
        assert_eq!(format!("{:?}", TITLE), "Fourcc(©nam)");
    }

    #[test]
    fn from_str() {
        assert_eq!("moov".parse::<Fourcc>().unwrap(), MOVIE);
        assert!("moo".parse::<Fourcc>().is_err());
    }
}
