//! Rebuilding and reading the movie atom (`moov`).
//!
//! ```md
//! moov
//! ├─ mvhd
//! ├─ trak
//! │  └─ mdia
//! │     └─ minf
//! │        └─ stbl
//! │           └─ stco
//! └─ udta
//!    └─ meta
//!       ├─ hdlr
//!       └─ ilst
//!          ├─ ----
//!          ├─ covr
//!          ├─ ©ART
//!          ├─ ©alb
//!          ├─ ©nam
//!          └─ ©cmt
//! ```
use super::*;

/// Rebuilds the movie atom with a new user data hierarchy for the tag.
///
/// Every existing user data atom (`udta`) is dropped and the new one is appended as the last
/// child, all other children keep their content and relative order. An extended head stays
/// extended. If the media data follows the movie atom, the chunk offsets of every track are
/// shifted by the change in length of the whole movie atom.
pub fn rewrite_moov(
    moov: &RawAtom,
    tag: &TagInfo,
    mdat_after_moov: bool,
) -> crate::Result<RawAtom> {
    let children = children(moov.content()).collect::<crate::Result<Vec<Child<'_>>>>()?;

    let mut old_meta_len = 0;
    for c in children.iter().filter(|c| c.fourcc() == USER_DATA) {
        if let Ok(Some(meta)) = find_child(c.content(), METADATA) {
            old_meta_len += meta.head.len();
        }
    }
    let retained = || children.iter().filter(|c| c.fourcc() != USER_DATA);

    let (udta, new_meta_len) = build_udta(tag)?;
    let content_len = retained().map(|c| c.bytes.len() as u64).sum::<u64>() + udta.len() as u64;
    let size = Size::with_ext(content_len, moov.head.ext());
    let delta = size.len() as i64 - moov.len() as i64;
    log::debug!(
        "replacing meta of {old_meta_len} bytes with {new_meta_len} bytes, moov changes by {delta} bytes"
    );

    let mut content = Vec::with_capacity(content_len as usize);
    for c in retained() {
        match c.fourcc() {
            TRACK if mdat_after_moov => {
                let mut trak = c.bytes.to_vec();
                stco::patch_chunk_offsets(&mut trak, delta)?;
                content.extend_from_slice(&trak);
            }
            _ => content.extend_from_slice(c.bytes),
        }
    }
    content.extend_from_slice(&udta);

    Ok(RawAtom::with_head(Head::from(size, MOVIE), &content))
}

/// Reads the tag stored in the item list of a movie atom's content.
pub fn read_moov_tag(moov_content: &[u8]) -> crate::Result<TagInfo> {
    let mut tag = TagInfo::default();

    for udta in children(moov_content) {
        let udta = udta?;
        if udta.fourcc() != USER_DATA {
            continue;
        }

        for meta in children(udta.content()) {
            let meta = meta?;
            if meta.fourcc() != METADATA {
                continue;
            }

            let mut content = meta.content();
            if content.len() < meta::HEADER_SIZE as usize {
                return Err(crate::Error::new(
                    ErrorKind::Parsing,
                    "Metadata atom (meta) is missing its version and flags",
                ));
            }
            parse_full_head(&mut content)?;

            for ilst in children(content) {
                let ilst = ilst?;
                if ilst.fourcc() == ITEM_LIST {
                    read_items(ilst.content(), &mut tag)?;
                }
            }
        }
    }

    Ok(tag)
}

fn read_items(ilst_content: &[u8], tag: &mut TagInfo) -> crate::Result<()> {
    for item in children(ilst_content) {
        let item = item?;
        let field = match item.fourcc() {
            ALBUM => &mut tag.album,
            ARTIST => &mut tag.artist,
            TITLE => &mut tag.title,
            COMMENT => &mut tag.comment,
            ENCODER => &mut tag.encoder,
            ARTWORK => {
                match item_value(&item)? {
                    Some((code, value)) if data::is_image(code) => {
                        tag.artwork = Some(value.to_vec());
                    }
                    Some((code, _)) => log::debug!("skipping artwork of type {code}"),
                    None => (),
                }
                continue;
            }
            _ => continue,
        };

        if let Some((_, value)) = item_value(&item)? {
            *field = Some(String::from_utf8_lossy(value).trim().to_owned());
        }
    }
    Ok(())
}

/// Returns the type code and value of the first data atom (`data`) of the item.
fn item_value<'a>(item: &Child<'a>) -> crate::Result<Option<(u32, &'a [u8])>> {
    match find_child(item.content(), DATA)? {
        Some(data) => Ok(Some(data::parse_content(data.content())?)),
        None => Ok(None),
    }
}
