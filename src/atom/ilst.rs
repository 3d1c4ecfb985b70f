use lazy_static::lazy_static;

use super::*;

/// The name of the freeform item carrying extended movie information.
pub const ITUNES_MOVIE_INFO_NAME: &str = "iTunMOVI";

/// An empty property list, some players expect the movie information item to contain one.
pub const EMPTY_PLIST: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8"?>"#,
    "\n",
    r#"<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">"#,
    "\n",
    r#"<plist version="1.0"><dict></dict></plist>"#,
);

lazy_static! {
    /// The freeform (`----`) item leading every item list written by this crate.
    pub static ref ITUNES_MOVIE_INFO: MetaItem = MetaItem::freeform(
        APPLE_ITUNES_MEAN,
        ITUNES_MOVIE_INFO_NAME,
        Data::Utf8(EMPTY_PLIST.to_owned()),
    );
}

/// An item list atom (`ilst`).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Ilst {
    pub items: Vec<MetaItem>,
}

impl Ilst {
    /// Builds the item list for the tag. The order of the items is fixed: the movie information
    /// item, the artwork, then artist, album, title, comment and encoder.
    pub fn from_tag(tag: &TagInfo) -> Self {
        let mut items = vec![ITUNES_MOVIE_INFO.clone()];

        if let Some(artwork) = &tag.artwork {
            items.push(MetaItem::new(DataIdent::Fourcc(ARTWORK), Data::Jpeg(artwork.clone())));
        }

        let strings = [
            (ARTIST, &tag.artist),
            (ALBUM, &tag.album),
            (TITLE, &tag.title),
            (COMMENT, &tag.comment),
            (ENCODER, &tag.encoder),
        ];
        for (fourcc, value) in strings {
            if let Some(v) = value {
                items.push(MetaItem::new(DataIdent::Fourcc(fourcc), Data::Utf8(v.clone())));
            }
        }

        Self { items }
    }

    pub fn size(&self) -> Size {
        Size::from(self.items.iter().map(|a| a.len()).sum())
    }

    pub fn len(&self) -> u64 {
        self.size().len()
    }

    pub fn write(&self, writer: &mut impl Write) -> crate::Result<()> {
        write_head(writer, Head::from(self.size(), ITEM_LIST))?;
        for a in self.items.iter() {
            a.write(writer)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn fourccs(ilst: &Ilst) -> Vec<Fourcc> {
        ilst.items
            .iter()
            .map(|i| match &i.ident {
                DataIdent::Fourcc(f) => *f,
                DataIdent::Freeform { .. } => FREEFORM,
            })
            .collect()
    }

    #[test]
    fn movie_info_length() {
        assert_eq!(EMPTY_PLIST.len(), 184);
        // 8 head + 28 mean + 20 name + 200 data
        assert_eq!(ITUNES_MOVIE_INFO.len(), 256);
    }

    #[test]
    fn fixed_item_order() {
        let tag = TagInfo {
            title: Some("title".to_owned()),
            artist: Some("artist".to_owned()),
            album: Some("album".to_owned()),
            comment: Some("comment".to_owned()),
            encoder: Some("encoder".to_owned()),
            artwork: Some(vec![0xFF, 0xD8, 0xFF]),
        };
        let ilst = Ilst::from_tag(&tag);
        assert_eq!(fourccs(&ilst), [FREEFORM, ARTWORK, ARTIST, ALBUM, TITLE, COMMENT, ENCODER]);

        let mut buf = Vec::new();
        ilst.write(&mut buf).unwrap();
        assert_eq!(buf.len() as u64, ilst.len());
    }

    #[test]
    fn absent_fields_omitted() {
        let tag = TagInfo { comment: Some("c".to_owned()), ..Default::default() };
        let ilst = Ilst::from_tag(&tag);
        assert_eq!(fourccs(&ilst), [FREEFORM, COMMENT]);
    }
}
