use super::*;

/// A user data atom (`udta`).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Udta {
    pub meta: Meta,
}

impl Udta {
    pub fn from_tag(tag: &TagInfo) -> Self {
        Self { meta: Meta::from_tag(tag) }
    }

    pub fn size(&self) -> Size {
        Size::from(self.meta.len())
    }

    pub fn len(&self) -> u64 {
        self.size().len()
    }

    pub fn write(&self, writer: &mut impl Write) -> crate::Result<()> {
        write_head(writer, Head::from(self.size(), USER_DATA))?;
        self.meta.write(writer)
    }
}

/// Builds the user data hierarchy for the tag. Returns the serialized user data atom and the
/// length of the metadata atom it contains.
pub fn build_udta(tag: &TagInfo) -> crate::Result<(Vec<u8>, u64)> {
    let udta = Udta::from_tag(tag);
    let mut buf = Vec::with_capacity(udta.len() as usize);
    udta.write(&mut buf)?;

    debug_assert_eq!(buf.len() as u64, udta.len());
    Ok((buf, udta.meta.len()))
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    fn tag() -> TagInfo {
        TagInfo {
            title: Some("Shape of You".to_owned()),
            artist: Some("Ed Sheeran".to_owned()),
            album: Some("Shape Of You".to_owned()),
            comment: Some("x".to_owned()),
            ..Default::default()
        }
    }

    #[test]
    fn nested_lengths() {
        let (udta, meta_len) = build_udta(&tag()).unwrap();

        assert_eq!(be_int!(udta, 0, u32), Some(udta.len() as u32));
        assert_eq!(&udta[4..8], b"udta");
        assert_eq!(be_int!(udta, 8, u32), Some(meta_len as u32));
        assert_eq!(&udta[12..16], b"meta");
        assert_eq!(&udta[16..20], &[0; 4]);
        assert_eq!(&udta[24..28], b"hdlr");
        assert_eq!(meta_len + 8, udta.len() as u64);

        let ilst_pos = 16 + 4 + 33;
        let ilst_len = be_int!(udta, ilst_pos, u32).unwrap() as u64;
        assert_eq!(&udta[ilst_pos + 4..ilst_pos + 8], b"ilst");
        assert_eq!(ilst_len, meta_len - 8 - 4 - 33);
        // movie info + 4 text items
        let text_len: u64 = [10, 12, 12, 1].iter().map(|l| 24 + l).sum();
        assert_eq!(ilst_len, 8 + 256 + text_len);
    }

    #[test]
    fn deterministic() {
        let mut tag = tag();
        tag.artwork = Some(vec![0xFF, 0xD8, 0xFF, 0xE0]);
        assert_eq!(build_udta(&tag).unwrap(), build_udta(&tag).unwrap());
    }
}
