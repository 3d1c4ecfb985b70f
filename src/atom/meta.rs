use super::*;

/// Length of the version and flags preceding the children of a metadata atom.
pub const HEADER_SIZE: u64 = 4;

/// A metadata atom (`meta`).
///
/// ```md
/// meta
/// ├─ hdlr
/// └─ ilst
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Meta {
    pub hdlr: Hdlr,
    pub ilst: Ilst,
}

impl Meta {
    pub fn from_tag(tag: &TagInfo) -> Self {
        Self { hdlr: META_HANDLER.clone(), ilst: Ilst::from_tag(tag) }
    }

    pub fn size(&self) -> Size {
        Size::from(HEADER_SIZE + self.hdlr.len() + self.ilst.len())
    }

    pub fn len(&self) -> u64 {
        self.size().len()
    }

    pub fn write(&self, writer: &mut impl Write) -> crate::Result<()> {
        write_head(writer, Head::from(self.size(), METADATA))?;
        write_full_head(writer, 0, [0; 3])?;
        self.hdlr.write(writer)?;
        self.ilst.write(writer)?;
        Ok(())
    }
}
