use lazy_static::lazy_static;

use super::*;

lazy_static! {
    /// The handler reference atom (`hdlr`) marking a metadata atom as an Apple item list.
    pub static ref META_HANDLER: Hdlr = Hdlr::meta();
}

/// A handler reference atom (`hdlr`).
///
/// ```md
/// 4 bytes version and flags
/// 4 bytes predefined
/// 8 bytes handler subtype and manufacturer (`mdirappl`)
/// 9 bytes reserved and empty name
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Hdlr(pub Vec<u8>);

impl Deref for Hdlr {
    type Target = Vec<u8>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Hdlr {
    fn meta() -> Self {
        let mut content = vec![0u8; 8];
        content.extend_from_slice(b"mdirappl");
        content.extend_from_slice(&[0u8; 9]);
        Self(content)
    }

    pub fn size(&self) -> Size {
        Size::from(self.0.len() as u64)
    }

    pub fn len(&self) -> u64 {
        self.size().len()
    }

    pub fn write(&self, writer: &mut impl Write) -> crate::Result<()> {
        write_head(writer, Head::from(self.size(), HANDLER_REFERENCE))?;
        writer.write_all(self)?;
        Ok(())
    }
}
