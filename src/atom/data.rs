use std::fmt;

use super::*;

/// UTF-8 without any count or NULL terminator.
pub const UTF8: u32 = 1;
/// JPEG cover art, using the type code written by the tools this crate stays compatible with.
pub const JPEG: u32 = 0xD0;

/// JPEG in the well-known type table.
pub const STD_JPEG: u32 = 13;
/// PNG in the well-known type table.
pub const STD_PNG: u32 = 14;

/// Whether the type code denotes an image.
pub const fn is_image(code: u32) -> bool {
    matches!(code, JPEG | STD_JPEG | STD_PNG)
}

/// Length of the type indicator and the reserved locale field preceding the value.
pub const HEADER_SIZE: u64 = 8;

/// The value of a data atom (`data`).
///
/// ```md
/// 4 bytes type indicator
/// 4 bytes reserved (zero)
/// n bytes value
/// ```
#[derive(Clone, Eq, PartialEq)]
pub enum Data {
    /// A value containing a `String` to be encoded to utf-8.
    Utf8(String),
    /// A value containing jpeg byte data inside a `Vec<u8>`.
    Jpeg(Vec<u8>),
}

impl fmt::Debug for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utf8(d) => write!(f, "Data::Utf8({d:?})"),
            Self::Jpeg(d) => write!(f, "Data::Jpeg({} bytes)", d.len()),
        }
    }
}

impl Data {
    pub const fn type_code(&self) -> u32 {
        match self {
            Self::Utf8(_) => UTF8,
            Self::Jpeg(_) => JPEG,
        }
    }

    fn bytes(&self) -> &[u8] {
        match self {
            Self::Utf8(s) => s.as_bytes(),
            Self::Jpeg(v) => v,
        }
    }

    pub fn size(&self) -> Size {
        Size::from(HEADER_SIZE + self.bytes().len() as u64)
    }

    pub fn len(&self) -> u64 {
        self.size().len()
    }

    pub fn write(&self, writer: &mut impl Write) -> crate::Result<()> {
        write_head(writer, Head::from(self.size(), DATA))?;
        writer.write_be_u32(self.type_code())?;
        // reserved locale indicator
        writer.write_all(&[0; 4])?;
        writer.write_all(self.bytes())?;
        Ok(())
    }
}

/// Returns the type code and value of a data atom's content.
pub fn parse_content(content: &[u8]) -> crate::Result<(u32, &[u8])> {
    match be_int!(content, 0, u32) {
        Some(code) if content.len() as u64 >= HEADER_SIZE => {
            Ok((code, &content[HEADER_SIZE as usize..]))
        }
        _ => Err(crate::Error::new(
            ErrorKind::Parsing,
            format!("Data atom (data) content of {} bytes is too short", content.len()),
        )),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn text_layout() {
        let mut buf = Vec::new();
        Data::Utf8("abc".to_owned()).write(&mut buf).unwrap();
        assert_eq!(buf, b"\x00\x00\x00\x13data\x00\x00\x00\x01\x00\x00\x00\x00abc");
    }

    #[test]
    fn jpeg_layout() {
        let mut buf = Vec::new();
        let data = Data::Jpeg(vec![0xFF, 0xD8]);
        data.write(&mut buf).unwrap();
        assert_eq!(data.len(), buf.len() as u64);
        assert_eq!(&buf[8..12], &[0, 0, 0, 0xD0]);
        assert_eq!(&buf[16..], &[0xFF, 0xD8]);
    }

    #[test]
    fn short_content() {
        let err = parse_content(&[0, 0, 0, 1, 0]).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Parsing));

        let (code, value) = parse_content(b"\x00\x00\x00\x01\x00\x00\x00\x00hi").unwrap();
        assert_eq!(code, UTF8);
        assert_eq!(value, b"hi");
    }
}
