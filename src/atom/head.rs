use super::*;

/// A struct storing size of an atom and whether it is extended.
///
/// ```md
/// 4 bytes standard length
/// 4 bytes identifier
/// 8 bytes optional extended length
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Size {
    /// Whether the head is of standard size (8 bytes) with a 32 bit length or extended (16 bytes)
    /// with a 64 bit length.
    ext: bool,
    /// The length including this head.
    len: u64,
}

impl Size {
    pub const fn from(content_len: u64) -> Self {
        let mut len = content_len + Head::NORMAL_SIZE;
        let ext = len > u32::MAX as u64;
        if ext {
            len += 8;
        }
        Self { ext, len }
    }

    /// Like [`Size::from`], but keeps an extended head even if the length fits into 32 bits.
    pub const fn with_ext(content_len: u64, ext: bool) -> Self {
        let size = Self::from(content_len);
        match ext && !size.ext {
            true => Self { ext: true, len: size.len + 8 },
            false => size,
        }
    }

    pub const fn ext(&self) -> bool {
        self.ext
    }

    pub const fn len(&self) -> u64 {
        self.len
    }

    pub const fn head_len(&self) -> u64 {
        match self.ext {
            true => Head::EXTENDED_SIZE,
            false => Head::NORMAL_SIZE,
        }
    }

    pub const fn content_len(&self) -> u64 {
        self.len - self.head_len()
    }
}

/// A head specifying the size and type of an atom.
///
/// ```md
/// 4 bytes standard length
/// 4 bytes identifier
/// 8 bytes optional extended length
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Head {
    size: Size,
    /// The identifier.
    fourcc: Fourcc,
}

impl Deref for Head {
    type Target = Size;

    fn deref(&self) -> &Self::Target {
        &self.size
    }
}

impl Head {
    pub const NORMAL_SIZE: u64 = 8;
    pub const EXTENDED_SIZE: u64 = 16;

    pub const fn new(ext: bool, len: u64, fourcc: Fourcc) -> Self {
        Self { size: Size { ext, len }, fourcc }
    }

    pub const fn from(size: Size, fourcc: Fourcc) -> Self {
        Self { size, fourcc }
    }

    pub const fn fourcc(&self) -> Fourcc {
        self.fourcc
    }
}

fn truncated(what: &str) -> crate::Error {
    crate::Error::new(ErrorKind::TruncatedInput, format!("Stream ended while reading {what}"))
}

/// Attempts to parse the next atom head from the reader. Returns `None` if the reader is already
/// at the end of the stream, the end of a stream inside the head is a
/// [`ErrorKind::TruncatedInput`] error.
pub fn try_parse_head(reader: &mut impl Read) -> crate::Result<Option<Head>> {
    let mut buf = [0u8; 8];
    match reader.read_up_to(&mut buf)? {
        0 => Ok(None),
        8 => finish_head(reader, buf).map(Some),
        _ => Err(truncated("atom head")),
    }
}

/// Completes a head whose first 8 bytes have already been read. If the 32 bit length is set to 1
/// an extended 64 bit length is read.
pub fn finish_head(reader: &mut impl Read, buf: [u8; 8]) -> crate::Result<Head> {
    let len = be_int!(buf, 0, u32).unwrap_or_default() as u64;
    let fourcc = Fourcc([buf[4], buf[5], buf[6], buf[7]]);

    if len == 1 {
        let mut ext_buf = [0u8; 8];
        if reader.read_up_to(&mut ext_buf)? != 8 {
            return Err(truncated("extended atom length"));
        }
        let len = u64::from_be_bytes(ext_buf);
        if len < Head::EXTENDED_SIZE {
            return Err(crate::Error::new(
                ErrorKind::Parsing,
                format!("Read extended length of '{fourcc}' which is less than 16 bytes: {len}"),
            ));
        }
        Ok(Head::new(true, len, fourcc))
    } else if len < Head::NORMAL_SIZE {
        Err(crate::Error::new(
            ErrorKind::Parsing,
            format!("Read length of '{fourcc}' which is less than 8 bytes: {len}"),
        ))
    } else {
        Ok(Head::new(false, len, fourcc))
    }
}

/// Attempts to parse an atom head from the reader, the end of the stream is a
/// [`ErrorKind::TruncatedInput`] error.
pub fn parse_head(reader: &mut impl Read) -> crate::Result<Head> {
    try_parse_head(reader)?.ok_or_else(|| truncated("atom head"))
}

pub fn write_head(writer: &mut impl Write, head: Head) -> crate::Result<()> {
    if head.ext() {
        writer.write_be_u32(1)?;
        writer.write_all(&*head.fourcc)?;
        writer.write_be_u64(head.len())?;
    } else {
        writer.write_be_u32(head.len() as u32)?;
        writer.write_all(&*head.fourcc)?;
    }
    Ok(())
}

/// Returns the serialized head.
pub fn head_bytes(head: Head) -> Vec<u8> {
    let mut buf = Vec::with_capacity(head.head_len() as usize);
    if head.ext() {
        buf.extend_from_slice(&1u32.to_be_bytes());
        buf.extend_from_slice(&*head.fourcc);
        buf.extend_from_slice(&head.len().to_be_bytes());
    } else {
        buf.extend_from_slice(&(head.len() as u32).to_be_bytes());
        buf.extend_from_slice(&*head.fourcc);
    }
    buf
}

/// Checks the atom's content length against the configured ceiling.
pub fn check_size(head: Head, cfg: &ReadConfig) -> crate::Result<()> {
    let len = head.content_len();
    if len > cfg.max_atom_size {
        return Err(crate::Error::new(
            ErrorKind::OversizedBox { len, max: cfg.max_atom_size },
            format!("Refusing to read '{}' atom", head.fourcc()),
        ));
    }
    Ok(())
}

/// Attempts to read the content of the atom following the `head` from the reader.
pub fn read_body(reader: &mut impl Read, head: Head, cfg: &ReadConfig) -> crate::Result<Vec<u8>> {
    check_size(head, cfg)?;

    let mut buf = vec![0; head.content_len() as usize];
    if reader.read_up_to(&mut buf)? != buf.len() {
        return Err(truncated(&format!("'{}' atom", head.fourcc())));
    }
    Ok(buf)
}

/// Attempts to parse a full atom head.
///
/// ```md
/// 1 byte version
/// 3 bytes flags
/// ```
pub fn parse_full_head(reader: &mut impl Read) -> crate::Result<(u8, [u8; 3])> {
    let version = match reader.read_u8() {
        Ok(v) => v,
        Err(e) => {
            return Err(crate::Error::new(
                ErrorKind::Io(e),
                "Error reading version of full atom head",
            ));
        }
    };

    let mut flags = [0u8; 3];
    if let Err(e) = reader.read_exact(&mut flags) {
        return Err(crate::Error::new(ErrorKind::Io(e), "Error reading flags of full atom head"));
    };

    Ok((version, flags))
}

pub fn write_full_head(writer: &mut impl Write, version: u8, flags: [u8; 3]) -> crate::Result<()> {
    writer.write_all(&[version])?;
    writer.write_all(&flags)?;
    Ok(())
}
