//! Splitting a container into atoms without interpreting their content.
//!
//! ```md
//! ftyp
//! moov
//! ├─ mvhd
//! ├─ trak
//! └─ udta
//! free
//! mdat
//! ```
use super::*;

/// An atom captured verbatim, including its head.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RawAtom {
    pub head: Head,
    pub bytes: Vec<u8>,
}

impl RawAtom {
    /// Creates an atom from its content, computing the head.
    pub fn from_content(fourcc: Fourcc, content: &[u8]) -> Self {
        Self::with_head(Head::from(Size::from(content.len() as u64), fourcc), content)
    }

    /// Creates an atom from a head whose content length matches the content.
    pub fn with_head(head: Head, content: &[u8]) -> Self {
        debug_assert_eq!(head.content_len(), content.len() as u64);
        let mut bytes = head_bytes(head);
        bytes.extend_from_slice(content);
        Self { head, bytes }
    }

    pub const fn fourcc(&self) -> Fourcc {
        self.head.fourcc()
    }

    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn content(&self) -> &[u8] {
        &self.bytes[self.head.head_len() as usize..]
    }
}

/// Attempts to read the content of the atom following `head` and returns it together with the
/// head bytes.
fn read_atom(reader: &mut impl Read, head: Head, cfg: &ReadConfig) -> crate::Result<RawAtom> {
    let content = read_body(reader, head, cfg)?;
    let mut bytes = head_bytes(head);
    bytes.extend_from_slice(&content);
    Ok(RawAtom { head, bytes })
}

/// Attempts to parse the head of the leading filetype (`ftyp`) atom. The identifier is checked
/// before the length, so anything that isn't a MPEG-4 container is reported as
/// [`ErrorKind::UnsupportedFormat`].
fn parse_filetype_head(reader: &mut impl Read) -> crate::Result<Head> {
    let mut buf = [0u8; 8];
    let read = reader.read_up_to(&mut buf)?;
    if read < buf.len() {
        return Err(crate::Error::new(
            ErrorKind::UnsupportedFormat,
            format!("Stream of {read} bytes is too short to start with a filetype (ftyp) atom"),
        ));
    }

    let fourcc = Fourcc([buf[4], buf[5], buf[6], buf[7]]);
    if fourcc != FILETYPE {
        return Err(crate::Error::new(
            ErrorKind::UnsupportedFormat,
            format!("Expected filetype (ftyp) atom, found '{fourcc}'"),
        ));
    }
    finish_head(reader, buf)
}

/// Attempts to split the stream into its top-level atoms, until the stream is exhausted. The
/// first atom has to be a filetype (`ftyp`) atom.
pub fn split_atoms(reader: &mut impl Read, cfg: &ReadConfig) -> crate::Result<Vec<RawAtom>> {
    let ftyp = parse_filetype_head(reader)?;
    let mut atoms = vec![read_atom(reader, ftyp, cfg)?];

    while let Some(head) = try_parse_head(reader)? {
        log::trace!("top-level atom '{}' ({} bytes)", head.fourcc(), head.len());
        atoms.push(read_atom(reader, head, cfg)?);
    }

    log::debug!("split container into {} top-level atoms", atoms.len());
    Ok(atoms)
}

/// Attempts to find the first top-level atom matching the `fourcc` and reads it into memory. All
/// other atoms are skipped without reading their content, but are still checked against the
/// configured ceiling.
pub fn find_atom(
    reader: &mut (impl Read + Seek),
    cfg: &ReadConfig,
    fourcc: Fourcc,
) -> crate::Result<Option<RawAtom>> {
    let mut next = Some(parse_filetype_head(reader)?);

    while let Some(head) = next {
        log::trace!("top-level atom '{}' ({} bytes)", head.fourcc(), head.len());
        if head.fourcc() == fourcc {
            return Ok(Some(read_atom(reader, head, cfg)?));
        }

        check_size(head, cfg)?;
        if reader.remaining_len()? < head.content_len() {
            return Err(crate::Error::new(
                ErrorKind::TruncatedInput,
                format!("Stream ended inside '{}' atom", head.fourcc()),
            ));
        }
        reader.skip(head.content_len() as i64)?;

        next = try_parse_head(reader)?;
    }

    Ok(None)
}

/// A child atom inside of an in-memory atom content.
#[derive(Clone, Copy, Debug)]
pub struct Child<'a> {
    pub head: Head,
    /// The offset of the child's head inside the parent content.
    pub pos: usize,
    /// The whole child including the head.
    pub bytes: &'a [u8],
}

impl<'a> Child<'a> {
    pub const fn fourcc(&self) -> Fourcc {
        self.head.fourcc()
    }

    pub fn content(&self) -> &'a [u8] {
        &self.bytes[self.head.head_len() as usize..]
    }

    /// The offset of the child's content inside the parent content.
    pub fn content_pos(&self) -> usize {
        self.pos + self.head.head_len() as usize
    }
}

/// An iterator over the children of an in-memory atom content. Yields an error and stops if a
/// child doesn't fit into the remaining content.
pub struct Children<'a> {
    data: &'a [u8],
    pos: usize,
}

pub fn children(data: &[u8]) -> Children<'_> {
    Children { data, pos: 0 }
}

impl<'a> Iterator for Children<'a> {
    type Item = crate::Result<Child<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        let remaining = &self.data[self.pos..];
        // a zeroed remainder shorter than a head terminates the list
        if remaining.len() < Head::NORMAL_SIZE as usize && remaining.iter().all(|b| *b == 0) {
            self.pos = self.data.len();
            return None;
        }

        let head = match try_parse_head(&mut &*remaining) {
            Ok(Some(h)) => h,
            Ok(None) => return None,
            Err(e) => {
                self.pos = self.data.len();
                let kind = match e.kind {
                    ErrorKind::TruncatedInput => ErrorKind::Parsing,
                    k => k,
                };
                return Some(Err(crate::Error::new(kind, e.description)));
            }
        };

        if head.len() > remaining.len() as u64 {
            self.pos = self.data.len();
            return Some(Err(crate::Error::new(
                ErrorKind::Parsing,
                format!(
                    "'{}' atom declares {} bytes but only {} remain in its parent",
                    head.fourcc(),
                    head.len(),
                    remaining.len()
                ),
            )));
        }

        let len = head.len() as usize;
        let child = Child { head, pos: self.pos, bytes: &remaining[..len] };
        self.pos += len;
        Some(Ok(child))
    }
}

/// Returns the first child matching the `fourcc`.
pub fn find_child(data: &[u8], fourcc: Fourcc) -> crate::Result<Option<Child<'_>>> {
    for c in children(data) {
        let c = c?;
        if c.fourcc() == fourcc {
            return Ok(Some(c));
        }
    }
    Ok(None)
}
