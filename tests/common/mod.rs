//! Builders for synthetic containers and helpers to inspect the rewritten ones.
#![allow(dead_code)]

use m4atag::TagInfo;

pub fn atom(fourcc: &[u8; 4], content: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(content.len() + 8);
    buf.extend_from_slice(&(content.len() as u32 + 8).to_be_bytes());
    buf.extend_from_slice(fourcc);
    buf.extend_from_slice(content);
    buf
}

/// An atom using the 16 byte head with a 64 bit length.
pub fn atom_ext(fourcc: &[u8; 4], content: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(content.len() + 16);
    buf.extend_from_slice(&1u32.to_be_bytes());
    buf.extend_from_slice(fourcc);
    buf.extend_from_slice(&(content.len() as u64 + 16).to_be_bytes());
    buf.extend_from_slice(content);
    buf
}

/// A 32 byte filetype atom.
pub fn ftyp() -> Vec<u8> {
    atom(b"ftyp", b"M4A \x00\x00\x02\x00M4A mp42isom\x00\x00\x00\x00")
}

pub fn mvhd() -> Vec<u8> {
    atom(b"mvhd", &[0; 100])
}

pub fn mdat(payload: &[u8]) -> Vec<u8> {
    atom(b"mdat", payload)
}

pub fn stco(offsets: &[u32]) -> Vec<u8> {
    let mut content = vec![0; 4];
    content.extend_from_slice(&(offsets.len() as u32).to_be_bytes());
    for o in offsets {
        content.extend_from_slice(&o.to_be_bytes());
    }
    atom(b"stco", &content)
}

pub fn co64(offsets: &[u64]) -> Vec<u8> {
    let mut content = vec![0; 4];
    content.extend_from_slice(&(offsets.len() as u32).to_be_bytes());
    for o in offsets {
        content.extend_from_slice(&o.to_be_bytes());
    }
    atom(b"co64", &content)
}

/// A track whose sample table contains the offset table and whose track header has `tkhd_len`
/// bytes of content.
pub fn trak_with(table: &[u8], tkhd_len: usize) -> Vec<u8> {
    let stbl = atom(b"stbl", &[atom(b"stsz", &[0; 12]), table.to_vec()].concat());
    let mdia = atom(b"mdia", &atom(b"minf", &stbl));
    atom(b"trak", &[atom(b"tkhd", &vec![0; tkhd_len]), mdia].concat())
}

pub fn trak(offsets: &[u32]) -> Vec<u8> {
    trak_with(&stco(offsets), 84)
}

pub fn moov(children: &[Vec<u8>]) -> Vec<u8> {
    atom(b"moov", &children.concat())
}

pub fn tag() -> TagInfo {
    TagInfo {
        title: Some("Shape of You".to_owned()),
        artist: Some("Ed Sheeran".to_owned()),
        album: Some("÷ (Deluxe)".to_owned()),
        comment: Some("lossless rip".to_owned()),
        encoder: None,
        artwork: Some(vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F']),
    }
}

/// Returns the first child with the fourcc of an atom content, including its head.
pub fn child<'a>(content: &'a [u8], fourcc: &[u8; 4]) -> Option<&'a [u8]> {
    children(content).into_iter().find(|c| &c[4..8] == fourcc)
}

/// Returns all children of an atom content, including their heads.
pub fn children(mut content: &[u8]) -> Vec<&[u8]> {
    let mut children = Vec::new();
    while content.len() >= 8 {
        let len = match u32::from_be_bytes([content[0], content[1], content[2], content[3]]) {
            1 => u64::from_be_bytes(content[8..16].try_into().unwrap()) as usize,
            len => len as usize,
        };
        let (c, rest) = content.split_at(len);
        children.push(c);
        content = rest;
    }
    children
}

pub fn head_len(atom: &[u8]) -> usize {
    match atom[..4] == [0, 0, 0, 1] {
        true => 16,
        false => 8,
    }
}

/// Returns the content of an atom, without its head.
pub fn content(atom: &[u8]) -> &[u8] {
    &atom[head_len(atom)..]
}

/// Follows the path of fourccs starting at a container and returns the atom at its end.
pub fn descend<'a>(mut data: &'a [u8], path: &[&[u8; 4]]) -> &'a [u8] {
    for (i, fourcc) in path.iter().enumerate() {
        let parent = if i == 0 { data } else { content(data) };
        data = child(parent, fourcc).unwrap_or_else(|| panic!("missing {:?}", fourcc));
    }
    data
}

/// Returns the chunk offsets of every track in the movie atom of the container.
pub fn chunk_offsets(file: &[u8]) -> Vec<Vec<u32>> {
    let moov = descend(file, &[b"moov"]);
    children(content(moov))
        .into_iter()
        .filter(|c| &c[4..8] == b"trak")
        .map(|trak| {
            let stco = descend(trak, &[b"trak", b"mdia", b"minf", b"stbl", b"stco"]);
            content(stco)[8..]
                .chunks(4)
                .map(|c| u32::from_be_bytes([c[0], c[1], c[2], c[3]]))
                .collect()
        })
        .collect()
}

/// Returns the position of the media data atom's content inside the container.
pub fn mdat_content_pos(file: &[u8]) -> usize {
    let mut pos = 0;
    for c in children(file) {
        if &c[4..8] == b"mdat" {
            return pos + head_len(c);
        }
        pos += c.len();
    }
    panic!("missing mdat");
}
