use super::*;

/// Length of the version, flags and entry count preceding the offset table.
pub const HEADER_SIZE: u64 = 8;
pub const ENTRY_SIZE: u64 = 4;

/// The atoms leading from a track (`trak`) to its chunk offset table (`stco`).
const CHUNK_OFFSET_PATH: [Fourcc; 4] =
    [MEDIA, MEDIA_INFORMATION, SAMPLE_TABLE, SAMPLE_TABLE_CHUNK_OFFSET];

fn not_found(description: impl Into<String>) -> crate::Error {
    crate::Error::new(ErrorKind::OffsetTableNotFound, description)
}

/// Returns the absolute range of the chunk offset table (`stco`) content inside the track.
fn find_chunk_offsets(trak: &[u8]) -> crate::Result<(usize, usize)> {
    let head = parse_head(&mut &*trak)?;
    let mut start = head.head_len() as usize;
    let mut end = trak.len();

    for fourcc in CHUNK_OFFSET_PATH {
        let parent = &trak[start..end];
        let child = match find_child(parent, fourcc)? {
            Some(c) => c,
            None => {
                if fourcc == SAMPLE_TABLE_CHUNK_OFFSET
                    && find_child(parent, SAMPLE_TABLE_CHUNK_OFFSET_64)?.is_some()
                {
                    return Err(not_found("64 bit chunk offset tables (co64) aren't supported"));
                }
                return Err(not_found(format!("Track is missing a '{fourcc}' atom")));
            }
        };

        end = start + child.pos + child.bytes.len();
        start += child.content_pos();
    }

    Ok((start, end))
}

/// Shifts every entry of the track's chunk offset table (`stco`) by `delta` bytes. The offsets
/// are rewritten in place, the length of the track doesn't change.
///
/// ```md
/// 1 byte version
/// 3 bytes flags
/// 4 bytes entry count
/// 4 bytes offset (repeated)
/// ```
pub fn patch_chunk_offsets(trak: &mut [u8], delta: i64) -> crate::Result<()> {
    if delta == 0 {
        return Ok(());
    }

    let (start, end) = find_chunk_offsets(trak)?;
    let content_len = (end - start) as u64;
    let num_entries = match be_int!(trak, start + 4, u32) {
        Some(n) if content_len >= HEADER_SIZE => n as u64,
        _ => {
            return Err(crate::Error::new(
                ErrorKind::Parsing,
                "Sample table chunk offset (stco) atom is too short",
            ));
        }
    };
    if HEADER_SIZE + ENTRY_SIZE * num_entries > content_len {
        return Err(crate::Error::new(
            ErrorKind::Parsing,
            format!(
                "Sample table chunk offset (stco) table of {num_entries} entries doesn't fit into {content_len} bytes",
            ),
        ));
    }

    let table_start = start + HEADER_SIZE as usize;
    for i in 0..num_entries as usize {
        let pos = table_start + i * ENTRY_SIZE as usize;
        let offset = be_int!(trak, pos, u32).unwrap_or_default();
        let shifted = u32::try_from(offset as i64 + delta).map_err(|_| {
            crate::Error::new(
                ErrorKind::ChunkOffsetOverflow,
                format!("Chunk offset {offset} shifted by {delta} is out of range"),
            )
        })?;
        set_be_int!(trak, pos, shifted, u32);
    }

    log::debug!("shifted {num_entries} chunk offsets by {delta} bytes");
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn atom(fourcc: Fourcc, content: &[u8]) -> Vec<u8> {
        RawAtom::from_content(fourcc, content).bytes
    }

    fn stco(offsets: &[u32]) -> Vec<u8> {
        let mut content = vec![0; 4];
        content.extend_from_slice(&(offsets.len() as u32).to_be_bytes());
        for o in offsets {
            content.extend_from_slice(&o.to_be_bytes());
        }
        atom(SAMPLE_TABLE_CHUNK_OFFSET, &content)
    }

    fn trak(table: Vec<u8>) -> Vec<u8> {
        let mut stbl_content = atom(Fourcc(*b"stsz"), &[0; 12]);
        stbl_content.extend(table);
        let stbl = atom(SAMPLE_TABLE, &stbl_content);
        let minf = atom(MEDIA_INFORMATION, &stbl);
        let mut trak_content = atom(Fourcc(*b"tkhd"), &[0; 84]);
        trak_content.extend(atom(MEDIA, &minf));
        atom(TRACK, &trak_content)
    }

    fn offsets(trak: &[u8]) -> Vec<u32> {
        let (start, end) = find_chunk_offsets(trak).unwrap();
        trak[start + 8..end].chunks(4).map(|c| be_int!(c, 0, u32).unwrap()).collect()
    }

    #[test]
    fn shift_forward_and_back() {
        let mut trak = trak(stco(&[1000, 2000, 3000]));
        let len = trak.len();

        patch_chunk_offsets(&mut trak, 24).unwrap();
        assert_eq!(offsets(&trak), [1024, 2024, 3024]);
        assert_eq!(trak.len(), len);

        patch_chunk_offsets(&mut trak, -124).unwrap();
        assert_eq!(offsets(&trak), [900, 1900, 2900]);
    }

    #[test]
    fn zero_delta_is_noop() {
        let mut trak = atom(TRACK, &[]);
        let before = trak.clone();
        patch_chunk_offsets(&mut trak, 0).unwrap();
        assert_eq!(trak, before);
    }

    #[test]
    fn missing_table() {
        let mut trak = trak(Vec::new());
        let err = patch_chunk_offsets(&mut trak, 8).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::OffsetTableNotFound));
    }

    #[test]
    fn co64_unsupported() {
        let mut trak = trak(atom(SAMPLE_TABLE_CHUNK_OFFSET_64, &[0; 16]));
        let err = patch_chunk_offsets(&mut trak, 8).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::OffsetTableNotFound));
    }

    #[test]
    fn overflow() {
        let mut trak = trak(stco(&[4]));
        let err = patch_chunk_offsets(&mut trak, -8).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::ChunkOffsetOverflow));

        let mut trak = self::trak(stco(&[u32::MAX - 1]));
        let err = patch_chunk_offsets(&mut trak, 2).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::ChunkOffsetOverflow));
    }

    #[test]
    fn entry_count_exceeds_atom() {
        let mut table = stco(&[1, 2]);
        table[15] = 3;
        let mut trak = trak(table);
        let err = patch_chunk_offsets(&mut trak, 8).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Parsing));
    }
}
