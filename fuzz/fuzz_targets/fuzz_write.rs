#![no_main]

use libfuzzer_sys::fuzz_target;
use m4atag::{ReadConfig, TagInfo, WriteConfig};

fuzz_target!(|data: &[u8]| {
    let tag = TagInfo {
        title: Some("title".to_owned()),
        artist: Some("artist".to_owned()),
        artwork: Some(vec![0xFF, 0xD8, 0xFF, 0xE0]),
        ..Default::default()
    };
    let cfg = WriteConfig { read: ReadConfig { max_atom_size: 1 << 20 }, ..WriteConfig::DEFAULT };

    let mut output = Vec::new();
    if tag.write_to(&mut &data[..], &mut output, &cfg).is_ok() {
        let read = TagInfo::read_from(&mut std::io::Cursor::new(&output));
        assert_eq!(read.ok().as_ref(), Some(&tag));
    }
});
