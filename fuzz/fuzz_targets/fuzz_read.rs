#![no_main]

use libfuzzer_sys::fuzz_target;
use m4atag::{ReadConfig, TagInfo};

fuzz_target!(|data: &[u8]| {
    let mut reader = std::io::Cursor::new(data);
    let cfg = ReadConfig { max_atom_size: 1 << 20 };
    _ = TagInfo::read_with(&mut reader, &cfg);
});
