/// The largest atom content, in bytes, that will be read into memory by default.
pub const DEFAULT_MAX_ATOM_SIZE: u64 = 100_000_000;

/// Configure what happens when reading atoms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadConfig {
    /// Atoms whose declared content length exceeds this value are treated as corrupt and
    /// rejected with [`ErrorKind::OversizedBox`](crate::ErrorKind::OversizedBox) before any
    /// memory is allocated for them.
    pub max_atom_size: u64,
}

impl ReadConfig {
    /// The default read configuration.
    pub const DEFAULT: Self = Self { max_atom_size: DEFAULT_MAX_ATOM_SIZE };
}

impl Default for ReadConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// How the original file is dealt with once the rewritten container is complete.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplaceMode {
    /// Replace the original file.
    Overwrite,
    /// Keep the original file next to the new one, with [`BACKUP_SUFFIX`] appended to its name.
    Backup,
}

/// Suffix appended to the original file name in [`ReplaceMode::Backup`].
pub const BACKUP_SUFFIX: &str = ".old";

/// Configure what happens when writing a tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WriteConfig {
    /// Limits applied while reading the source container.
    pub read: ReadConfig,
    /// What to do with the original file when writing to a path.
    pub replace: ReplaceMode,
}

impl WriteConfig {
    /// The default write configuration, keeping a backup of the original file.
    pub const DEFAULT: Self = Self { read: ReadConfig::DEFAULT, replace: ReplaceMode::Backup };

    /// A write configuration that replaces the original file.
    pub const OVERWRITE: Self = Self { read: ReadConfig::DEFAULT, replace: ReplaceMode::Overwrite };
}

impl Default for WriteConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
