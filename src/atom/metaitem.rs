//! A meta item can either have a plain fourcc as it's identifier:
//! **** (any fourcc)
//! └─ data
//!
//! Or it can contain a mean and name children atom which make up the identifier.
//! ---- (freeform fourcc)
//! ├─ mean
//! ├─ name
//! └─ data
use super::*;

/// The mean (`mean`) of freeform items written by iTunes.
pub const APPLE_ITUNES_MEAN: &str = "com.apple.iTunes";

/// The identifier of a meta item.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataIdent {
    /// A standard identifier containing a 4 byte atom identifier.
    Fourcc(Fourcc),
    /// A freeform identifier containing a mean string and a name string.
    Freeform { mean: String, name: String },
}

/// A struct representing a metadata item, containing data that is associated with an identifier.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MetaItem {
    /// The identifier of the atom.
    pub ident: DataIdent,
    /// The data contained in the atom.
    pub data: Data,
}

impl MetaItem {
    /// Creates a meta item with the identifier and data.
    pub const fn new(ident: DataIdent, data: Data) -> Self {
        Self { ident, data }
    }

    pub fn freeform(mean: impl Into<String>, name: impl Into<String>, data: Data) -> Self {
        Self::new(DataIdent::Freeform { mean: mean.into(), name: name.into() }, data)
    }

    /// Returns the external length of the atom in bytes.
    pub fn len(&self) -> u64 {
        let parent_len = Head::NORMAL_SIZE;
        let data_len = self.data.len();

        match &self.ident {
            DataIdent::Fourcc(_) => parent_len + data_len,
            DataIdent::Freeform { mean, name } => {
                let mean_len = 12 + mean.len() as u64;
                let name_len = 12 + name.len() as u64;

                parent_len + mean_len + name_len + data_len
            }
        }
    }

    /// Attempts to write the meta item to the writer.
    pub fn write(&self, writer: &mut impl Write) -> crate::Result<()> {
        match &self.ident {
            DataIdent::Fourcc(fourcc) => {
                write_head(writer, Head::from(Size::from(self.len() - 8), *fourcc))?;
            }
            DataIdent::Freeform { mean, name } => {
                write_head(writer, Head::from(Size::from(self.len() - 8), FREEFORM))?;

                write_head(writer, Head::from(Size::from(4 + mean.len() as u64), MEAN))?;
                write_full_head(writer, 0, [0; 3])?;
                writer.write_utf8(mean)?;

                write_head(writer, Head::from(Size::from(4 + name.len() as u64), NAME))?;
                write_full_head(writer, 0, [0; 3])?;
                writer.write_utf8(name)?;
            }
        }

        self.data.write(writer)
    }
}
