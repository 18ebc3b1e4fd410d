//! This module contains definitions for the extension and related types.
//! Extensions are optional data frames sitting before the voxel data.
//! When present, an extender frame of 4 bytes is also present at the
//! end of the NIFTI-1 header, with the first byte set to something
//! other than 0.

use crate::error::{Result, VolumeError};
use crate::header::HEADER_SIZE;
use crate::util::Endianness;
use byteordered::ByteOrdered;
use std::io::{ErrorKind as IoErrorKind, Read, Write};

/// Size of the `esize` and `ecode` fields which start every extension.
const EXTENSION_HEADER_SIZE: i32 = 8;

/// Data type for the extender code.
#[derive(Debug, Default, PartialEq, Clone, Copy)]
pub struct Extender([u8; 4]);

impl Extender {
    /// Fetch the extender code from the given source, while expecting it to exist.
    pub fn from_reader<S: Read>(mut source: S) -> Result<Self> {
        let mut extension = [0u8; 4];
        source.read_exact(&mut extension)?;
        Ok(extension.into())
    }

    /// Fetch the extender code from the given source, while
    /// being possible to not be available.
    /// Returns `None` if the source reaches EoF prematurely.
    /// Any other I/O error is delegated to a `VolumeError`.
    pub fn from_reader_optional<S: Read>(mut source: S) -> Result<Option<Self>> {
        let mut extension = [0u8; 4];
        match source.read_exact(&mut extension) {
            Ok(()) => Ok(Some(extension.into())),
            Err(ref e) if e.kind() == IoErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(VolumeError::from(e)),
        }
    }

    /// Whether extensions should exist upon this extender code.
    pub fn has_extensions(&self) -> bool {
        self.0[0] != 0
    }

    /// Get the extender's bytes
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl From<[u8; 4]> for Extender {
    fn from(extender: [u8; 4]) -> Self {
        Extender(extender)
    }
}

/// Data type for the raw contents of an extension.
/// Users of this type have to reinterpret the data
/// to suit their needs.
#[derive(Debug, PartialEq, Clone)]
pub struct Extension {
    esize: i32,
    ecode: i32,
    edata: Vec<u8>,
}

impl Extension {
    /// Create an extension with the given code and payload.
    /// The declared size is derived from the payload length.
    pub fn new(ecode: i32, edata: Vec<u8>) -> Self {
        Extension {
            esize: EXTENSION_HEADER_SIZE + edata.len() as i32,
            ecode,
            edata,
        }
    }

    /// Obtain the claimed extension raw size (`esize` field).
    pub fn size(&self) -> i32 {
        self.esize
    }

    /// Obtain the extension's code (`ecode` field).
    pub fn code(&self) -> i32 {
        self.ecode
    }

    /// Obtain the extension's data (`edata` field).
    pub fn data(&self) -> &[u8] {
        &self.edata
    }

    /// Take the extension's raw data, discarding the rest.
    pub fn into_data(self) -> Vec<u8> {
        self.edata
    }
}

/// Data type for aggregating the extender code and
/// all extensions.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct ExtensionSequence {
    extender: Extender,
    extensions: Vec<Extension>,
}

impl IntoIterator for ExtensionSequence {
    type Item = Extension;
    type IntoIter = ::std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.extensions.into_iter()
    }
}

impl<'a> IntoIterator for &'a ExtensionSequence {
    type Item = &'a Extension;
    type IntoIter = ::std::slice::Iter<'a, Extension>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl ExtensionSequence {
    /// Create a sequence of extensions, setting the extender flag
    /// whenever there is at least one extension.
    pub fn new(extensions: Vec<Extension>) -> Self {
        let flag = if extensions.is_empty() { 0 } else { 1 };
        ExtensionSequence {
            extender: Extender([flag, 0, 0, 0]),
            extensions,
        }
    }

    /// Read a sequence of extensions from a source positioned right after
    /// the extender code, stopping at `vox_offset`, the absolute file offset
    /// of the voxel data.
    ///
    /// # Errors
    ///
    /// - `BadExtensionSize` if an extension declares a size below 8 bytes.
    /// - `ExtensionOverrun` if an extension would end past `vox_offset`.
    pub fn from_reader<S: Read>(
        extender: Extender,
        source: S,
        endianness: Endianness,
        vox_offset: usize,
    ) -> Result<Self> {
        let mut source = ByteOrdered::runtime(source, endianness);
        let mut extensions = Vec::new();
        if extender.has_extensions() {
            let mut offset = HEADER_SIZE + 4;
            while offset < vox_offset {
                let esize = source.read_i32()?;
                let ecode = source.read_i32()?;
                if esize < EXTENSION_HEADER_SIZE {
                    return Err(VolumeError::BadExtensionSize(esize));
                }
                offset += esize as usize;
                if offset > vox_offset {
                    return Err(VolumeError::ExtensionOverrun(offset, vox_offset));
                }
                let mut edata = vec![0u8; (esize - EXTENSION_HEADER_SIZE) as usize];
                source.read_exact(&mut edata)?;
                extensions.push(Extension {
                    esize,
                    ecode,
                    edata,
                });
            }
        }

        Ok(ExtensionSequence {
            extender,
            extensions,
        })
    }

    /// Write the extender code followed by the extensions, which are only
    /// written when the extender flag is set.
    pub fn to_writer<W: Write>(&self, writer: W, endianness: Endianness) -> Result<()> {
        let mut writer = ByteOrdered::runtime(writer, endianness);
        writer.write_all(self.extender.as_bytes())?;
        if self.extender.has_extensions() {
            for e in &self.extensions {
                writer.write_i32(e.esize)?;
                writer.write_i32(e.ecode)?;
                writer.write_all(&e.edata)?;
            }
        }
        Ok(())
    }

    /// Number of bytes taken by the extender and every written extension.
    pub fn bytes_on_disk(&self) -> usize {
        let extensions: usize = if self.extender.has_extensions() {
            self.extensions.iter().map(|e| e.esize as usize).sum()
        } else {
            0
        };
        4 + extensions
    }

    /// Obtain an iterator to the extensions.
    pub fn iter(&self) -> ::std::slice::Iter<Extension> {
        self.extensions.iter()
    }

    /// Whether the sequence of extensions is empty.
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Obtain the number of extensions available.
    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    /// Get the extender code from this extension sequence.
    pub fn extender(&self) -> Extender {
        self.extender
    }
}
