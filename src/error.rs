//! Types for error handling go here.

use crate::typedef::NiftiType;
use quick_error::quick_error;
use std::io::Error as IOError;

quick_error! {
    /// Error type for all error variants originated by this crate.
    #[derive(Debug)]
    pub enum VolumeError {
        /// An invalid NIfTI-1 file (bad magic code or header size).
        InvalidFormat {
            display("Invalid NIfTI-1 file")
        }
        /// A field in the header has an unrecognized code.
        InvalidCode(typename: &'static str, code: i16) {
            display("invalid code `{}` for header field {}", code, typename)
        }
        /// The voxel data type is not supported by this codec.
        UnsupportedDataType(t: NiftiType) {
            display("unsupported data type: {:?}", t)
        }
        /// An extension record claims to extend past the start of the voxel data.
        ExtensionOverrun(offset: usize, vox_offset: usize) {
            display("extension ends at byte {}, beyond vox_offset {}", offset, vox_offset)
        }
        /// An extension record declares a size too small to hold its own header.
        BadExtensionSize(esize: i32) {
            display("invalid extension size {}", esize)
        }
        /// Orientation code could not be resolved into three distinct anatomical axes.
        InvalidOrientation(code: String) {
            display("invalid orientation string: {}", code)
        }
        /// The voxel-to-world transform cannot be orthonormalized.
        DegenerateTransform {
            display("invalid nifti transform")
        }
        /// Description length must be lower than or equal to 80 bytes
        IncorrectDescriptionLength(len: usize) {
            display("description length ({} bytes) is greater than 80 bytes", len)
        }
        /// An invalid dimension was found in the header.
        InconsistentDim(index: u8, value: u16) {
            display("invalid dimension value {} at index {}", value, index)
        }
        /// The header refers to a volume file which could not be opened.
        MissingVolumeFile(err: IOError) {
            source(err)
            display("volume file not found: {}", err)
        }
        /// The source only contains the header.
        NoVolumeData {
            display("no volume data available")
        }
        /// Two grids which must match do not.
        IncompatibleSampling {
            display("sampling mismatch")
        }
        /// Index outside of the valid range.
        OutOfBounds(index: usize, count: usize) {
            display("index {} out of bounds (count {})", index, count)
        }
        /// The grid description is invalid.
        InvalidSampling(reason: String) {
            display("invalid sampling: {}", reason)
        }
        /// A function was given voxels with the wrong number of channels.
        ChannelMismatch(expected: usize, actual: usize) {
            display("channel mismatch: expected {} channels, got {}", expected, actual)
        }
        /// The filter kernel is invalid.
        InvalidKernel(reason: String) {
            display("invalid kernel: {}", reason)
        }
        /// The worker pool could not be created.
        ThreadPool(reason: String) {
            display("failed to execute in concurrent mode: {}", reason)
        }
        /// I/O Error
        Io(err: IOError) {
            from()
            source(err)
            display("I/O Error: {}", err)
        }
    }
}

/// Alias type for results originated from this crate.
pub type Result<T> = ::std::result::Result<T, VolumeError>;
