//! Volumetric image processing around the NIfTI-1 file format.
//!
//! This crate reads and writes NIfTI-1 files, resolving the anatomical
//! orientation of their voxel axes so that volumes are always held in a
//! canonical voxel order. On top of these volumes it offers interpolation
//! at arbitrary world positions, neighborhood filtering and the
//! partitioning of large grids into blocks.
//!
//! # Example
//!
//! ```no_run
//! use voxkit::{interp, InterpolationType, ReaderOptions, VectFunction};
//! # fn run() -> voxkit::Result<()> {
//! let object = ReaderOptions::new().read_file("brain.nii.gz")?;
//! let volume = object.volume();
//! let f = interp(InterpolationType::Trilinear, volume);
//! let value = f.apply(&[10., -4.5, 22.]);
//! # Ok(())
//! # }
//! ```
#![deny(missing_debug_implementations)]
#![warn(missing_docs, unused_extern_crates, trivial_casts, unused_results)]

pub mod affine;
pub mod blocking;
pub mod cache;
pub mod error;
pub mod extension;
pub mod filter;
pub mod header;
pub mod interp;
pub mod object;
pub mod orientation;
pub mod permutation;
pub mod sampling;
pub mod typedef;
pub mod volume;
pub mod writer;
mod pool;
mod util;

pub use crate::blocking::VolumeBlocker;
pub use crate::cache::HeaderCache;
pub use crate::error::{Result, VolumeError};
pub use crate::extension::{Extender, Extension, ExtensionSequence};
pub use crate::filter::{SeparableFilter, VolumeFilter};
pub use crate::header::NiftiHeader;
pub use crate::interp::{interp, InterpolationType};
pub use crate::object::{NiftiObject, ReaderOptions};
pub use crate::orientation::Orientation;
pub use crate::permutation::{canonical_sampling, VoxelPermutation};
pub use crate::sampling::Sampling;
pub use crate::typedef::{NiftiType, ValueType};
pub use crate::util::Endianness;
pub use crate::volume::function::VectFunction;
pub use crate::volume::{Mask, Volume, VolumeFunction};
pub use crate::writer::WriterOptions;
