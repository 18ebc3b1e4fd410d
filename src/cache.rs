//! Memo of the headers of previously read files.
//!
//! Writing a volume derived from one that was read from disk should keep
//! the original header, voxel order included. A `HeaderCache` remembers
//! the header and permutation of every file read through it, keyed by the
//! canonical grid, channel count and mask flag, so that a later write of a
//! volume with the same key can reuse them.

use crate::header::NiftiHeader;
use crate::permutation::VoxelPermutation;
use crate::sampling::Sampling;
use log::debug;
use std::collections::VecDeque;

/// Number of headers kept by a default cache.
pub const DEFAULT_CAPACITY: usize = 16;

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    sampling: Sampling,
    channels: usize,
    mask: bool,
    header: NiftiHeader,
    permutation: VoxelPermutation,
}

impl Entry {
    fn matches(&self, sampling: &Sampling, channels: usize, mask: bool) -> bool {
        self.channels == channels && self.mask == mask && self.sampling == *sampling
    }
}

/// A bounded cache of (header, permutation) pairs, evicting the oldest
/// entry first.
///
/// # Example
///
/// ```no_run
/// use voxkit::{HeaderCache, ReaderOptions, WriterOptions};
/// # fn run() -> voxkit::Result<()> {
/// let mut cache = HeaderCache::default();
/// let object = ReaderOptions::new().read_file_cached("input.nii.gz", &mut cache)?;
/// let volume = object.into_volume();
/// // written in the voxel order and with the header of input.nii.gz
/// WriterOptions::new("output.nii.gz").write_volume_cached(&volume, &mut cache)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCache {
    capacity: usize,
    entries: VecDeque<Entry>,
}

impl Default for HeaderCache {
    fn default() -> Self {
        HeaderCache::new(DEFAULT_CAPACITY)
    }
}

impl HeaderCache {
    /// Create an empty cache holding up to `capacity` headers.
    pub fn new(capacity: usize) -> Self {
        HeaderCache {
            capacity,
            entries: VecDeque::new(),
        }
    }

    /// Remember the header and permutation of a volume. An entry with the
    /// same key is replaced.
    pub fn insert(
        &mut self,
        sampling: &Sampling,
        channels: usize,
        mask: bool,
        header: NiftiHeader,
        permutation: VoxelPermutation,
    ) {
        if self.capacity == 0 {
            return;
        }
        self.entries.retain(|e| !e.matches(sampling, channels, mask));
        while self.entries.len() >= self.capacity {
            let _ = self.entries.pop_front();
        }
        self.entries.push_back(Entry {
            sampling: sampling.clone(),
            channels,
            mask,
            header,
            permutation,
        });
    }

    /// Look up the header and permutation remembered for a volume.
    pub fn get(
        &self,
        sampling: &Sampling,
        channels: usize,
        mask: bool,
    ) -> Option<(&NiftiHeader, VoxelPermutation)> {
        let found = self
            .entries
            .iter()
            .rev()
            .find(|e| e.matches(sampling, channels, mask))
            .map(|e| (&e.header, e.permutation));
        if found.is_some() {
            debug!("header cache hit for {:?} grid", sampling.counts());
        }
        found
    }

    /// Number of cached headers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget every cached header.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
