//! Module for handling and retrieving complete NIFTI-1 objects.
//!
//! Reading a file produces a `NiftiObject`: the header, the extensions,
//! the voxel data resampled into canonical voxel order, and the
//! permutation from the voxel order of the file to the canonical one.

use crate::cache::HeaderCache;
use crate::error::{Result, VolumeError};
use crate::extension::{Extender, ExtensionSequence};
use crate::header::{NiftiHeader, HEADER_SIZE, MAGIC_CODE_NI1};
use crate::permutation::{canonical_sampling, VoxelPermutation};
use crate::typedef::{NiftiType, ValueType};
use crate::util::{into_img_file_gz, open_file, raw_to_value, sanitize};
use crate::volume::{Mask, Volume};
use approx::{abs_diff_eq, abs_diff_ne};
use log::{debug, info};
use std::io::{self, Read};
use std::path::Path;

/// Options and flags which can be used to configure how a NIfTI file is read.
///
/// # Example
///
/// ```no_run
/// use voxkit::ReaderOptions;
/// # fn run() -> voxkit::Result<()> {
/// let object = ReaderOptions::new().scale(false).read_file("raw.nii.gz")?;
/// println!("{} channels", object.volume().channels());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ReaderOptions {
    scale: bool,
    mask: bool,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        ReaderOptions {
            scale: true,
            mask: false,
        }
    }
}

impl ReaderOptions {
    /// Options applying intensity scaling, for a regular volume.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether to apply `scl_slope` and `scl_inter` to the stored values.
    pub fn scale(mut self, scale: bool) -> Self {
        self.scale = scale;
        self
    }

    /// Whether the file holds a mask. This only distinguishes the
    /// entries of a header cache.
    pub fn mask(mut self, mask: bool) -> Self {
        self.mask = mask;
        self
    }

    /// Retrieve the full contents of a NIFTI object.
    /// The given file system path is used as reference.
    /// If the file only contains the header, this method will
    /// look for the corresponding file with the extension ".img",
    /// or ".img.gz" if the former wasn't found.
    pub fn read_file<P: AsRef<Path>>(&self, path: P) -> Result<NiftiObject> {
        let path = path.as_ref();
        debug!("reading NIfTI file {}", path.display());
        let mut stream = open_file(path)?;
        let header = NiftiHeader::from_reader(&mut stream)?;
        if &header.magic == MAGIC_CODE_NI1 {
            let extensions = read_trailing_extensions(&mut stream, &header)?;
            let img_path = find_img_file(path)?;
            debug!("reading voxel data from {}", img_path.display());
            let img = open_file(&img_path)?;
            self.read_data(header, extensions, img, 0)
        } else {
            self.read_stream_body(header, stream)
        }
    }

    /// Retrieve a NIFTI object as separate header and volume files.
    /// This method is useful when file names are not conventional for a
    /// NIFTI file pair.
    pub fn read_file_pair<P, Q>(&self, hdr_path: P, vol_path: Q) -> Result<NiftiObject>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let mut stream = open_file(hdr_path)?;
        let header = NiftiHeader::from_reader(&mut stream)?;
        let extensions = read_trailing_extensions(&mut stream, &header)?;
        let img = open_file(vol_path).map_err(|e| match e {
            VolumeError::Io(io_e) => VolumeError::MissingVolumeFile(io_e),
            e => e,
        })?;
        self.read_data(header, extensions, img, 0)
    }

    /// Retrieve a NIFTI object from a stream of data.
    ///
    /// # Errors
    ///
    /// - `NoVolumeData` if the source only contains (or claims to contain)
    /// a header.
    pub fn read_reader<R: Read>(&self, mut source: R) -> Result<NiftiObject> {
        let header = NiftiHeader::from_reader(&mut source)?;
        if &header.magic == MAGIC_CODE_NI1 {
            return Err(VolumeError::NoVolumeData);
        }
        self.read_stream_body(header, source)
    }

    /// Read a file and remember its header and permutation in `cache`, so
    /// that volumes on the same grid are written back the same way.
    pub fn read_file_cached<P: AsRef<Path>>(
        &self,
        path: P,
        cache: &mut HeaderCache,
    ) -> Result<NiftiObject> {
        let object = self.read_file(path)?;
        cache.insert(
            object.volume.sampling(),
            object.volume.channels(),
            self.mask,
            object.header.clone(),
            object.permutation,
        );
        Ok(object)
    }

    /// Read the extensions and voxel data following the header of a `.nii` stream.
    fn read_stream_body<R: Read>(&self, header: NiftiHeader, mut source: R) -> Result<NiftiObject> {
        let vox_offset = header.vox_offset.max(0.) as usize;
        let extender = Extender::from_reader_optional(&mut source)?.unwrap_or_default();
        let extensions = ExtensionSequence::from_reader(extender, &mut source, header.endianness, vox_offset)?;
        let consumed = HEADER_SIZE + 4 + extensions.iter().map(|e| e.size() as usize).sum::<usize>();
        self.read_data(header, extensions, source, vox_offset.saturating_sub(consumed))
    }

    /// Skip `skip` bytes of `source`, then decode the voxel data.
    fn read_data<R: Read>(
        &self,
        header: NiftiHeader,
        extensions: ExtensionSequence,
        mut source: R,
        skip: usize,
    ) -> Result<NiftiObject> {
        let skipped = io::copy(&mut (&mut source).take(skip as u64), &mut io::sink())?;
        if skipped < skip as u64 {
            return Err(VolumeError::NoVolumeData);
        }

        let (sampling, permutation) = canonical_sampling(&header)?;
        let mut volume = Volume::new(sampling, header.channels());
        volume.set_value_type(value_type_of(&header)?);
        decode_voxels(&mut source, &header, &permutation, self.scale, &mut volume)?;

        Ok(NiftiObject {
            header,
            extensions,
            volume,
            permutation,
        })
    }
}

/// Read the optional extender and extensions stored after the header of a `.hdr` file.
fn read_trailing_extensions<R: Read>(stream: &mut R, header: &NiftiHeader) -> Result<ExtensionSequence> {
    let extender = Extender::from_reader_optional(&mut *stream)?.unwrap_or_default();
    if !extender.has_extensions() {
        return Ok(ExtensionSequence::default());
    }
    let mut rest = Vec::new();
    let _ = stream.read_to_end(&mut rest)?;
    let end = HEADER_SIZE + 4 + rest.len();
    ExtensionSequence::from_reader(extender, &rest[..], header.endianness, end)
}

/// Locate the volume file of a header file, preferring ".img.gz" over ".img".
fn find_img_file(path: &Path) -> Result<std::path::PathBuf> {
    let gz = into_img_file_gz(path.to_path_buf());
    if gz.is_file() {
        return Ok(gz);
    }
    let mut plain = gz;
    let _ = plain.set_extension("");
    if plain.is_file() {
        Ok(plain)
    } else {
        Err(VolumeError::MissingVolumeFile(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{}", plain.display()),
        )))
    }
}

/// The in-memory value type of a file, promoted to double precision when
/// intensity scaling is present.
fn value_type_of(header: &NiftiHeader) -> Result<ValueType> {
    let datatype = header.data_type()?;
    let slope = f64::from(header.scl_slope);
    let inter = f64::from(header.scl_inter);
    let unit_or_zero = abs_diff_eq!(slope, 1.) || abs_diff_eq!(slope, 0.);
    if !unit_or_zero || abs_diff_ne!(inter, 0.) {
        info!("promoting datatype to double due to detected intensity scaling");
        Ok(ValueType::Double)
    } else {
        Ok(ValueType::from_nifti(datatype))
    }
}

/// Decode the voxel data of a file into a canonical volume.
///
/// Values are stored channel by channel, each channel with `i` varying
/// fastest. RGB24 data interleaves the three channels of every voxel.
fn decode_voxels<R: Read>(
    source: &mut R,
    header: &NiftiHeader,
    permutation: &VoxelPermutation,
    scale: bool,
    volume: &mut Volume,
) -> Result<()> {
    let datatype = header.data_type()?;
    let codec = datatype.codec()?;
    let [ni, nj, nk] = header.grid_counts()?;
    let endianness = header.endianness;
    let rgb = datatype == NiftiType::Rgb24;
    let slope = f64::from(header.scl_slope);
    let inter = f64::from(header.scl_inter);

    // interleaved channels are decoded in a single pass
    let passes = if rgb { 1 } else { volume.channels() };
    let mut row = vec![0u8; ni * codec.width];
    let mut values = vec![0.; codec.packed];

    for pass in 0..passes {
        for k in 0..nk {
            for j in 0..nj {
                source.read_exact(&mut row)?;
                for i in 0..ni {
                    let bytes = &row[i * codec.width..(i + 1) * codec.width];
                    codec.decode(bytes, endianness, &mut values)?;
                    let [ci, cj, ck] = permutation.apply([i, j, k]);
                    for (c, &raw) in values.iter().enumerate() {
                        let v = if scale && !rgb {
                            raw_to_value(raw, slope, inter)
                        } else {
                            raw
                        };
                        volume.set(ci, cj, ck, pass + c, sanitize(v));
                    }
                }
            }
        }
    }
    Ok(())
}

/// Data type for a NIFTI object that is fully contained in memory, with
/// its voxels in canonical order.
#[derive(Debug, PartialEq, Clone)]
pub struct NiftiObject {
    header: NiftiHeader,
    extensions: ExtensionSequence,
    volume: Volume,
    permutation: VoxelPermutation,
}

impl NiftiObject {
    /// Read a file with the default options.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use voxkit::NiftiObject;
    /// # use voxkit::Result;
    ///
    /// # fn run() -> Result<()> {
    /// let obj = NiftiObject::from_file("minimal.nii.gz")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<NiftiObject> {
        ReaderOptions::new().read_file(path)
    }

    /// Obtain a reference to the NIFTI header.
    pub fn header(&self) -> &NiftiHeader {
        &self.header
    }

    /// Obtain a mutable reference to the NIFTI header.
    pub fn header_mut(&mut self) -> &mut NiftiHeader {
        &mut self.header
    }

    /// Obtain a reference to the object's extensions.
    pub fn extensions(&self) -> &ExtensionSequence {
        &self.extensions
    }

    /// Obtain a reference to the object's volume.
    pub fn volume(&self) -> &Volume {
        &self.volume
    }

    /// The mapping from file voxels to canonical voxels.
    pub fn permutation(&self) -> VoxelPermutation {
        self.permutation
    }

    /// Move the volume out of the object, discarding the
    /// header and extensions.
    pub fn into_volume(self) -> Volume {
        self.volume
    }

    /// Interpret the first channel of the volume as mask labels.
    pub fn into_mask(self) -> Mask {
        Mask::from_volume(&self.volume)
    }

    /// Split the object into its header, permutation and volume.
    pub fn into_parts(self) -> (NiftiHeader, VoxelPermutation, Volume) {
        (self.header, self.permutation, self.volume)
    }
}
