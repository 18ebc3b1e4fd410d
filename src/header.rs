//! This module defines the `NiftiHeader` struct, which is used
//! to provide important information about NIFTI-1 volumes.

use crate::affine::{from_affine_and_translation, get_affine_and_translation, qform_to_affine};
use crate::error::{Result, VolumeError};
use crate::orientation::Orientation;
use crate::typedef::*;
use crate::util::{open_file, Endianness};
use byteordered::ByteOrdered;
use nalgebra::{Matrix3, Matrix4, Vector3};
use num_traits::FromPrimitive;
use std::io::{Read, Write};
use std::ops::Deref;
use std::path::Path;

/// Magic code for NIFTI-1 header files (extention ".hdr[.gz]").
pub const MAGIC_CODE_NI1: &[u8; 4] = b"ni1\0";
/// Magic code for full NIFTI-1 files (extention ".nii[.gz]").
pub const MAGIC_CODE_NIP1: &[u8; 4] = b"n+1\0";

/// Size of the fixed header, in bytes.
pub const HEADER_SIZE: usize = 348;

/// Byte offset of `dim[0]`, used to probe the byte order.
const DIM0_OFFSET: usize = 40;

/// The NIFTI-1 header data type.
/// All fields are public and named after the fields of the NIfTI-1 header.
/// The type of each field was adjusted according to their use and
/// array limitations.
///
/// # Examples
///
/// ```no_run
/// use voxkit::NiftiHeader;
/// # use voxkit::Result;
///
/// # fn run() -> Result<()> {
/// let hdr1 = NiftiHeader::from_file("0000.hdr")?;
/// let hdr2 = NiftiHeader::from_file("0001.hdr.gz")?;
/// let hdr3 = NiftiHeader::from_file("4321.nii.gz")?;
/// # Ok(())
/// # }
/// ```
///
/// Or to build one yourself:
///
/// ```
/// use voxkit::NiftiHeader;
///
/// let hdr = NiftiHeader {
///     cal_min: 0.,
///     cal_max: 128.,
///     ..Default::default()
/// };
/// assert_eq!(hdr.cal_min, 0.);
/// assert_eq!(hdr.cal_max, 128.);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NiftiHeader {
    /// Header size, must be 348
    pub sizeof_hdr: i32,
    /// Unused in NIFTI-1
    pub data_type: [u8; 10],
    /// Unused in NIFTI-1
    pub db_name: [u8; 18],
    /// Unused in NIFTI-1
    pub extents: i32,
    /// Unused in NIFTI-1
    pub session_error: i16,
    /// Unused in NIFTI-1
    pub regular: u8,
    /// MRI slice ordering
    pub dim_info: u8,
    /// Data array dimensions
    pub dim: [u16; 8],
    /// 1st intent parameter
    pub intent_p1: f32,
    /// 2nd intent parameter
    pub intent_p2: f32,
    /// 3rd intent parameter
    pub intent_p3: f32,
    /// NIFTI_INTENT_* code
    pub intent_code: i16,
    /// Defines the data type!
    pub datatype: i16,
    /// Number of bits per voxel
    pub bitpix: i16,
    /// First slice index
    pub slice_start: i16,
    /// Grid spacings
    pub pixdim: [f32; 8],
    /// Offset into .nii file to reach the volume
    pub vox_offset: f32,
    /// Data scaling: slope
    pub scl_slope: f32,
    /// Data scaling: offset
    pub scl_inter: f32,
    /// Last slice index
    pub slice_end: i16,
    /// Slice timing order
    pub slice_code: u8,
    /// Units of pixdim[1..4]
    pub xyzt_units: u8,
    /// Max display intensity
    pub cal_max: f32,
    /// Min display intensity
    pub cal_min: f32,
    /// Time for 1 slice
    pub slice_duration: f32,
    /// Time axis shift
    pub toffset: f32,
    /// Unused in NIFTI-1
    pub glmax: i32,
    /// Unused in NIFTI-1
    pub glmin: i32,

    /// Any text you like
    pub descrip: Vec<u8>,
    /// Auxiliary filename
    pub aux_file: [u8; 24],
    /// NIFTI_XFORM_* code
    pub qform_code: i16,
    /// NIFTI_XFORM_* code
    pub sform_code: i16,
    /// Quaternion b param
    pub quatern_b: f32,
    /// Quaternion c param
    pub quatern_c: f32,
    /// Quaternion d param
    pub quatern_d: f32,
    /// Quaternion x shift
    pub quatern_x: f32,
    /// Quaternion y shift
    pub quatern_y: f32,
    /// Quaternion z shift
    pub quatern_z: f32,

    /// 1st row affine transform
    pub srow_x: [f32; 4],
    /// 2nd row affine transform
    pub srow_y: [f32; 4],
    /// 3rd row affine transform
    pub srow_z: [f32; 4],

    /// 'name' or meaning of data
    pub intent_name: [u8; 16],

    /// Magic code. Must be `b"ni1\0"` or `b"n+1\0"`
    pub magic: [u8; 4],

    /// Byte order of the file the header was read from, also used when writing
    pub endianness: Endianness,
}

impl Default for NiftiHeader {
    fn default() -> NiftiHeader {
        NiftiHeader {
            sizeof_hdr: HEADER_SIZE as i32,
            data_type: [0; 10],
            db_name: [0; 18],
            extents: 0,
            session_error: 0,
            regular: 0,
            dim_info: 0,
            dim: [3, 1, 1, 1, 0, 1, 1, 1],
            intent_p1: 0.,
            intent_p2: 0.,
            intent_p3: 0.,
            intent_code: 0,
            datatype: NiftiType::Float32 as i16,
            bitpix: 32,
            slice_start: 0,
            pixdim: [1.; 8],
            vox_offset: 352.,
            scl_slope: 0.,
            scl_inter: 0.,
            slice_end: 0,
            slice_code: 0,
            xyzt_units: 0,
            cal_max: 0.,
            cal_min: 0.,
            slice_duration: 0.,
            toffset: 0.,
            glmax: 0,
            glmin: 0,

            descrip: vec![0; 80],
            aux_file: [0; 24],
            qform_code: 0,
            sform_code: 0,
            quatern_b: 0.,
            quatern_c: 0.,
            quatern_d: 0.,
            quatern_x: 0.,
            quatern_y: 0.,
            quatern_z: 0.,

            srow_x: [0.; 4],
            srow_y: [0.; 4],
            srow_z: [0.; 4],

            intent_name: [0; 16],

            magic: *MAGIC_CODE_NIP1,

            endianness: Endianness::Little,
        }
    }
}

impl NiftiHeader {
    /// Retrieve a NIFTI header, along with its byte order, from a file in the file system.
    /// If the file's name ends with ".gz", the file is assumed to need GZip decoding.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<NiftiHeader> {
        NiftiHeader::from_reader(open_file(path)?)
    }

    /// Read a NIfTI-1 header, along with its byte order, from the given byte stream.
    /// It is assumed that the input is currently at the start of the
    /// NIFTI header. Exactly 348 bytes are consumed.
    pub fn from_reader<S: Read>(mut input: S) -> Result<NiftiHeader> {
        let mut buf = [0u8; HEADER_SIZE];
        input.read_exact(&mut buf)?;
        parse_header(&buf)
    }

    /// Write the 348 bytes of this header to `writer`, in the byte order
    /// given by the `endianness` field. The extender is not included.
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
        let mut w = ByteOrdered::runtime(writer, self.endianness);

        w.write_i32(self.sizeof_hdr)?;
        w.write_all(&self.data_type)?;
        w.write_all(&self.db_name)?;
        w.write_i32(self.extents)?;
        w.write_i16(self.session_error)?;
        w.write_u8(self.regular)?;
        w.write_u8(self.dim_info)?;
        for s in &self.dim {
            w.write_u16(*s)?;
        }
        w.write_f32(self.intent_p1)?;
        w.write_f32(self.intent_p2)?;
        w.write_f32(self.intent_p3)?;
        w.write_i16(self.intent_code)?;
        w.write_i16(self.datatype)?;
        w.write_i16(self.bitpix)?;
        w.write_i16(self.slice_start)?;
        for f in &self.pixdim {
            w.write_f32(*f)?;
        }
        w.write_f32(self.vox_offset)?;
        w.write_f32(self.scl_slope)?;
        w.write_f32(self.scl_inter)?;
        w.write_i16(self.slice_end)?;
        w.write_u8(self.slice_code)?;
        w.write_u8(self.xyzt_units)?;
        w.write_f32(self.cal_max)?;
        w.write_f32(self.cal_min)?;
        w.write_f32(self.slice_duration)?;
        w.write_f32(self.toffset)?;
        w.write_i32(self.glmax)?;
        w.write_i32(self.glmin)?;

        // zero-pad or truncate to the field width
        let mut descrip = [0u8; 80];
        let len = self.descrip.len().min(80);
        descrip[..len].copy_from_slice(&self.descrip[..len]);
        w.write_all(&descrip)?;
        w.write_all(&self.aux_file)?;
        w.write_i16(self.qform_code)?;
        w.write_i16(self.sform_code)?;
        for f in &[
            self.quatern_b,
            self.quatern_c,
            self.quatern_d,
            self.quatern_x,
            self.quatern_y,
            self.quatern_z,
        ] {
            w.write_f32(*f)?;
        }
        for f in self.srow_x.iter().chain(&self.srow_y).chain(&self.srow_z) {
            w.write_f32(*f)?;
        }
        w.write_all(&self.intent_name)?;
        w.write_all(&self.magic)?;
        Ok(())
    }

    /// Get the data type as a validated enum.
    pub fn data_type(&self) -> Result<NiftiType> {
        FromPrimitive::from_i16(self.datatype)
            .ok_or(VolumeError::InvalidCode("datatype", self.datatype))
    }

    /// Set the data type code along with the matching `bitpix`.
    pub fn set_data_type(&mut self, datatype: NiftiType) {
        self.datatype = datatype as i16;
        self.bitpix = (datatype.size_of() * 8) as i16;
    }

    /// Get the spatial units type as a validated unit enum.
    pub fn xyzt_to_space(&self) -> Result<Unit> {
        let space_code = self.xyzt_units & 0o0007;
        FromPrimitive::from_u8(space_code)
            .ok_or(VolumeError::InvalidCode("xyzt units (space)", space_code as i16))
    }

    /// Get the time units type as a validated unit enum.
    pub fn xyzt_to_time(&self) -> Result<Unit> {
        let time_code = self.xyzt_units & 0o0070;
        FromPrimitive::from_u8(time_code)
            .ok_or(VolumeError::InvalidCode("xyzt units (time)", time_code as i16))
    }

    /// Get the xyzt units type as a validated pair of space and time unit enum.
    pub fn xyzt_units(&self) -> Result<(Unit, Unit)> {
        Ok((self.xyzt_to_space()?, self.xyzt_to_time()?))
    }

    /// Get the slice order as a validated enum.
    pub fn slice_order(&self) -> Result<SliceOrder> {
        FromPrimitive::from_u8(self.slice_code)
            .ok_or(VolumeError::InvalidCode("slice order", self.slice_code as i16))
    }

    /// Get the intent as a validated enum.
    pub fn intent(&self) -> Result<Intent> {
        FromPrimitive::from_i16(self.intent_code)
            .ok_or(VolumeError::InvalidCode("intent", self.intent_code))
    }

    /// Get the qform coordinate mapping method as a validated enum.
    pub fn qform(&self) -> Result<XForm> {
        FromPrimitive::from_i16(self.qform_code)
            .ok_or(VolumeError::InvalidCode("qform", self.qform_code))
    }

    /// Get the sform coordinate mapping method as a validated enum.
    pub fn sform(&self) -> Result<XForm> {
        FromPrimitive::from_i16(self.sform_code)
            .ok_or(VolumeError::InvalidCode("sform", self.sform_code))
    }

    /// Index of the frequency encoding axis (1 to 3), or 0 if unspecified.
    pub fn freq_dim(&self) -> u8 {
        self.dim_info & 3
    }

    /// Index of the phase encoding axis (1 to 3), or 0 if unspecified.
    pub fn phase_dim(&self) -> u8 {
        (self.dim_info >> 2) & 3
    }

    /// Index of the slice axis (1 to 3), or 0 if unspecified.
    pub fn slice_dim(&self) -> u8 {
        (self.dim_info >> 4) & 3
    }

    /// Pack the three 2-bit axis codes into `dim_info`.
    pub fn set_dim_info(&mut self, freq: u8, phase: u8, slice: u8) {
        self.dim_info = (freq & 3) | ((phase & 3) << 2) | ((slice & 3) << 4);
    }

    /// Ensure that the current `descrip` field is valid and is exactly equal to 80 bytes.
    pub fn validate_description(&mut self) -> Result<()> {
        let len = self.descrip.len();
        if len > 80 {
            Err(VolumeError::IncorrectDescriptionLength(len))
        } else {
            if len < 80 {
                self.descrip.extend((len..80).map(|_| 0));
            }
            Ok(())
        }
    }

    /// Safely set the `descrip` field using a buffer.
    pub fn set_description<D>(&mut self, description: D) -> Result<()>
    where
        D: Into<Vec<u8>>,
        D: Deref<Target = [u8]>,
    {
        let len = description.len();
        if len < 80 {
            let mut descrip = vec![0; 80];
            descrip[..len].copy_from_slice(&description);
            self.descrip = descrip;
            Ok(())
        } else if len == 80 {
            self.descrip = description.into();
            Ok(())
        } else {
            Err(VolumeError::IncorrectDescriptionLength(len))
        }
    }

    /// Safely set the `descrip` field using a  &str.
    pub fn set_description_str<T>(&mut self, description: T) -> Result<()>
    where
        T: Into<String>,
    {
        self.set_description(description.into().as_bytes())
    }

    /// The description, up to the first null byte.
    pub fn description(&self) -> String {
        let end = self.descrip.iter().position(|&b| b == 0).unwrap_or(self.descrip.len());
        String::from_utf8_lossy(&self.descrip[..end]).into_owned()
    }

    /// The handedness factor of the qform: -1 when `pixdim[0]` is negative, 1 otherwise.
    pub fn qfac(&self) -> f64 {
        if self.pixdim[0] < 0. {
            -1.
        } else {
            1.
        }
    }

    /// The voxel-to-world affine encoded by the quaternion fields.
    pub fn qform_affine(&self) -> Matrix4<f64> {
        qform_to_affine(
            [
                f64::from(self.quatern_b),
                f64::from(self.quatern_c),
                f64::from(self.quatern_d),
            ],
            [
                f64::from(self.quatern_x),
                f64::from(self.quatern_y),
                f64::from(self.quatern_z),
            ],
            [
                f64::from(self.pixdim[1]),
                f64::from(self.pixdim[2]),
                f64::from(self.pixdim[3]),
            ],
            self.qfac(),
        )
    }

    /// The voxel-to-world affine stored in the `srow_*` fields.
    pub fn sform_affine(&self) -> Matrix4<f64> {
        let mut out = Matrix4::identity();
        for (r, row) in [self.srow_x, self.srow_y, self.srow_z].iter().enumerate() {
            for (c, v) in row.iter().enumerate() {
                out[(r, c)] = f64::from(*v);
            }
        }
        out
    }

    /// The voxel-to-world affine of this header: the sform when its code is
    /// set, else the qform when its code is set, else a diagonal matrix of
    /// the grid spacings.
    pub fn affine(&self) -> Matrix4<f64> {
        if self.sform_code > 0 {
            self.sform_affine()
        } else if self.qform_code > 0 {
            self.qform_affine()
        } else {
            let spacing = |v: f32| if v > 0. { f64::from(v) } else { 1. };
            let diagonal = Vector3::new(spacing(self.pixdim[1]), spacing(self.pixdim[2]), spacing(self.pixdim[3]));
            from_affine_and_translation(&Matrix3::from_diagonal(&diagonal), &Vector3::zeros())
        }
    }

    /// Store a rotation, origin and spacing in the quaternion fields and
    /// `pixdim`, with a positive `qfac`.
    pub fn set_qform(&mut self, quatern: [f64; 3], offset: [f64; 3], spacing: [f64; 3]) {
        self.quatern_b = quatern[0] as f32;
        self.quatern_c = quatern[1] as f32;
        self.quatern_d = quatern[2] as f32;
        self.quatern_x = offset[0] as f32;
        self.quatern_y = offset[1] as f32;
        self.quatern_z = offset[2] as f32;
        self.pixdim[0] = 1.;
        for a in 0..3 {
            self.pixdim[a + 1] = spacing[a] as f32;
        }
    }

    /// Overwrite the sform rows with the qform affine and mark the sform as set.
    pub fn update_sform(&mut self) {
        let affine = self.qform_affine();
        for c in 0..4 {
            self.srow_x[c] = affine[(0, c)] as f32;
            self.srow_y[c] = affine[(1, c)] as f32;
            self.srow_z[c] = affine[(2, c)] as f32;
        }
        self.sform_code = 1;
    }

    /// The anatomical orientation of the voxel axes.
    pub fn orientation(&self) -> Result<Orientation> {
        Orientation::from_affine(&self.affine())
    }

    /// Voxel counts of the first three axes, with a two-dimensional image
    /// counting as a single slice.
    pub fn grid_counts(&self) -> Result<[usize; 3]> {
        let mut counts = [
            usize::from(self.dim[1]),
            usize::from(self.dim[2]),
            usize::from(self.dim[3]),
        ];
        if self.dim[0] == 2 {
            counts[2] = 1;
        }
        for (a, &n) in counts.iter().enumerate() {
            if n == 0 {
                return Err(VolumeError::InconsistentDim(a as u8 + 1, 0));
            }
        }
        Ok(counts)
    }

    /// Number of values per voxel: the product of the extents past the third
    /// axis, with RGB24 data always holding three channels.
    pub fn channels(&self) -> usize {
        if self.datatype == NiftiType::Rgb24 as i16 {
            return 3;
        }
        let ndim = usize::from(self.dim[0]).min(7);
        if ndim < 4 {
            return 1;
        }
        self.dim[4..=ndim]
            .iter()
            .map(|&d| usize::from(d).max(1))
            .product()
    }

    /// Voxel counts of the grid followed by the number of channels.
    pub fn grid_dims(&self) -> Result<[usize; 4]> {
        let [nx, ny, nz] = self.grid_counts()?;
        Ok([nx, ny, nz, self.channels()])
    }

    /// Spacing of the first three axes, as stored in `pixdim`.
    pub fn spacing(&self) -> Vector3<f64> {
        Vector3::new(
            f64::from(self.pixdim[1]),
            f64::from(self.pixdim[2]),
            f64::from(self.pixdim[3]),
        )
    }

    /// Split the affine into its linear and translation components.
    pub fn affine_parts(&self) -> (Matrix3<f64>, Vector3<f64>) {
        get_affine_and_translation(&self.affine())
    }
}

/// Guess the byte order of a raw header from `dim[0]`, which must lie in 1..=7.
fn probe_endianness(buf: &[u8; HEADER_SIZE]) -> Result<Endianness> {
    let dim0 = ByteOrdered::be(&buf[DIM0_OFFSET..]).read_i16()?;
    Ok(if (1..=7).contains(&dim0) {
        Endianness::Big
    } else {
        Endianness::Little
    })
}

fn parse_header(buf: &[u8; HEADER_SIZE]) -> Result<NiftiHeader> {
    let endianness = probe_endianness(buf)?;
    let mut r = ByteOrdered::runtime(&buf[..], endianness);

    let sizeof_hdr = r.read_i32()?;
    if sizeof_hdr != HEADER_SIZE as i32 {
        return Err(VolumeError::InvalidFormat);
    }
    let mut data_type = [0u8; 10];
    r.read_exact(&mut data_type)?;
    let mut db_name = [0u8; 18];
    r.read_exact(&mut db_name)?;
    let extents = r.read_i32()?;
    let session_error = r.read_i16()?;
    let regular = r.read_u8()?;
    let dim_info = r.read_u8()?;
    let mut dim = [0u16; 8];
    for v in &mut dim {
        *v = r.read_u16()?;
    }
    let intent_p1 = r.read_f32()?;
    let intent_p2 = r.read_f32()?;
    let intent_p3 = r.read_f32()?;
    let intent_code = r.read_i16()?;
    let datatype = r.read_i16()?;
    let bitpix = r.read_i16()?;
    let slice_start = r.read_i16()?;
    let mut pixdim = [0f32; 8];
    for v in &mut pixdim {
        *v = r.read_f32()?;
    }
    let vox_offset = r.read_f32()?;
    let scl_slope = r.read_f32()?;
    let scl_inter = r.read_f32()?;
    let slice_end = r.read_i16()?;
    let slice_code = r.read_u8()?;
    let xyzt_units = r.read_u8()?;
    let cal_max = r.read_f32()?;
    let cal_min = r.read_f32()?;
    let slice_duration = r.read_f32()?;
    let toffset = r.read_f32()?;
    let glmax = r.read_i32()?;
    let glmin = r.read_i32()?;

    let mut descrip = vec![0u8; 80];
    r.read_exact(&mut descrip)?;
    let mut aux_file = [0u8; 24];
    r.read_exact(&mut aux_file)?;
    let qform_code = r.read_i16()?;
    let sform_code = r.read_i16()?;
    let quatern_b = r.read_f32()?;
    let quatern_c = r.read_f32()?;
    let quatern_d = r.read_f32()?;
    let quatern_x = r.read_f32()?;
    let quatern_y = r.read_f32()?;
    let quatern_z = r.read_f32()?;
    let mut srow_x = [0f32; 4];
    for v in &mut srow_x {
        *v = r.read_f32()?;
    }
    let mut srow_y = [0f32; 4];
    for v in &mut srow_y {
        *v = r.read_f32()?;
    }
    let mut srow_z = [0f32; 4];
    for v in &mut srow_z {
        *v = r.read_f32()?;
    }
    let mut intent_name = [0u8; 16];
    r.read_exact(&mut intent_name)?;
    let mut magic = [0u8; 4];
    r.read_exact(&mut magic)?;

    if &magic != MAGIC_CODE_NI1 && &magic != MAGIC_CODE_NIP1 {
        return Err(VolumeError::InvalidFormat);
    }

    Ok(NiftiHeader {
        sizeof_hdr,
        data_type,
        db_name,
        extents,
        session_error,
        regular,
        dim_info,
        dim,
        intent_p1,
        intent_p2,
        intent_p3,
        intent_code,
        datatype,
        bitpix,
        slice_start,
        pixdim,
        vox_offset,
        scl_slope,
        scl_inter,
        slice_end,
        slice_code,
        xyzt_units,
        cal_max,
        cal_min,
        slice_duration,
        toffset,
        glmax,
        glmin,
        descrip,
        aux_file,
        qform_code,
        sform_code,
        quatern_b,
        quatern_c,
        quatern_d,
        quatern_x,
        quatern_y,
        quatern_z,
        srow_x,
        srow_y,
        srow_z,
        intent_name,
        magic,
        endianness,
    })
}
