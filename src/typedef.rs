//! This module contains multiple types defined by the NIfTI-1 standard,
//! along with the voxel codec table which drives the reading and
//! writing of voxel values. Primitive integer values can be
//! converted to these types and vice-versa.

use crate::error::{Result, VolumeError};
use crate::util::Endianness;
use byteordered::ByteOrdered;
use num_derive::FromPrimitive;
use rgb::RGB8;

/// Data type for representing a NIfTI value type in a volume.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, FromPrimitive)]
pub enum NiftiType {
    /// unsigned char.
    // NIFTI_TYPE_UINT8           2
    Uint8 = 2,
    /// signed short.
    // NIFTI_TYPE_INT16           4
    Int16 = 4,
    /// signed int.
    // NIFTI_TYPE_INT32           8
    Int32 = 8,
    /// 32 bit float.
    // NIFTI_TYPE_FLOAT32        16
    Float32 = 16,
    /// 64 bit complex = 2 32 bit floats.
    // NIFTI_TYPE_COMPLEX64      32
    Complex64 = 32,
    /// 64 bit float = double.
    // NIFTI_TYPE_FLOAT64        64
    Float64 = 64,
    /// 3 8 bit bytes.
    // NIFTI_TYPE_RGB24         128
    Rgb24 = 128,
    /// signed char.
    // NIFTI_TYPE_INT8          256
    Int8 = 256,
    /// unsigned short.
    // NIFTI_TYPE_UINT16        512
    Uint16 = 512,
    /// unsigned int.
    // NIFTI_TYPE_UINT32        768
    Uint32 = 768,
    /// signed long long.
    // NIFTI_TYPE_INT64        1024
    Int64 = 1024,
    /// unsigned long long.
    // NIFTI_TYPE_UINT64       1280
    Uint64 = 1280,
    /// 128 bit float = long double.
    // NIFTI_TYPE_FLOAT128     1536
    Float128 = 1536,
    /// 128 bit complex = 2 64 bit floats.
    // NIFTI_TYPE_COMPLEX128   1792
    Complex128 = 1792,
    /// 256 bit complex = 2 128 bit floats
    // NIFTI_TYPE_COMPLEX256   2048
    Complex256 = 2048,
    /// 4 8 bit bytes.
    // NIFTI_TYPE_RGBA32       2304
    Rgba32 = 2304,
}

impl NiftiType {
    /// Retrieve the size of an element of this data type, in bytes.
    pub fn size_of(&self) -> usize {
        use NiftiType::*;
        match *self {
            Int8 | Uint8 => 1,
            Int16 | Uint16 => 2,
            Rgb24 => 3,
            Int32 | Uint32 | Float32 | Rgba32 => 4,
            Int64 | Uint64 | Float64 | Complex64 => 8,
            Float128 | Complex128 => 16,
            Complex256 => 32,
        }
    }

    /// Obtain the voxel codec for this data type.
    ///
    /// # Errors
    ///
    /// `UnsupportedDataType` if voxels of this type cannot be decoded
    /// (complex numbers, 128-bit floats and RGBA).
    pub fn codec(&self) -> Result<&'static VoxelCodec> {
        CODECS
            .iter()
            .find(|c| c.datatype == *self)
            .ok_or(VolumeError::UnsupportedDataType(*self))
    }

    /// Whether voxels of this type can be read and written.
    pub fn is_supported(&self) -> bool {
        self.codec().is_ok()
    }
}

/// Conversion rules between the stored bytes of one data type
/// and double precision channel values.
#[derive(Clone, Copy)]
pub struct VoxelCodec {
    /// The data type described.
    pub datatype: NiftiType,
    /// Number of bytes in one stored element.
    pub width: usize,
    /// Number of channels packed into a single element.
    pub packed: usize,
    decode: fn(&[u8], Endianness, &mut [f64]) -> Result<()>,
    encode: fn(&[f64], Endianness, &mut [u8]) -> Result<()>,
}

impl std::fmt::Debug for VoxelCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("VoxelCodec")
            .field("datatype", &self.datatype)
            .field("width", &self.width)
            .field("packed", &self.packed)
            .finish()
    }
}

impl VoxelCodec {
    /// Decode one element from `src` (`width` bytes) into `packed` channel values.
    pub fn decode(&self, src: &[u8], endianness: Endianness, out: &mut [f64]) -> Result<()> {
        (self.decode)(src, endianness, out)
    }

    /// Encode `packed` channel values into one element of `width` bytes.
    pub fn encode(&self, values: &[f64], endianness: Endianness, dst: &mut [u8]) -> Result<()> {
        (self.encode)(values, endianness, dst)
    }
}

macro_rules! primitive_codec {
    ($datatype:expr, $t:ty, $read:ident, $write:ident, $to_raw:expr) => {
        VoxelCodec {
            datatype: $datatype,
            width: std::mem::size_of::<$t>(),
            packed: 1,
            decode: |src: &[u8], e: Endianness, out: &mut [f64]| {
                out[0] = ByteOrdered::runtime(src, e).$read()? as f64;
                Ok(())
            },
            encode: |values: &[f64], e: Endianness, dst: &mut [u8]| {
                let raw: $t = ($to_raw)(values[0]);
                ByteOrdered::runtime(dst, e).$write(raw)?;
                Ok(())
            },
        }
    };
}

/// Integer encodings round to the nearest value and saturate.
macro_rules! integer_codec {
    ($datatype:expr, $t:ty, $read:ident, $write:ident) => {
        primitive_codec!($datatype, $t, $read, $write, |v: f64| v.round() as $t)
    };
}

macro_rules! float_codec {
    ($datatype:expr, $t:ty, $read:ident, $write:ident) => {
        primitive_codec!($datatype, $t, $read, $write, |v: f64| v as $t)
    };
}

fn decode_rgb24(src: &[u8], _: Endianness, out: &mut [f64]) -> Result<()> {
    let px = RGB8::new(src[0], src[1], src[2]);
    out[0] = f64::from(px.r) / 255.;
    out[1] = f64::from(px.g) / 255.;
    out[2] = f64::from(px.b) / 255.;
    Ok(())
}

fn encode_rgb24(values: &[f64], _: Endianness, dst: &mut [u8]) -> Result<()> {
    let byte = |v: f64| (v * 255.).round().max(0.).min(255.) as u8;
    let px = RGB8::new(byte(values[0]), byte(values[1]), byte(values[2]));
    dst[0] = px.r;
    dst[1] = px.g;
    dst[2] = px.b;
    Ok(())
}

/// The voxel codec table: one entry per supported data type.
static CODECS: &[VoxelCodec] = &[
    integer_codec!(NiftiType::Uint8, u8, read_u8, write_u8),
    integer_codec!(NiftiType::Int8, i8, read_i8, write_i8),
    integer_codec!(NiftiType::Int16, i16, read_i16, write_i16),
    integer_codec!(NiftiType::Uint16, u16, read_u16, write_u16),
    integer_codec!(NiftiType::Int32, i32, read_i32, write_i32),
    integer_codec!(NiftiType::Uint32, u32, read_u32, write_u32),
    integer_codec!(NiftiType::Int64, i64, read_i64, write_i64),
    integer_codec!(NiftiType::Uint64, u64, read_u64, write_u64),
    float_codec!(NiftiType::Float32, f32, read_f32, write_f32),
    float_codec!(NiftiType::Float64, f64, read_f64, write_f64),
    VoxelCodec {
        datatype: NiftiType::Rgb24,
        width: 3,
        packed: 3,
        decode: decode_rgb24,
        encode: encode_rgb24,
    },
];

/// The in-memory precision a volume was loaded with, which also
/// determines the default on-disk data type when it is written.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum ValueType {
    /// 8-bit unsigned integers.
    Byte,
    /// 16-bit signed integers.
    Short,
    /// 32-bit signed integers.
    Int,
    /// Single precision floats.
    Float,
    /// Double precision floats.
    Double,
}

impl Default for ValueType {
    fn default() -> Self {
        ValueType::Float
    }
}

impl ValueType {
    /// The in-memory value type used for voxels stored as `datatype`.
    pub fn from_nifti(datatype: NiftiType) -> ValueType {
        match datatype {
            NiftiType::Uint8 => ValueType::Byte,
            NiftiType::Int8 | NiftiType::Int16 => ValueType::Short,
            NiftiType::Uint16 | NiftiType::Int32 => ValueType::Int,
            NiftiType::Float64 => ValueType::Double,
            _ => ValueType::Float,
        }
    }

    /// The on-disk data type used when writing values of this type.
    pub fn to_nifti(self) -> NiftiType {
        match self {
            ValueType::Byte => NiftiType::Uint8,
            ValueType::Short => NiftiType::Int16,
            ValueType::Int => NiftiType::Int32,
            ValueType::Float => NiftiType::Float32,
            ValueType::Double => NiftiType::Float64,
        }
    }
}

/// An enum type which represents a unit type.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, FromPrimitive)]
pub enum Unit {
    /// NIFTI code for unspecified units.
    Unknown = 0,
    /* Space codes are multiples of 1. */
    /// NIFTI code for meters.
    Meter = 1,
    /// NIFTI code for millimeters.
    Mm = 2,
    /// NIFTI code for micrometers.
    Micron = 3,
    /* Time codes are multiples of 8. */
    /// NIFTI code for seconds.
    Sec = 8,
    /// NIFTI code for milliseconds.
    Msec = 16,
    /// NIFTI code for microseconds.
    Usec = 24,
    /* These units are for spectral data: */
    /// NIFTI code for Hertz.
    Hz = 32,
    /// NIFTI code for ppm.
    Ppm = 40,
    /// NIFTI code for radians per second.
    Rads = 48,
}

/// An enum type for representing a NIfTI intent code.
/// Codes 2 through 24 are statistical distributions whose
/// parameters live in `intent_p1..3`.
#[allow(missing_docs)]
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, FromPrimitive)]
pub enum Intent {
    /// No intention is indicated in the header.
    None = 0,
    Correl = 2,
    Ttest = 3,
    Ftest = 4,
    Zscore = 5,
    Chisq = 6,
    Beta = 7,
    Binom = 8,
    Gamma = 9,
    Poisson = 10,
    Normal = 11,
    FtestNonc = 12,
    ChisqNonc = 13,
    Logistic = 14,
    Laplace = 15,
    Uniform = 16,
    TtestNonc = 17,
    Weibull = 18,
    Chi = 19,
    Invgauss = 20,
    Extval = 21,
    Pval = 22,
    Logpval = 23,
    Log10pval = 24,
    /// Each voxel holds an estimate of some parameter.
    Estimate = 1001,
    /// Each voxel is an index into a label set.
    Label = 1002,
    Neuroname = 1003,
    Genmatrix = 1004,
    Symmatrix = 1005,
    Dispvect = 1006,
    /// Each voxel holds a vector of `dim[5]` channels.
    Vector = 1007,
    Pointset = 1008,
    Triangle = 1009,
    Quaternion = 1010,
    Dimless = 1011,
    TimeSeries = 2001,
    NodeIndex = 2002,
    RgbVector = 2003,
    RgbaVector = 2004,
    Shape = 2005,
}

impl Intent {
    /// Check whether this intent code are used for statistics.
    pub fn is_statcode(&self) -> bool {
        *self as i16 >= 2 && *self as i16 <= 24
    }
}

/// An enum type for representing a NIfTI XForm.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, FromPrimitive)]
pub enum XForm {
    /// Arbitrary coordinates (Method 1).
    Unknown = 0,
    /// Scanner-based anatomical coordinates
    ScannerAnat = 1,
    /// Coordinates aligned to another file's,
    /// or to anatomical "truth".
    AlignedAnat = 2,
    /// Coordinates aligned to Talairach-Tournoux
    /// Atlas; (0,0,0)=AC, etc.
    Talairach = 3,
    /// MNI 152 normalized coordinates.
    Mni152 = 4,
}

/// An enum type for representing the slice order.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, FromPrimitive)]
pub enum SliceOrder {
    /// NIFTI_SLICE_UNKNOWN
    Unknown = 0,
    /// NIFTI_SLICE_SEQ_INC
    SeqInc = 1,
    /// NIFTI_SLICE_SEQ_DEC
    SeqDec = 2,
    /// NIFTI_SLICE_ALT_INC
    AltInc = 3,
    /// NIFTI_SLICE_ALT_DEC
    AltDec = 4,
    /// NIFTI_SLICE_ALT_INC2
    AltInc2 = 5,
    /// NIFTI_SLICE_ALT_DEC2
    AltDec2 = 6,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_types_have_no_codec() {
        for t in &[
            NiftiType::Complex64,
            NiftiType::Complex128,
            NiftiType::Complex256,
            NiftiType::Float128,
            NiftiType::Rgba32,
        ] {
            assert!(!t.is_supported(), "{:?} should not be supported", t);
        }
    }

    #[test]
    fn codec_width_matches_size_of() {
        for codec in CODECS {
            assert_eq!(codec.width, codec.datatype.size_of());
        }
    }

    #[test]
    fn integer_encode_rounds_and_saturates() {
        let codec = NiftiType::Int16.codec().unwrap();
        let mut buf = [0u8; 2];
        codec.encode(&[2.6], Endianness::Little, &mut buf).unwrap();
        assert_eq!(buf, 3i16.to_le_bytes());
        codec.encode(&[1e9], Endianness::Big, &mut buf).unwrap();
        assert_eq!(buf, i16::MAX.to_be_bytes());

        let mut out = [0.];
        codec.decode(&i16::MIN.to_be_bytes(), Endianness::Big, &mut out).unwrap();
        assert_eq!(out[0], -32768.);
    }

    #[test]
    fn codec_follows_byte_order() {
        let codec = NiftiType::Float32.codec().unwrap();
        let mut out = [0.];
        codec.decode(&[0x3f, 0xc0, 0, 0], Endianness::Big, &mut out).unwrap();
        assert_eq!(out[0], 1.5);
        codec.decode(&[0, 0, 0xc0, 0x3f], Endianness::Little, &mut out).unwrap();
        assert_eq!(out[0], 1.5);

        let mut buf = [0u8; 4];
        codec.encode(&[-2.], Endianness::Big, &mut buf).unwrap();
        assert_eq!(buf, [0xc0, 0, 0, 0]);

        let short = NiftiType::Int16.codec().unwrap();
        assert!(short.decode(&[1], Endianness::Little, &mut out).is_err());
    }

    #[test]
    fn rgb24_is_packed() {
        let codec = NiftiType::Rgb24.codec().unwrap();
        assert_eq!(codec.packed, 3);
        let mut out = [0.; 3];
        codec.decode(&[255, 0, 51], Endianness::Little, &mut out).unwrap();
        assert_eq!(out, [1., 0., 0.2]);

        let mut buf = [0u8; 3];
        codec.encode(&out, Endianness::Little, &mut buf).unwrap();
        assert_eq!(buf, [255, 0, 51]);
    }

    #[test]
    fn value_type_mapping() {
        assert_eq!(ValueType::from_nifti(NiftiType::Int8), ValueType::Short);
        assert_eq!(ValueType::from_nifti(NiftiType::Uint16), ValueType::Int);
        assert_eq!(ValueType::from_nifti(NiftiType::Uint64), ValueType::Float);
        assert_eq!(ValueType::Short.to_nifti(), NiftiType::Int16);
        assert_eq!(ValueType::Byte.to_nifti(), NiftiType::Uint8);
    }
}
