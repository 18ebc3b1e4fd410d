//! Private utility module
use crate::error::Result;
use either::Either;
use flate2::bufread::GzDecoder;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

pub use byteordered::Endianness;

/// A file reader which transparently decompresses gzip-framed files.
pub type FileReader = Either<BufReader<File>, GzDecoder<BufReader<File>>>;

/// Open a file for reading, decompressing it on the fly if its name ends in ".gz".
pub fn open_file<P: AsRef<Path>>(path: P) -> Result<FileReader> {
    let gz = is_gz_file(&path);
    let file = BufReader::new(File::open(path)?);
    if gz {
        Ok(Either::Right(GzDecoder::new(file)))
    } else {
        Ok(Either::Left(file))
    }
}

/// Convert a raw volume value to the scale defined
/// by the given scale slope and intercept parameters.
/// A zero slope means that no scaling is applied.
pub fn raw_to_value(value: f64, slope: f64, intercept: f64) -> f64 {
    if slope != 0. {
        value * slope + intercept
    } else {
        value
    }
}

/// Replace non-finite values: NaN becomes zero, infinities
/// saturate to the representable extremes.
pub fn sanitize(value: f64) -> f64 {
    if value.is_nan() {
        0.
    } else if value == f64::INFINITY {
        f64::MAX
    } else if value == f64::NEG_INFINITY {
        f64::MIN
    } else {
        value
    }
}

/// Check whether the file path ends in ".gz".
pub fn is_gz_file<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .file_name()
        .map(|a| a.to_string_lossy().ends_with(".gz"))
        .unwrap_or(false)
}

/// Convert a file path to a header file (.hdr or .hdr.gz) to
/// the respective volume file with GZip compression (.img.gz).
pub fn into_img_file_gz(mut path: PathBuf) -> PathBuf {
    if is_gz_file(&path) {
        // leave only the first extension (.hdr)
        let _ = path.set_extension("");
    }
    let _ = path.set_extension("img.gz");
    path
}

#[cfg(test)]
mod tests {
    use super::{into_img_file_gz, is_gz_file, raw_to_value, sanitize};
    use std::path::PathBuf;

    #[test]
    fn filenames() {
        assert!(!is_gz_file("/path/to/something.nii"));
        assert!(is_gz_file("/path/to/something.nii.gz"));
        assert!(!is_gz_file("volume.não"));
        assert!(is_gz_file("1.2.3.nii.gz"));
        assert!(!is_gz_file("1.2.3.nii"));
        assert!(!is_gz_file("gz"));
        assert!(is_gz_file("/my/path/.gz"));

        let path = "/path/to/image.hdr";
        let gz = into_img_file_gz(PathBuf::from(path));
        assert_eq!(gz, PathBuf::from("/path/to/image.img.gz"));

        let path = "/path/to/image.hdr.gz";
        let gz = into_img_file_gz(PathBuf::from(path));
        assert_eq!(gz, PathBuf::from("/path/to/image.img.gz"));
    }

    #[test]
    fn scaling() {
        assert_eq!(raw_to_value(100., 2., -1024.), -824.);
        assert_eq!(raw_to_value(100., 0., -1024.), 100.);
    }

    #[test]
    fn non_finite_values() {
        assert_eq!(sanitize(f64::NAN), 0.);
        assert_eq!(sanitize(f64::INFINITY), f64::MAX);
        assert_eq!(sanitize(f64::NEG_INFINITY), f64::MIN);
        assert_eq!(sanitize(-3.5), -3.5);
    }
}
