//! Interpolation of volumes at arbitrary world positions.
//!
//! Every interpolator implements [`VectFunction`] with a three-dimensional
//! input (a world position) and one output per volume channel. Positions
//! whose nearest voxel lies outside the grid evaluate to zero.
//!
//! [`VectFunction`]: ../volume/function/trait.VectFunction.html

pub mod gaussian;
pub mod nearest;
pub mod trilinear;
pub mod tricubic;

pub use self::gaussian::{GaussianInterp, GaussianLocalInterp, LocalFit};
pub use self::nearest::NearestInterp;
pub use self::trilinear::TrilinearInterp;
pub use self::tricubic::{CoefficientCache, TricubicInterp};

use crate::error::VolumeError;
use crate::volume::function::VectFunction;
use crate::volume::Volume;
use nalgebra::Vector3;
use std::fmt;
use std::str::FromStr;

/// The available interpolation kernels.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum InterpolationType {
    /// Value of the nearest voxel.
    Nearest,
    /// Triangle-weighted average of the 8 surrounding voxels.
    Trilinear,
    /// Piecewise tricubic polynomial fitted to values and derivatives.
    Tricubic,
    /// Gaussian-weighted average of the neighborhood.
    Gaussian,
    /// Gaussian-weighted linear regression over the neighborhood.
    GaussianLocalLinear,
    /// Gaussian-weighted quadratic regression over the neighborhood.
    GaussianLocalQuadratic,
}

impl InterpolationType {
    /// All interpolation types.
    pub const ALL: [InterpolationType; 6] = [
        InterpolationType::Nearest,
        InterpolationType::Trilinear,
        InterpolationType::Tricubic,
        InterpolationType::Gaussian,
        InterpolationType::GaussianLocalLinear,
        InterpolationType::GaussianLocalQuadratic,
    ];

    fn name(self) -> &'static str {
        match self {
            InterpolationType::Nearest => "Nearest",
            InterpolationType::Trilinear => "Trilinear",
            InterpolationType::Tricubic => "Tricubic",
            InterpolationType::Gaussian => "Gaussian",
            InterpolationType::GaussianLocalLinear => "GaussianLocalLinear",
            InterpolationType::GaussianLocalQuadratic => "GaussianLocalQuadratic",
        }
    }
}

impl fmt::Display for InterpolationType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InterpolationType {
    type Err = VolumeError;

    fn from_str(s: &str) -> Result<Self, VolumeError> {
        InterpolationType::ALL
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| VolumeError::InvalidKernel(format!("unknown interpolation type: {}", s)))
    }
}

/// Create an interpolator of the given type over `volume`, with default settings.
///
/// # Example
///
/// ```
/// use voxkit::{interp, InterpolationType, Sampling, Volume, VectFunction};
/// use nalgebra::Vector3;
/// # fn run() -> voxkit::Result<()> {
/// let sampling = Sampling::axis_aligned(Vector3::zeros(), Vector3::new(1., 1., 1.), [4, 4, 4])?;
/// let mut volume = Volume::new(sampling, 1);
/// volume.set(1, 1, 1, 0, 10.);
/// let f = interp(InterpolationType::Trilinear, &volume);
/// assert_eq!(f.apply(&[1.5, 1., 1.]), vec![5.]);
/// # Ok(())
/// # }
/// # run().unwrap();
/// ```
pub fn interp<'a>(kind: InterpolationType, volume: &'a Volume) -> Box<dyn VectFunction + 'a> {
    match kind {
        InterpolationType::Nearest => Box::new(NearestInterp::new(volume)),
        InterpolationType::Trilinear => Box::new(TrilinearInterp::new(volume)),
        InterpolationType::Tricubic => Box::new(TricubicInterp::new(volume)),
        InterpolationType::Gaussian => Box::new(GaussianInterp::new(volume)),
        InterpolationType::GaussianLocalLinear => {
            Box::new(GaussianLocalInterp::new(volume, LocalFit::Linear))
        }
        InterpolationType::GaussianLocalQuadratic => {
            Box::new(GaussianLocalInterp::new(volume, LocalFit::Quadratic))
        }
    }
}

/// Interpret the input of an interpolator as a world position.
fn world_point(input: &[f64]) -> Vector3<f64> {
    Vector3::new(input[0], input[1], input[2])
}
