//! Contains the Region and PlaneMapper structs, which describe a
//! relationship between a square on the integral plane with an origin
//! at 0,0, and a rectangle on the complex plane bounded by a low and
//! high value on each axis.
use errors::MandelbrotError;
use num::Complex;

/// The rectangle of the complex plane being sampled.  The real part
/// of each value is the x-component, the imaginary part the
/// y-component.  Bounds are always finite and strictly ordered.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Region {
    re_low: f64,
    re_high: f64,
    im_low: f64,
    im_high: f64,
}

impl Region {
    /// Takes the low and high bound of the real axis, then of the
    /// imaginary axis.
    pub fn new(re_low: f64, re_high: f64, im_low: f64, im_high: f64) -> Result<Region, MandelbrotError> {
        if !(re_low.is_finite() && re_high.is_finite() && im_low.is_finite() && im_high.is_finite()) {
            return Err(MandelbrotError::InvalidRegion(
                "Region bounds must be finite numbers".to_string(),
            ));
        }

        if re_low >= re_high {
            return Err(MandelbrotError::InvalidRegion(format!(
                "The low real bound {} is not less than the high real bound {}",
                re_low, re_high
            )));
        }

        if im_low >= im_high {
            return Err(MandelbrotError::InvalidRegion(format!(
                "The low imaginary bound {} is not less than the high imaginary bound {}",
                im_low, im_high
            )));
        }

        if !((re_high - re_low).is_finite() && (im_high - im_low).is_finite()) {
            return Err(MandelbrotError::InvalidRegion(
                "Region is too wide to sample with finite coordinates".to_string(),
            ));
        }

        Ok(Region {
            re_low,
            re_high,
            im_low,
            im_high,
        })
    }

    /// Builds a region out of its left-lower and right-upper corners.
    pub fn from_corners(
        leftlower: Complex<f64>,
        rightupper: Complex<f64>,
    ) -> Result<Region, MandelbrotError> {
        Region::new(leftlower.re, rightupper.re, leftlower.im, rightupper.im)
    }

    /// Low bound of the real axis.
    pub fn re_low(&self) -> f64 {
        self.re_low
    }

    /// High bound of the real axis.
    pub fn re_high(&self) -> f64 {
        self.re_high
    }

    /// Low bound of the imaginary axis.
    pub fn im_low(&self) -> f64 {
        self.im_low
    }

    /// High bound of the imaginary axis.
    pub fn im_high(&self) -> f64 {
        self.im_high
    }
}

impl Default for Region {
    /// The square from -2-2i to 2+2i, which holds the whole set.
    fn default() -> Self {
        Region {
            re_low: -2.0,
            re_high: 2.0,
            im_low: -2.0,
            im_high: 2.0,
        }
    }
}

/// Describes the column, row of a pixel in the bitmap.  The column
/// drives the real axis and the row drives the imaginary axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Maps pixels of a `size` x `size` integral plane onto a region of
/// the complex plane.
#[derive(Debug)]
pub struct PlaneMapper {
    size: usize,
    region: Region,
    // Pixels per unit of the complex plane, real then imaginary.
    grid_factors: (f64, f64),
}

impl PlaneMapper {
    /// Constructor.  Fails if the integral plane would be empty.
    pub fn new(size: usize, region: Region) -> Result<PlaneMapper, MandelbrotError> {
        if size == 0 {
            return Err(MandelbrotError::InvalidSize);
        }

        let grid_factors = (
            (size as f64) / (region.re_high - region.re_low),
            (size as f64) / (region.im_high - region.im_low),
        );

        // A sliver of a region can still overflow the pixel density.
        if !(grid_factors.0.is_finite() && grid_factors.0 > 0.0)
            || !(grid_factors.1.is_finite() && grid_factors.1 > 0.0)
        {
            return Err(MandelbrotError::InvalidRegion(format!(
                "Region {:?} cannot be mapped onto {} pixels",
                region, size
            )));
        }

        Ok(PlaneMapper {
            size,
            region,
            grid_factors,
        })
    }

    /// The width (and height) of the integral plane.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The real coordinate of a column.
    #[inline]
    pub fn column_to_re(&self, column: usize) -> f64 {
        (column as f64) / self.grid_factors.0 + self.region.re_low
    }

    /// The imaginary coordinate of a row.
    #[inline]
    pub fn row_to_im(&self, row: usize) -> f64 {
        (row as f64) / self.grid_factors.1 + self.region.im_low
    }

    /// Given a pixel on the integral cartesian plane, map it to a
    /// point on the complex cartesian plane.  Pixels past the edge are
    /// not rejected; `Pixel(size, size)` lands on the high corner.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(self.column_to_re(pixel.0), self.row_to_im(pixel.1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_fails_on_bad_shape() {
        assert!(Region::new(1.0, -1.0, -1.0, 1.0).is_err());
        assert!(Region::new(-1.0, 1.0, 1.0, -1.0).is_err());
    }

    #[test]
    fn region_fails_on_empty_axis() {
        assert!(Region::new(0.5, 0.5, -1.0, 1.0).is_err());
    }

    #[test]
    fn region_fails_on_non_finite_bounds() {
        assert!(Region::new(std::f64::NAN, 1.0, -1.0, 1.0).is_err());
        assert!(Region::new(-1.0, std::f64::INFINITY, -1.0, 1.0).is_err());
    }

    #[test]
    fn region_from_corners() {
        let region = Region::from_corners(Complex::new(-0.5, -1.0), Complex::new(0.0, -0.5)).unwrap();
        assert_eq!(region, Region::new(-0.5, 0.0, -1.0, -0.5).unwrap());
    }

    #[test]
    fn region_fails_on_overflowing_span() {
        match Region::new(-1e308, 1e308, -1.0, 1.0) {
            Err(MandelbrotError::InvalidRegion(_)) => {}
            other => panic!("expected InvalidRegion, got {:?}", other),
        }
        assert!(Region::new(-1.0, 1.0, -1e308, 1e308).is_err());
        assert!(Region::from_corners(Complex::new(-1e308, -1e308), Complex::new(1e308, 1e308)).is_err());
    }

    #[test]
    fn planemapper_fails_on_overflowing_density() {
        let sliver = Region::new(0.0, 5e-324, 0.0, 1.0).unwrap();
        match PlaneMapper::new(4, sliver) {
            Err(MandelbrotError::InvalidRegion(_)) => {}
            other => panic!("expected InvalidRegion, got {:?}", other),
        }
    }

    #[test]
    fn wide_regions_map_to_finite_points() {
        let region = Region::new(-1e307, 1e307, -1e307, 1e307).unwrap();
        let pm = PlaneMapper::new(16, region).unwrap();
        for i in 0..17 {
            let point = pm.pixel_to_point(&Pixel(i, i));
            assert!(point.re.is_finite() && point.im.is_finite(), "pixel {}", i);
        }
    }

    #[test]
    fn region_exposes_its_bounds() {
        let region = Region::new(-0.5, 0.0, -1.0, -0.5).unwrap();
        assert_eq!(
            (region.re_low(), region.re_high(), region.im_low(), region.im_high()),
            (-0.5, 0.0, -1.0, -0.5)
        );
    }

    #[test]
    fn planemapper_fails_on_empty_plane() {
        match PlaneMapper::new(0, Region::default()) {
            Err(MandelbrotError::InvalidSize) => {}
            other => panic!("expected InvalidSize, got {:?}", other),
        }
    }

    #[test]
    fn pixel_to_point_on_positive_planes() {
        let region = Region::new(0.0, 5.0, 0.0, 5.0).unwrap();
        let pm = PlaneMapper::new(5, region).unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(0.0, 0.0));
        assert_eq!(pm.pixel_to_point(&Pixel(2, 2)), Complex::new(2.0, 2.0));
        assert_eq!(pm.pixel_to_point(&Pixel(4, 4)), Complex::new(4.0, 4.0));
    }

    #[test]
    fn pixel_to_points_on_mixed_planes() {
        let pm = PlaneMapper::new(4, Region::default()).unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel(2, 2)), Complex::new(0.0, 0.0));
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(-2.0, -2.0));
        assert_eq!(pm.pixel_to_point(&Pixel(3, 1)), Complex::new(1.0, -1.0));
    }

    #[test]
    fn edge_of_plane_reaches_high_corner() {
        for &size in &[4, 64, 640] {
            let pm = PlaneMapper::new(size, Region::default()).unwrap();
            assert_eq!(pm.column_to_re(0), -2.0);
            assert_eq!(pm.pixel_to_point(&Pixel(size, size)), Complex::new(2.0, 2.0));
            assert!(pm.column_to_re(size - 1) < 2.0);
        }
    }

    #[test]
    fn last_column_approaches_high_bound() {
        let small = PlaneMapper::new(8, Region::default()).unwrap();
        let large = PlaneMapper::new(800, Region::default()).unwrap();
        assert!(2.0 - large.column_to_re(799) < 2.0 - small.column_to_re(7));
    }

    #[test]
    fn axes_scale_independently() {
        let region = Region::new(-0.5, 0.0, -1.0, -0.5).unwrap();
        let pm = PlaneMapper::new(4, region).unwrap();
        assert_eq!(pm.column_to_re(2), -0.25);
        assert_eq!(pm.row_to_im(2), -0.75);
    }
}
