use crate::error::{Error, Result};
use crate::font::{CoverageSurface, LayoutMetrics};
use crate::models::RawMeasurement;

/// Compute darkness and relative width from a rendered sample.
///
/// Darkness is the mean alpha coverage over every pixel of the surface, with
/// anti-aliased pixels counting fractionally. Relative width is the ink width
/// of the text divided by the x-height, which cancels out the render size.
pub fn extract(surface: &CoverageSurface, metrics: &LayoutMetrics) -> Result<RawMeasurement> {
    let area = surface.area();
    if area == 0 {
        return Err(Error::Measurement(format!(
            "empty surface ({}x{})",
            surface.width, surface.height
        )));
    }
    if surface.stride < surface.width {
        return Err(Error::Measurement(format!(
            "stride {} is narrower than width {}",
            surface.stride, surface.width
        )));
    }
    let needed = surface.stride * (surface.height - 1) + surface.width;
    if surface.pixels.len() < needed {
        return Err(Error::Measurement(format!(
            "pixel buffer holds {} bytes, surface needs {}",
            surface.pixels.len(),
            needed
        )));
    }

    if !metrics.x_height.is_finite() || metrics.x_height <= 0.0 {
        return Err(Error::Measurement(format!(
            "x-height of {} px",
            metrics.x_height
        )));
    }

    let mut coverage = 0.0f64;
    for row in surface.pixels.chunks(surface.stride).take(surface.height) {
        for &alpha in &row[..surface.width] {
            coverage += alpha as f64 / 255.0;
        }
    }

    let darkness = coverage / area as f64;
    let relative_width = metrics.width as f64 / metrics.x_height as f64;

    Ok(RawMeasurement::new(darkness, relative_width))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(width: f32, x_height: f32) -> LayoutMetrics {
        LayoutMetrics {
            x_bearing: 0.0,
            y_bearing: -20.0,
            width,
            height: 20.0,
            x_height,
        }
    }

    #[test]
    fn fully_inked_surface_is_completely_dark() {
        let surface = CoverageSurface {
            width: 4,
            height: 2,
            stride: 4,
            pixels: vec![255; 8],
        };
        let m = extract(&surface, &metrics(4.0, 2.0)).unwrap();
        assert_eq!(m.darkness, 1.0);
        assert_eq!(m.relative_width, 2.0);
    }

    #[test]
    fn partial_coverage_counts_fractionally() {
        let surface = CoverageSurface {
            width: 2,
            height: 2,
            stride: 2,
            pixels: vec![255, 0, 51, 0],
        };
        let m = extract(&surface, &metrics(10.0, 4.0)).unwrap();
        assert!((m.darkness - 0.3).abs() < 1e-12);
        assert_eq!(m.relative_width, 2.5);
    }

    #[test]
    fn row_padding_is_not_counted() {
        // Stride 3, width 2: the third byte of each row is padding
        let surface = CoverageSurface {
            width: 2,
            height: 2,
            stride: 3,
            pixels: vec![255, 255, 255, 0, 0, 255],
        };
        let m = extract(&surface, &metrics(2.0, 1.0)).unwrap();
        assert_eq!(m.darkness, 0.5);
    }

    #[test]
    fn zero_area_surface_is_a_measurement_error() {
        let surface = CoverageSurface::new(0, 12);
        let err = extract(&surface, &metrics(0.0, 5.0)).unwrap_err();
        assert!(matches!(err, Error::Measurement(_)));
    }

    #[test]
    fn zero_x_height_is_a_measurement_error() {
        let surface = CoverageSurface::new(3, 3);
        let err = extract(&surface, &metrics(3.0, 0.0)).unwrap_err();
        assert!(matches!(err, Error::Measurement(_)));
    }

    #[test]
    fn short_pixel_buffer_is_a_measurement_error() {
        let surface = CoverageSurface {
            width: 3,
            height: 3,
            stride: 3,
            pixels: vec![0; 5],
        };
        let err = extract(&surface, &metrics(3.0, 1.0)).unwrap_err();
        assert!(matches!(err, Error::Measurement(_)));
    }
}
