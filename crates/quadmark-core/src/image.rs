use nalgebra::Point2;

/// Intensity returned by [`sample_subpix_safe`] when the 2×2 neighbourhood
/// leaves the image.
pub const NEUTRAL_SAMPLE: u8 = 127;

/// Fixed-point scale of the fractional weights in [`sample_subpix_safe`].
pub const SUBPIXEL_SCALE: i32 = 256;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    #[error("invalid grayscale buffer length (expected {expected} bytes, got {got})")]
    BufferLength { expected: usize, got: usize },
    #[error("invalid grayscale dimensions (width={width}, height={height})")]
    Dimensions { width: usize, height: usize },
}

#[derive(Clone, Copy, Debug)]
pub struct GrayImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major, len = w*h
}

impl<'a> GrayImageView<'a> {
    /// Wrap a row-major 8-bit buffer, checking that it matches the dimensions.
    pub fn new(width: usize, height: usize, data: &'a [u8]) -> Result<Self, ImageError> {
        if width == 0 || height == 0 {
            return Err(ImageError::Dimensions { width, height });
        }
        let expected = width * height;
        if data.len() != expected {
            return Err(ImageError::BufferLength {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }
}

#[derive(Clone, Debug)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl GrayImage {
    /// Uniform image filled with `value`.
    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    pub fn view(&self) -> GrayImageView<'_> {
        GrayImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }
}

#[inline]
fn get_gray(src: &GrayImageView<'_>, x: i32, y: i32) -> u8 {
    if x < 0 || y < 0 || x >= src.width as i32 || y >= src.height as i32 {
        return 0;
    }
    src.data[y as usize * src.width + x as usize]
}

/// Float bilinear sample; pixels outside the image read as black.
#[inline]
pub fn sample_bilinear(src: &GrayImageView<'_>, x: f32, y: f32) -> f32 {
    let x0 = x.floor() as i32;
    let y0 = y.floor() as i32;
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let p00 = get_gray(src, x0, y0) as f32;
    let p10 = get_gray(src, x0 + 1, y0) as f32;
    let p01 = get_gray(src, x0, y0 + 1) as f32;
    let p11 = get_gray(src, x0 + 1, y0 + 1) as f32;

    let a = p00 + fx * (p10 - p00);
    let b = p01 + fx * (p11 - p01);
    a + fy * (b - a)
}

#[inline]
pub fn sample_bilinear_u8(src: &GrayImageView<'_>, x: f32, y: f32) -> u8 {
    sample_bilinear(src, x, y).clamp(0.0, 255.0) as u8
}

/// Fixed-point bilinear sample used by the stripe sampler.
///
/// The fractional offsets are quantized to `1/256` and blended with integer
/// arithmetic. The whole 2×2 neighbourhood must lie inside the image, i.e. the
/// top-left pixel must be in `[0, width-2] × [0, height-2]`; anything else
/// (including non-finite coordinates) yields [`NEUTRAL_SAMPLE`].
#[inline]
pub fn sample_subpix_safe(src: &GrayImageView<'_>, p: Point2<f32>) -> u8 {
    if !p.x.is_finite() || !p.y.is_finite() {
        return NEUTRAL_SAMPLE;
    }
    let fx = p.x.floor();
    let fy = p.y.floor();
    let x = fx as i64;
    let y = fy as i64;
    if x < 0 || y < 0 || x >= src.width as i64 - 1 || y >= src.height as i64 - 1 {
        return NEUTRAL_SAMPLE;
    }

    let dx = (SUBPIXEL_SCALE as f32 * (p.x - fx)) as i32;
    let dy = (SUBPIXEL_SCALE as f32 * (p.y - fy)) as i32;

    let base = y as usize * src.width + x as usize;
    let row0 = &src.data[base..base + 2];
    let row1 = &src.data[base + src.width..base + src.width + 2];

    let (i00, i10) = (row0[0] as i32, row0[1] as i32);
    let (i01, i11) = (row1[0] as i32, row1[1] as i32);

    let a = i00 + ((dx * (i10 - i00)) >> 8);
    let b = i01 + ((dx * (i11 - i01)) >> 8);
    (a + ((dy * (b - a)) >> 8)).clamp(0, 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_image() -> GrayImage {
        let (w, h) = (8, 6);
        let mut data = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                data.push((x * 20 + y * 5) as u8);
            }
        }
        GrayImage {
            width: w,
            height: h,
            data,
        }
    }

    #[test]
    fn view_rejects_mismatched_buffer() {
        let buf = [0u8; 10];
        assert_eq!(
            GrayImageView::new(4, 3, &buf).unwrap_err(),
            ImageError::BufferLength {
                expected: 12,
                got: 10
            }
        );
        assert!(matches!(
            GrayImageView::new(0, 3, &buf),
            Err(ImageError::Dimensions { .. })
        ));
    }

    #[test]
    fn subpix_sample_at_integer_pixel_is_exact() {
        let img = gradient_image();
        let view = img.view();
        for (x, y) in [(0usize, 0usize), (3, 2), (6, 4)] {
            let v = sample_subpix_safe(&view, Point2::new(x as f32, y as f32));
            assert_eq!(v, view.get(x, y));
        }
    }

    #[test]
    fn subpix_sample_outside_returns_neutral() {
        let img = gradient_image();
        let view = img.view();
        assert_eq!(sample_subpix_safe(&view, Point2::new(-1.0, 2.0)), NEUTRAL_SAMPLE);
        assert_eq!(sample_subpix_safe(&view, Point2::new(2.0, -0.5)), NEUTRAL_SAMPLE);
        // The last column/row has no right/bottom neighbour.
        assert_eq!(sample_subpix_safe(&view, Point2::new(7.0, 2.0)), NEUTRAL_SAMPLE);
        assert_eq!(sample_subpix_safe(&view, Point2::new(2.0, 5.0)), NEUTRAL_SAMPLE);
        assert_eq!(
            sample_subpix_safe(&view, Point2::new(f32::NAN, 1.0)),
            NEUTRAL_SAMPLE
        );
    }

    #[test]
    fn subpix_sample_interpolates_midpoints() {
        let img = gradient_image();
        let view = img.view();
        // (2,1)=45, (3,1)=65, (2,2)=50, (3,2)=70 -> centre = 57.5, truncated by the fixed-point blend.
        assert_eq!(sample_subpix_safe(&view, Point2::new(2.5, 1.5)), 57);
        assert_eq!(sample_subpix_safe(&view, Point2::new(2.5, 1.0)), 55);
    }

    #[test]
    fn float_bilinear_reads_black_outside() {
        let img = GrayImage::filled(4, 4, 200);
        let view = img.view();
        assert_eq!(sample_bilinear_u8(&view, 1.0, 1.0), 200);
        assert_eq!(sample_bilinear_u8(&view, -1.0, 1.0), 0);
        assert!((sample_bilinear(&view, 3.5, 1.0) - 100.0).abs() < 1e-4);
    }
}
