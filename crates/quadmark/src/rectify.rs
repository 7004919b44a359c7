use nalgebra::Point2;
use quadmark_code::{MarkerGrid, GRID_CELLS};
use quadmark_core::{homography_from_4pt, sample_grid_gray, GrayImageView};

/// Grid-plane positions of the four outer marker corners, in corner order.
///
/// Cell `(cx, cy)` is centred on the integer point `(cx, cy)`, so the outer
/// boundary of the 6×6 grid sits half a cell outside the first and last centres.
pub const GRID_DESTINATION: [[f32; 2]; 4] = [[-0.5, -0.5], [5.5, -0.5], [5.5, 5.5], [-0.5, 5.5]];

/// Maps refined marker corners to a raw (not yet binarized) 6×6 grid.
///
/// Corner `k` must land on grid corner `k`: top-left, top-right,
/// bottom-right, bottom-left.
pub trait MarkerRectifier {
    fn rectify(&self, img: &GrayImageView<'_>, corners: &[Point2<f32>; 4]) -> Option<MarkerGrid>;
}

impl<F> MarkerRectifier for F
where
    F: Fn(&GrayImageView<'_>, &[Point2<f32>; 4]) -> Option<MarkerGrid>,
{
    fn rectify(&self, img: &GrayImageView<'_>, corners: &[Point2<f32>; 4]) -> Option<MarkerGrid> {
        self(img, corners)
    }
}

/// Perspective rectification through a four-point homography, sampling each
/// cell centre bilinearly.
#[derive(Clone, Copy, Debug, Default)]
pub struct HomographyRectifier;

impl MarkerRectifier for HomographyRectifier {
    fn rectify(&self, img: &GrayImageView<'_>, corners: &[Point2<f32>; 4]) -> Option<MarkerGrid> {
        let grid = GRID_DESTINATION.map(|[x, y]| Point2::new(x, y));
        let h_img_from_grid = homography_from_4pt(&grid, corners)?;
        MarkerGrid::from_samples(&sample_grid_gray(img, &h_img_from_grid, GRID_CELLS))
    }
}
