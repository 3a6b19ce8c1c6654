use rayon::prelude::*;

use crate::core::buffer::PixelBuffer;
use crate::core::processing::crop::{crop, validate_region};
use crate::core::processing::grid::compose_grid_with;
use crate::core::processing::normalize::{canvas_size, pad_to_canvas};
use crate::error::Result;
use crate::types::{CanvasSize, CropRegion, ExecutionMode, GridSpec};

/// Normalize every image to the shared canvas and crop `region` from each.
///
/// The region is checked against the canvas once, before any image is touched.
/// Output order follows input order in both execution modes.
pub fn prepare_cells(
    images: Vec<PixelBuffer>,
    region: CropRegion,
    mode: ExecutionMode,
) -> Result<(CanvasSize, Vec<PixelBuffer>)> {
    prepare_first_cells(images, region, mode, usize::MAX)
}

/// Like [`prepare_cells`], but only the first `limit` images are padded and
/// cropped. The canvas is still computed and validated over the whole set.
fn prepare_first_cells(
    mut images: Vec<PixelBuffer>,
    region: CropRegion,
    mode: ExecutionMode,
    limit: usize,
) -> Result<(CanvasSize, Vec<PixelBuffer>)> {
    let canvas = canvas_size(&images)?;
    validate_region(region, canvas.width, canvas.height)?;
    images.truncate(limit);

    let normalize_and_crop = |img: PixelBuffer| -> Result<PixelBuffer> {
        let padded = pad_to_canvas(img, canvas)?;
        crop(&padded, region)
    };

    let cells = match mode {
        ExecutionMode::Sequential => images
            .into_iter()
            .map(normalize_and_crop)
            .collect::<Result<Vec<_>>>()?,
        ExecutionMode::Parallel => images
            .into_par_iter()
            .map(normalize_and_crop)
            .collect::<Result<Vec<_>>>()?,
    };
    Ok((canvas, cells))
}

/// Normalizer -> Cropper -> GridComposer in one call.
pub fn crop_and_grid(
    images: Vec<PixelBuffer>,
    region: CropRegion,
    spec: GridSpec,
    mode: ExecutionMode,
) -> Result<(CanvasSize, PixelBuffer)> {
    spec.validate()?;
    // Cells past the grid capacity would be dropped by the composer anyway.
    let (canvas, cells) = prepare_first_cells(images, region, mode, spec.capacity())?;
    let composed = compose_grid_with(&cells, spec, mode)?;
    Ok((canvas, composed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn solid(w: u32, h: u32, v: u8) -> PixelBuffer {
        PixelBuffer::filled(w, h, [v, v, v, 255]).unwrap()
    }

    #[test]
    fn mixed_sizes_example() {
        let images = vec![
            solid(100, 100, 1),
            solid(200, 150, 2),
            solid(100, 200, 3),
            solid(50, 50, 4),
        ];
        let (canvas, out) = crop_and_grid(
            images,
            CropRegion::new(0, 0, 50, 50),
            GridSpec::new(2, 2),
            ExecutionMode::Sequential,
        )
        .unwrap();
        assert_eq!(canvas, CanvasSize { width: 200, height: 200 });
        assert_eq!(out.dimensions(), (100, 100));
        assert_eq!(out.pixel(0, 0), [1, 1, 1, 255]);
        assert_eq!(out.pixel(49, 49), [1, 1, 1, 255]);
        assert_eq!(out.pixel(50, 0), [2, 2, 2, 255]);
        assert_eq!(out.pixel(0, 50), [3, 3, 3, 255]);
        assert_eq!(out.pixel(99, 99), [4, 4, 4, 255]);
    }

    #[test]
    fn crop_into_padding_is_transparent() {
        let images = vec![solid(4, 4, 9), solid(8, 8, 1)];
        let (_, cells) =
            prepare_cells(images, CropRegion::new(2, 2, 4, 4), ExecutionMode::Sequential).unwrap();
        assert_eq!(cells[0].pixel(0, 0), [9, 9, 9, 255]);
        assert_eq!(cells[0].pixel(2, 2), [0, 0, 0, 0]);
        assert_eq!(cells[1].pixel(3, 3), [1, 1, 1, 255]);
    }

    #[test]
    fn region_is_checked_against_canvas() {
        let images = vec![solid(100, 100, 1)];
        let err = prepare_cells(images, CropRegion::new(90, 0, 20, 20), ExecutionMode::Parallel)
            .unwrap_err();
        assert!(matches!(err, Error::CropOutOfBounds { .. }));
    }

    #[test]
    fn modes_agree() {
        let images: Vec<_> = (0..9u8).map(|i| solid(5 + i as u32, 7 - i as u32 % 3, i)).collect();
        let region = CropRegion::new(1, 1, 4, 3);
        let spec = GridSpec::new(4, 2);
        let seq = crop_and_grid(images.clone(), region, spec, ExecutionMode::Sequential).unwrap();
        let par = crop_and_grid(images, region, spec, ExecutionMode::Parallel).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn surplus_images_still_shape_the_canvas() {
        let images = vec![solid(2, 2, 1), solid(50, 50, 2)];
        let (canvas, out) = crop_and_grid(
            images,
            CropRegion::new(0, 0, 10, 10),
            GridSpec::new(1, 1),
            ExecutionMode::Sequential,
        )
        .unwrap();
        assert_eq!(canvas, CanvasSize { width: 50, height: 50 });
        assert_eq!(out.dimensions(), (10, 10));
        assert_eq!(out.pixel(1, 1), [1, 1, 1, 255]);
        assert_eq!(out.pixel(5, 5), [0, 0, 0, 0]);
    }
}
