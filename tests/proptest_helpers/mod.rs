#![allow(dead_code)]

use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};
use sazan::{CropRegion, GridSpec, PixelBuffer};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Buffer of the given size with arbitrary pixel bytes.
pub fn arb_buffer_of(width: u32, height: u32) -> impl Strategy<Value = PixelBuffer> {
    let len = (width * height * 4) as usize;
    proptest::collection::vec(any::<u8>(), len)
        .prop_map(move |data| PixelBuffer::from_raw(width, height, data).expect("sized buffer"))
}

/// Small buffer with arbitrary, non-zero dimensions.
pub fn arb_buffer(max_side: u32) -> impl Strategy<Value = PixelBuffer> {
    (1..=max_side, 1..=max_side).prop_flat_map(|(w, h)| arb_buffer_of(w, h))
}

pub fn arb_image_set(max_images: usize, max_side: u32) -> impl Strategy<Value = Vec<PixelBuffer>> {
    proptest::collection::vec(arb_buffer(max_side), 1..=max_images)
}

pub fn arb_grid(max: u32) -> impl Strategy<Value = GridSpec> {
    (1..=max, 1..=max).prop_map(|(cols, rows)| GridSpec::new(cols, rows))
}

/// Non-empty region fitting inside `width x height`.
pub fn arb_region_within(width: u32, height: u32) -> impl Strategy<Value = CropRegion> {
    (0..width, 0..height).prop_flat_map(move |(left, top)| {
        (1..=width - left, 1..=height - top)
            .prop_map(move |(w, h)| CropRegion::new(left, top, w, h))
    })
}

/// Canvas-sized maximum over a set.
pub fn max_dimensions(images: &[PixelBuffer]) -> (u32, u32) {
    images.iter().fold((0, 0), |(w, h), img| {
        (w.max(img.width()), h.max(img.height()))
    })
}
