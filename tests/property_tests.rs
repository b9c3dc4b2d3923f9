use image::{DynamicImage, GenericImageView};
use img_downsize::input::is_image_mime;
use img_downsize::{
    compress_decoded, download_file_name, original_base_name, target_dimensions,
    CompressorConfig, DecodedImage, OutputFormat, RasterSurface,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn no_resize_within_cap(width in 1u32..=1200u32, height in 1u32..=10_000u32) {
        prop_assert_eq!(target_dimensions(width, height, 1200), (width, height));
    }

    #[test]
    fn wide_images_capped_preserving_aspect(
        width in 1201u32..=20_000u32,
        height in 1u32..=20_000u32
    ) {
        let (new_w, new_h) = target_dimensions(width, height, 1200);
        let expected = (height as f64 * (1200.0 / width as f64)).round().max(1.0) as u32;

        prop_assert_eq!(new_w, 1200);
        prop_assert_eq!(new_h, expected);
        prop_assert!(new_h <= height);
    }

    #[test]
    fn never_upscales(width in 1u32..=5000u32, height in 1u32..=5000u32, cap in 1u32..=5000u32) {
        let (new_w, new_h) = target_dimensions(width, height, cap);
        prop_assert!(new_w <= width);
        prop_assert!(new_h <= height);
        prop_assert!(new_w <= cap);
    }

    #[test]
    fn base_name_strips_last_extension(
        stem in "[a-zA-Z0-9_-]{1,12}(\\.[a-z]{1,4})?",
        ext in "[a-z]{1,4}"
    ) {
        let name = format!("{}.{}", stem, ext);
        prop_assert_eq!(original_base_name(&name), stem);
    }

    #[test]
    fn base_name_without_dot_falls_back(name in "[a-zA-Z0-9_-]{0,16}") {
        prop_assert_eq!(original_base_name(&name), "compressed-image");
    }

    #[test]
    fn download_name_always_jpeg(name in "[a-zA-Z0-9_-]{1,12}\\.(png|gif|bmp|webp|jpg)") {
        let file_name = download_file_name(&original_base_name(&name), OutputFormat::Jpeg);
        prop_assert!(file_name.ends_with("_compressed.jpeg"));
    }

    #[test]
    fn only_image_mime_types_accepted(
        subtype in "[a-z+.-]{1,10}",
        top in prop::sample::select(&["image", "text", "application", "video"])
    ) {
        let mime = format!("{}/{}", top, subtype);
        prop_assert_eq!(is_image_mime(&mime), top == "image");
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn encoded_output_matches_planned_dimensions(
        width in 1u32..=1600u32,
        height in 1u32..=400u32
    ) {
        let decoded = DecodedImage::new(DynamicImage::new_rgb8(width, height));
        let mut surface = RasterSurface::new();

        let config = CompressorConfig::default();
        let result = compress_decoded(&decoded, &mut surface, &config).unwrap();
        let reloaded = image::load_from_memory(&result.bytes).unwrap();

        prop_assert_eq!(reloaded.dimensions(), target_dimensions(width, height, 1200));
        prop_assert_eq!((result.width, result.height), reloaded.dimensions());
    }
}
