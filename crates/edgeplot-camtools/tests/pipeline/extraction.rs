use edgeplot_camtools::{
    CamToolError, ClusteringParameters, DensityParameters, EdgePointExtractor,
    ExtractionParameters, SynthesisParameters, ToolpathSynthesizer,
};
use edgeplot_core::Point;
use image::{DynamicImage, GrayImage, Luma};

fn two_lines() -> GrayImage {
    let mut img = GrayImage::new(32, 32);
    for column in 2..12 {
        img.put_pixel(column, 4, Luma([255]));
    }
    for row in 16..28 {
        img.put_pixel(24, row, Luma([200]));
    }
    img
}

fn edge_map_extractor() -> EdgePointExtractor {
    EdgePointExtractor::new(ExtractionParameters {
        edge_detect: false,
        ..Default::default()
    })
}

fn density(eps: f64, min_samples: usize) -> ToolpathSynthesizer {
    ToolpathSynthesizer::new(&SynthesisParameters {
        clustering: ClusteringParameters::Density(DensityParameters { eps, min_samples }),
        ..Default::default()
    })
    .unwrap()
}

#[test]
fn test_extract_and_synthesize_two_lines() {
    let points = edge_map_extractor()
        .extract(&DynamicImage::ImageLuma8(two_lines()))
        .unwrap();
    assert_eq!(points.len(), 22);
    // (row, column) of the first lit pixel
    assert_eq!(points.get(0), Some(&Point::new(4, 2)));

    let toolpath = density(1.5, 2).synthesize(&points).unwrap();

    assert_eq!(toolpath.stroke_count(), 2);
    assert_eq!(toolpath.noise_count, 0);
    assert_eq!(toolpath.command_count(), 22);
}

#[test]
fn test_canny_outline_of_filled_shape() {
    let mut img = GrayImage::new(48, 48);
    for row in 12..36 {
        for column in 8..40 {
            img.put_pixel(column, row, Luma([255]));
        }
    }
    let img = DynamicImage::ImageLuma8(img);

    let filled = edge_map_extractor().extract(&img).unwrap();
    let outline = EdgePointExtractor::default().extract(&img).unwrap();
    assert_eq!(filled.len(), 24 * 32);
    assert!(!outline.is_empty());
    assert!(outline.len() < filled.len() / 2);
    assert!(!outline.contains(&Point::new(24, 24)));

    let toolpath = density(1.5, 2).synthesize(&outline).unwrap();
    assert!(toolpath.stroke_count() >= 1);
}

#[test]
fn test_rgb_images_are_reduced_to_luma() {
    let mut rgb = image::RgbImage::new(3, 1);
    rgb.put_pixel(1, 0, image::Rgb([255, 255, 255]));
    let points = edge_map_extractor()
        .extract(&DynamicImage::ImageRgb8(rgb))
        .unwrap();
    assert_eq!(points.as_slice(), &[Point::new(0, 1)]);
}

#[test]
fn test_missing_file_is_an_error() {
    let err = EdgePointExtractor::default()
        .extract_file("/definitely/not/here.png")
        .unwrap_err();
    assert!(matches!(err, CamToolError::IoError(_)));
}
