/// Image preprocessing
///
/// Turns a decoded image of arbitrary size and format into the fixed-shape
/// normalized tensor the model expects:
/// - convert to a canonical 4-channel 8-bit buffer (always a copy, the
///   original stays untouched for display)
/// - resize to the model's input dimensions with a direct non-uniform
///   scale (no aspect-ratio preservation, no letterboxing)
/// - rescale intensities with (raw - mean) / scale into a float NHWC tensor

use image::{imageops::FilterType, DynamicImage, RgbaImage};
use tract_onnx::prelude::*;

use super::model::ModelSpec;

/// Produce the canonical fixed-size RGBA buffer for a decoded image
pub fn canonical(image: &DynamicImage, spec: &ModelSpec) -> RgbaImage {
    // to_rgba8 copies, so the caller's image survives for display
    let rgba = image.to_rgba8();
    image::imageops::resize(
        &rgba,
        spec.input_width,
        spec.input_height,
        FilterType::Triangle,
    )
}

/// Rescale one raw 8-bit intensity into the model's normalized range
///
/// With the bundled model's constants (127.5 / 127.5) this maps
/// 0 -> -1.0 and 255 -> 1.0.
pub fn normalize(raw: u8, spec: &ModelSpec) -> f32 {
    (raw as f32 - spec.norm_mean) / spec.norm_scale
}

/// Build the model input tensor from a canonical buffer
///
/// Reads the first `spec.channels` channels of each pixel (RGB out of
/// RGBA) in NHWC order.
pub fn to_tensor(canonical: &RgbaImage, spec: &ModelSpec) -> Tensor {
    let height = spec.input_height as usize;
    let width = spec.input_width as usize;
    let channels = spec.channels;

    tract_ndarray::Array4::from_shape_fn((1, height, width, channels), |(_, y, x, c)| {
        normalize(canonical.get_pixel(x as u32, y as u32)[c], spec)
    })
    .into_tensor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn solid_image(width: u32, height: u32, pixel: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(pixel)))
    }

    #[test]
    fn test_canonical_is_fixed_size_for_any_input() {
        let spec = ModelSpec::default();

        for (w, h) in [(1, 1), (37, 91), (224, 224), (640, 480), (3000, 11)] {
            let out = canonical(&solid_image(w, h, [10, 20, 30]), &spec);
            assert_eq!(out.width(), 224);
            assert_eq!(out.height(), 224);
        }
    }

    #[test]
    fn test_canonical_does_not_mutate_the_original() {
        let spec = ModelSpec::default();
        let original = solid_image(50, 50, [200, 100, 50]);

        let _ = canonical(&original, &spec);

        assert_eq!(original.width(), 50);
        assert_eq!(original.height(), 50);
        assert_eq!(original.to_rgb8().get_pixel(0, 0).0, [200, 100, 50]);
    }

    #[test]
    fn test_normalization_endpoints() {
        let spec = ModelSpec::default();

        assert_eq!(normalize(0, &spec), -1.0);
        assert!((normalize(255, &spec) - 1.0).abs() < 1e-6);
        assert!(normalize(127, &spec).abs() < 0.005);
        assert!(normalize(128, &spec).abs() < 0.005);
    }

    #[test]
    fn test_tensor_shape_and_values() {
        let spec = ModelSpec::default();
        // Black image: every normalized value must be exactly -1.0
        let buffer = canonical(&solid_image(10, 10, [0, 0, 0]), &spec);

        let tensor = to_tensor(&buffer, &spec);
        assert_eq!(tensor.shape(), &[1usize, 224, 224, 3][..]);

        let view = tensor.to_array_view::<f32>().unwrap();
        assert!(view.iter().all(|&v| v == -1.0));
    }

    #[test]
    fn test_tensor_channel_order_is_rgb() {
        let spec = ModelSpec::default();
        let buffer = canonical(&solid_image(224, 224, [255, 0, 255]), &spec);

        let tensor = to_tensor(&buffer, &spec);
        let view = tensor.to_array_view::<f32>().unwrap();

        assert!((view[[0, 0, 0, 0]] - 1.0).abs() < 1e-6); // R
        assert_eq!(view[[0, 0, 0, 1]], -1.0); // G
        assert!((view[[0, 0, 0, 2]] - 1.0).abs() < 1e-6); // B
    }
}
