use image::imageops::FilterType;
use tch::{Kind, Tensor};

pub const INPUT_SIZE: u32 = 224;

/// Decodes raw upload bytes into the `[1, 3, 224, 224]` float tensor the
/// classifier was trained on: 3-channel RGB, bilinear resize, pixel values
/// scaled into `[0, 1]`, leading batch dimension.
pub fn preprocess(bytes: &[u8]) -> Result<Tensor, image::ImageError> {
    let img = image::load_from_memory(bytes)?
        .resize_exact(INPUT_SIZE, INPUT_SIZE, FilterType::Triangle)
        .to_rgb8();

    let tensor = Tensor::from_slice(img.as_raw())
        .view([INPUT_SIZE as i64, INPUT_SIZE as i64, 3])
        .permute([2, 0, 1])
        .to_kind(Kind::Float)
        / 255.0;

    Ok(tensor.unsqueeze(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};
    use std::io::Cursor;

    fn sample_png() -> Vec<u8> {
        let img = RgbImage::from_fn(64, 48, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        });
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn produces_batched_rgb_tensor() {
        let tensor = preprocess(&sample_png()).unwrap();
        assert_eq!(tensor.size(), vec![1, 3, 224, 224]);
        assert_eq!(tensor.kind(), Kind::Float);
    }

    #[test]
    fn pixel_values_are_normalized() {
        let tensor = preprocess(&sample_png()).unwrap();
        assert!(tensor.max().double_value(&[]) <= 1.0);
        assert!(tensor.min().double_value(&[]) >= 0.0);
    }

    #[test]
    fn is_deterministic_for_identical_bytes() {
        let bytes = sample_png();
        let first: Vec<f32> = (&preprocess(&bytes).unwrap().reshape([-1]))
            .try_into()
            .unwrap();
        let second: Vec<f32> = (&preprocess(&bytes).unwrap().reshape([-1]))
            .try_into()
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn rejects_non_image_bytes() {
        assert!(preprocess(b"definitely not an image").is_err());
    }
}
