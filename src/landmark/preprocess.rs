use image::imageops::FilterType;
use image::RgbImage;
use ndarray::Array4;

/// RGB 画像をランドマーカー入力テンソルに変換
///
/// - size×size にバイリニアリサイズ
/// - [1, size, size, 3] の f32 テンソル (0.0〜1.0)
pub fn preprocess(frame: &RgbImage, size: u32) -> Array4<f32> {
    let resized = image::imageops::resize(frame, size, size, FilterType::Triangle);

    let mut tensor = Array4::<f32>::zeros((1, size as usize, size as usize, 3));
    for (x, y, pixel) in resized.enumerate_pixels() {
        for c in 0..3 {
            tensor[[0, y as usize, x as usize, c]] = pixel.0[c] as f32 / 255.0;
        }
    }

    tensor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preprocess_shape() {
        let frame = RgbImage::new(64, 48);
        let tensor = preprocess(&frame, 32);
        assert_eq!(tensor.shape(), &[1, 32, 32, 3]);
    }

    #[test]
    fn test_preprocess_normalizes() {
        let mut frame = RgbImage::new(8, 8);
        for pixel in frame.pixels_mut() {
            pixel.0 = [255, 0, 128];
        }
        let tensor = preprocess(&frame, 8);
        assert!((tensor[[0, 0, 0, 0]] - 1.0).abs() < 1e-6);
        assert!(tensor[[0, 0, 0, 1]].abs() < 1e-6);
        assert!((tensor[[0, 0, 0, 2]] - 128.0 / 255.0).abs() < 0.01);
    }
}
