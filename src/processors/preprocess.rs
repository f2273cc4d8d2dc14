//! Image preprocessing for the classifier.
//!
//! Decodes uploaded bytes, resizes to the model's training resolution, scales
//! pixel intensities into `[0, 1]`, and adds a leading batch axis. The output
//! layout is NHWC to match the model's channels-last input.

use crate::core::errors::ClassifierError;
use image::imageops::FilterType;
use image::RgbImage;
use ndarray::Array4;

/// Converts raw image bytes into a normalized `(1, H, W, 3)` tensor.
///
/// Resizing uses a fixed target resolution and ignores the source aspect
/// ratio, matching what the model saw during training.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    width: u32,
    height: u32,
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self {
            width: crate::core::DEFAULT_INPUT_SHAPE.0,
            height: crate::core::DEFAULT_INPUT_SHAPE.1,
        }
    }
}

impl Preprocessor {
    /// Creates a preprocessor targeting the given (width, height).
    pub fn new(width: u32, height: u32) -> Result<Self, ClassifierError> {
        if width == 0 || height == 0 {
            return Err(ClassifierError::config_error_with_context(
                "input_shape",
                &format!("({width}, {height})"),
                "dimensions must be greater than 0",
            ));
        }
        Ok(Self { width, height })
    }

    /// Returns the target (width, height).
    pub fn input_shape(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Decodes image bytes into an 8-bit RGB image.
    ///
    /// Any encoding supported by the image crate is accepted. Unparseable
    /// bytes yield [`ClassifierError::ImageDecode`].
    pub fn decode(&self, bytes: &[u8]) -> Result<RgbImage, ClassifierError> {
        let img = image::load_from_memory(bytes).map_err(ClassifierError::ImageDecode)?;
        Ok(img.to_rgb8())
    }

    /// Runs the full preprocessing pipeline: decode, resize, normalize, batch.
    ///
    /// The result always has shape `(1, height, width, 3)` with every value
    /// in `[0, 1]`, and the same bytes always produce a bit-identical tensor.
    pub fn process(&self, bytes: &[u8]) -> Result<Array4<f32>, ClassifierError> {
        let img = self.decode(bytes)?;
        let resized = image::imageops::resize(&img, self.width, self.height, FilterType::Lanczos3);

        let (w, h) = (self.width as usize, self.height as usize);
        let mut data = Vec::with_capacity(h * w * 3);
        for pixel in resized.pixels() {
            for c in 0..3 {
                data.push(f32::from(pixel[c]) / 255.0);
            }
        }

        let tensor = Array4::from_shape_vec((1, h, w, 3), data)?;

        tracing::debug!(shape = ?tensor.shape(), "preprocessed image tensor");
        Ok(tensor)
    }
}
