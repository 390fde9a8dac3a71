//! Float tensor view of a finished sheet.
//!
//! Workflow hosts take images as a batch of `height × width × channel`
//! floats in `0.0..=1.0`. [`SheetTensor`] is that layout for a single sheet:
//! shape `[1, height, width, 3]`, row-major, channels interleaved.

use image::RgbImage;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetTensor {
    /// `[batch, height, width, channels]`
    pub shape: [usize; 4],
    pub data: Vec<f32>,
}

impl SheetTensor {
    pub fn from_image(image: &RgbImage) -> Self {
        let (width, height) = image.dimensions();
        let data = image.as_raw().iter().map(|&v| v as f32 / 255.0).collect();
        Self {
            shape: [1, height as usize, width as usize, 3],
            data,
        }
    }

    /// Value at `(y, x, channel)` of the single batch entry.
    pub fn get(&self, y: usize, x: usize, channel: usize) -> Option<f32> {
        let [_, height, width, channels] = self.shape;
        if y >= height || x >= width || channel >= channels {
            return None;
        }
        self.data.get((y * width + x) * channels + channel).copied()
    }
}
