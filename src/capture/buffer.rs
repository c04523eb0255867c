//! Reusable pixel buffer for preview-frame sampling.

/// An owned pixel buffer sized to the camera's preview resolution.
///
/// Pixels are packed 32-bit ARGB, one `u32` per pixel. A session
/// allocates one buffer when the device reports ready and refills it
/// on every polling tick, so no per-frame allocation occurs.
#[derive(Clone)]
pub struct FrameBuffer {
    /// Packed ARGB32 pixel data, `width * height` entries.
    pixels: Vec<u32>,
    /// Frame width in pixels.
    width: u32,
    /// Frame height in pixels.
    height: u32,
}

impl FrameBuffer {
    /// Creates a zeroed buffer for the given preview resolution.
    pub fn new(width: u32, height: u32) -> Self {
        let pixel_count = (width as usize) * (height as usize);
        Self {
            pixels: vec![0u32; pixel_count],
            width,
            height,
        }
    }

    /// Returns a reference to the packed ARGB32 pixel data.
    #[inline]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Returns a mutable reference for a frame source to fill.
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    /// Returns the buffer width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the buffer height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the total number of pixels (width * height).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Validates that the pixel storage matches the declared dimensions.
    pub fn is_valid(&self) -> bool {
        self.pixels.len() == self.pixel_count()
    }
}

impl std::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pixels", &self.pixels.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_creation() {
        let buffer = FrameBuffer::new(640, 480);

        assert_eq!(buffer.width(), 640);
        assert_eq!(buffer.height(), 480);
        assert_eq!(buffer.pixel_count(), 640 * 480);
        assert!(buffer.is_valid());
        assert!(buffer.pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_buffer_refill_keeps_dimensions() {
        let mut buffer = FrameBuffer::new(8, 8);
        for px in buffer.pixels_mut() {
            *px = 0xFF00_FF00;
        }

        assert!(buffer.is_valid());
        assert_eq!(buffer.pixels()[0], 0xFF00_FF00);
    }
}
