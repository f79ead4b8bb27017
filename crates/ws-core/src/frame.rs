/// RGB color triple.
pub type Rgb = (u8, u8, u8);

/// Reusable pixel canvas. Pre-allocated, never resized in the hot path.
///
/// Stores pixels as RGB row-major, 3 bytes per pixel. The display loop
/// clears and redraws it every iteration; nothing else writes to it.
///
/// # Example
/// ```
/// use ws_core::frame::FrameBuffer;
/// let fb = FrameBuffer::new(10, 10);
/// assert_eq!(fb.data.len(), 300);
/// ```
pub struct FrameBuffer {
    /// Pixels RGB, row-major, 3 bytes per pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
}

impl FrameBuffer {
    /// Create a pre-allocated buffer with the given dimensions, all black.
    ///
    /// # Example
    /// ```
    /// use ws_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::new(100, 50);
    /// assert_eq!(fb.width, 100);
    /// assert_eq!(fb.height, 50);
    /// assert_eq!(fb.data.len(), 100 * 50 * 3);
    /// ```
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: vec![0u8; width * height * 3],
            width,
            height,
        }
    }

    /// Reset every pixel to black. Zero allocation.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Pixel at (x, y) → (r, g, b). Out of bounds reads black.
    ///
    /// # Example
    /// ```
    /// use ws_core::frame::FrameBuffer;
    /// let fb = FrameBuffer::new(10, 10);
    /// assert_eq!(fb.pixel(0, 0), (0, 0, 0));
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        if x >= self.width || y >= self.height {
            return (0, 0, 0);
        }
        let idx = (y * self.width + x) * 3;
        (self.data[idx], self.data[idx + 1], self.data[idx + 2])
    }

    /// Write a pixel at (x, y). Out of bounds writes are dropped.
    ///
    /// # Example
    /// ```
    /// use ws_core::frame::FrameBuffer;
    /// let mut fb = FrameBuffer::new(10, 10);
    /// fb.set_pixel(3, 4, (0, 255, 0));
    /// assert_eq!(fb.pixel(3, 4), (0, 255, 0));
    /// ```
    #[inline(always)]
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Rgb) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y * self.width + x) * 3;
        self.data[idx] = color.0;
        self.data[idx + 1] = color.1;
        self.data[idx + 2] = color.2;
    }

    /// Draw a vertical span of pixels in column `x` from `y0` to `y1`
    /// inclusive, in either order. Used to connect neighboring polyline
    /// points, which always sit one column apart.
    pub fn vline(&mut self, x: usize, y0: usize, y1: usize, color: Rgb) {
        let (lo, hi) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        for y in lo..=hi {
            self.set_pixel(x, y, color);
        }
    }
}
