/// Upscaling factor used when rasterizing a view for export. Fixed at 2x to
/// keep text legible once the image is shrunk onto the page.
pub const EXPORT_RASTER_SCALE: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterOptions {
    pub scale: f32,
    /// Whether images from other origins may be drawn into the raster.
    pub allow_cross_origin: bool,
}

impl RasterOptions {
    pub fn for_export() -> Self {
        Self {
            scale: EXPORT_RASTER_SCALE,
            allow_cross_origin: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error("view has nothing to render")]
    EmptyView,
    #[error("invalid raster scale {0}")]
    InvalidScale(f32),
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
    #[error("render backend failed: {0}")]
    Backend(String),
}

/// An 8-bit RGB raster, rows top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    rgb: Vec<u8>,
}

impl RasterImage {
    pub fn new(width: u32, height: u32, rgb: Vec<u8>) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::EmptyView);
        }
        let expected = width as usize * height as usize * 3;
        if rgb.len() != expected {
            return Err(RenderError::BufferSize {
                expected,
                actual: rgb.len(),
            });
        }
        Ok(Self { width, height, rgb })
    }

    /// A raster filled with a single colour.
    pub fn filled(width: u32, height: u32, color: [u8; 3]) -> Result<Self, RenderError> {
        let pixels = width as usize * height as usize;
        let rgb = color.iter().copied().cycle().take(pixels * 3).collect();
        Self::new(width, height, rgb)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rgb(&self) -> &[u8] {
        &self.rgb
    }

    /// Fills a rectangle, clipped to the image bounds.
    pub fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: [u8; 3]) {
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);
        for row in y.min(self.height)..y_end {
            let start = (row as usize * self.width as usize + x as usize) * 3;
            for col in 0..x_end.saturating_sub(x) as usize {
                let offset = start + col * 3;
                self.rgb[offset..offset + 3].copy_from_slice(&color);
            }
        }
    }
}

/// A rendered, on-screen representation of a roadmap that can be captured
/// as a raster. Implementations must not change what they display.
pub trait RenderedView: Send + Sync {
    fn rasterize(&self, options: &RasterOptions) -> Result<RasterImage, RenderError>;
}

/// Scales a logical dimension by `scale`, rejecting non-positive or
/// non-finite factors.
pub fn scaled_dimension(logical: u32, scale: f32) -> Result<u32, RenderError> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(RenderError::InvalidScale(scale));
    }
    Ok((logical as f32 * scale).round().max(1.0) as u32)
}
