//! PNG encoding and decoding of RGBA buffers.

use thiserror::Error;

/// Render errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] png::EncodingError),
    #[error("PNG decoding failed: {0}")]
    Decode(#[from] png::DecodingError),
    #[error("Unsupported PNG layout: {0}")]
    UnsupportedFormat(String),
    #[error("Pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// A decoded 8-bit RGBA image.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    /// RGBA pixel data (4 bytes per pixel, not premultiplied).
    pub rgba: Vec<u8>,
}

impl DecodedImage {
    /// RGBA of the pixel at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.rgba.get(offset..offset + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Encode straight (non-premultiplied) RGBA pixels as PNG.
pub fn encode_png(rgba: &[u8], width: u32, height: u32) -> RenderResult<Vec<u8>> {
    let expected = width as usize * height as usize * 4;
    if rgba.len() != expected {
        return Err(RenderError::BufferSize {
            expected,
            actual: rgba.len(),
        });
    }

    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(rgba)?;
        writer.finish()?;
    }
    Ok(png_data)
}

/// Decode an 8-bit RGBA PNG.
pub fn decode_png(bytes: &[u8]) -> RenderResult<DecodedImage> {
    let decoder = png::Decoder::new(bytes);
    let mut reader = decoder.read_info()?;
    let mut rgba = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut rgba)?;

    if info.color_type != png::ColorType::Rgba || info.bit_depth != png::BitDepth::Eight {
        return Err(RenderError::UnsupportedFormat(format!(
            "{:?} at {:?}",
            info.color_type, info.bit_depth
        )));
    }
    rgba.truncate(info.buffer_size());

    Ok(DecodedImage {
        width: info.width,
        height: info.height,
        rgba,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_pixels() {
        let rgba = [
            255, 0, 0, 255, // red
            0, 255, 0, 255, // green
            0, 0, 255, 255, // blue
            0, 0, 0, 0, // transparent
        ];
        let png_data = encode_png(&rgba, 2, 2).unwrap();
        assert!(png_data.starts_with(&[0x89, 0x50, 0x4E, 0x47]));

        let image = decode_png(&png_data).unwrap();
        assert_eq!((image.width, image.height), (2, 2));
        assert_eq!(image.pixel(1, 0), Some([0, 255, 0, 255]));
        assert_eq!(image.pixel(1, 1), Some([0, 0, 0, 0]));
        assert_eq!(image.pixel(2, 0), None);
    }

    #[test]
    fn test_buffer_size_checked() {
        assert!(matches!(
            encode_png(&[0; 8], 2, 2),
            Err(RenderError::BufferSize {
                expected: 16,
                actual: 8
            })
        ));
    }

    #[test]
    fn test_decode_garbage() {
        assert!(matches!(decode_png(b"nope"), Err(RenderError::Decode(_))));
    }
}
