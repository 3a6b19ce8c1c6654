use crate::error::{Error, Result};

/// Bytes per RGBA8 pixel.
pub const CHANNELS: usize = 4;

/// Interleaved RGBA8 raster. `data.len() == width * height * 4` always holds.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

/// Byte length of a `width x height` RGBA8 raster, `None` on overflow.
pub fn byte_len(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(CHANNELS)
}

impl PixelBuffer {
    /// Wrap raw RGBA8 bytes, checking the length against the dimensions.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = byte_len(width, height).ok_or_else(|| {
            Error::DimensionOverflow(format!("{}x{} RGBA buffer", width, height))
        })?;
        if data.len() != expected {
            return Err(Error::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Fully transparent buffer (all channels zero).
    pub fn transparent(width: u32, height: u32) -> Result<Self> {
        let len = byte_len(width, height).ok_or_else(|| {
            Error::DimensionOverflow(format!("{}x{} RGBA buffer", width, height))
        })?;
        Ok(Self {
            width,
            height,
            data: vec![0u8; len],
        })
    }

    /// Buffer filled with one RGBA value.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self> {
        let mut buf = Self::transparent(width, height)?;
        for px in buf.data.chunks_exact_mut(CHANNELS) {
            px.copy_from_slice(&rgba);
        }
        Ok(buf)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Bytes of one pixel row.
    pub fn stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * CHANNELS;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    pub fn put_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let i = (y as usize * self.width as usize + x as usize) * CHANNELS;
        self.data[i..i + CHANNELS].copy_from_slice(&rgba);
    }

    /// Copy `src` unscaled into this buffer with its top-left corner at `(x, y)`.
    ///
    /// The caller guarantees that `src` fits; every stage validates geometry
    /// before blitting.
    pub(crate) fn blit(&mut self, src: &PixelBuffer, x: u32, y: u32) {
        let dst_stride = self.stride();
        let src_stride = src.stride();
        let x_off = x as usize * CHANNELS;
        for row in 0..src.height as usize {
            let dst_start = (y as usize + row) * dst_stride + x_off;
            let src_start = row * src_stride;
            self.data[dst_start..dst_start + src_stride]
                .copy_from_slice(&src.data[src_start..src_start + src_stride]);
        }
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_checks_length() {
        assert!(PixelBuffer::from_raw(2, 2, vec![0; 16]).is_ok());
        let err = PixelBuffer::from_raw(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(
            err,
            Error::BufferSizeMismatch {
                expected: 16,
                actual: 15
            }
        ));
    }

    #[test]
    fn transparent_is_zeroed() {
        let buf = PixelBuffer::transparent(3, 2).unwrap();
        assert_eq!(buf.as_bytes().len(), 24);
        assert!(buf.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn pixel_access() {
        let mut buf = PixelBuffer::filled(2, 2, [1, 2, 3, 4]).unwrap();
        buf.put_pixel(1, 1, [9, 9, 9, 9]);
        assert_eq!(buf.pixel(0, 0), [1, 2, 3, 4]);
        assert_eq!(buf.pixel(1, 1), [9, 9, 9, 9]);
        assert_eq!(&buf.row(1)[4..], &[9, 9, 9, 9]);
    }

    #[test]
    fn blit_places_source_at_offset() {
        let mut dst = PixelBuffer::transparent(4, 4).unwrap();
        let src = PixelBuffer::filled(2, 1, [7, 7, 7, 7]).unwrap();
        dst.blit(&src, 1, 2);
        assert_eq!(dst.pixel(1, 2), [7, 7, 7, 7]);
        assert_eq!(dst.pixel(2, 2), [7, 7, 7, 7]);
        assert_eq!(dst.pixel(0, 2), [0, 0, 0, 0]);
        assert_eq!(dst.pixel(3, 2), [0, 0, 0, 0]);
        assert_eq!(dst.pixel(1, 1), [0, 0, 0, 0]);
    }
}
