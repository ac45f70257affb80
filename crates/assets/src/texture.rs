use crate::fs::{AssetFs, AssetPath};
use crate::AssetError;

/// Decoded 8-bit RGBA image, rows top to bottom unless flipped on load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl TextureImage {
    /// Decode PNG or JPEG bytes. `flip_vertically` puts the bottom row first,
    /// matching texture coordinates whose V axis points up.
    pub fn decode(bytes: &[u8], flip_vertically: bool) -> Result<Self, AssetError> {
        let mut img = image::load_from_memory(bytes)?;
        if flip_vertically {
            img = img.flipv();
        }
        let rgba = img.to_rgba8();
        Ok(Self {
            width: rgba.width(),
            height: rgba.height(),
            pixels: rgba.into_raw(),
        })
    }

    /// Read and decode a texture from the virtual filesystem.
    pub fn load(fs: &AssetFs, path: &AssetPath, flip_vertically: bool) -> Result<Self, AssetError> {
        let bytes = fs.read_bytes(path)?;
        let texture = Self::decode(&bytes, flip_vertically)?;
        tracing::debug!("decoded {} ({}x{})", path, texture.width, texture.height);
        Ok(texture)
    }

    /// Square checkerboard of `cells` x `cells` squares, used when a texture
    /// file is missing.
    pub fn checkerboard(size: u32, cells: u32, a: [u8; 4], b: [u8; 4]) -> Self {
        let size = size.max(1);
        let cell = (size / cells.max(1)).max(1);
        let mut pixels = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let color = if ((x / cell) + (y / cell)) % 2 == 0 { a } else { b };
                pixels.extend_from_slice(&color);
            }
        }
        Self {
            width: size,
            height: size,
            pixels,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        let p = &self.pixels[i..i + 4];
        Some([p[0], p[1], p[2], p[3]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    const RED: [u8; 4] = [255, 0, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];

    /// 1x2 PNG: red on top, blue below.
    fn two_row_png() -> Vec<u8> {
        let mut img = RgbaImage::new(1, 2);
        img.put_pixel(0, 0, Rgba(RED));
        img.put_pixel(0, 1, Rgba(BLUE));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn decode_png() {
        let tex = TextureImage::decode(&two_row_png(), false).unwrap();
        assert_eq!((tex.width, tex.height), (1, 2));
        assert_eq!(tex.pixels.len(), 8);
        assert_eq!(tex.pixel(0, 0), Some(RED));
        assert_eq!(tex.pixel(0, 1), Some(BLUE));
    }

    #[test]
    fn decode_flipped() {
        let tex = TextureImage::decode(&two_row_png(), true).unwrap();
        assert_eq!(tex.pixel(0, 0), Some(BLUE));
        assert_eq!(tex.pixel(0, 1), Some(RED));
    }

    #[test]
    fn decode_garbage_fails() {
        let err = TextureImage::decode(b"not an image", false).unwrap_err();
        assert!(matches!(err, AssetError::Image(_)));
    }

    #[test]
    fn load_through_fs() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("textures")).unwrap();
        std::fs::write(dir.path().join("textures/pair.png"), two_row_png()).unwrap();

        let mut fs = AssetFs::new();
        fs.mount(dir.path()).unwrap();
        let tex = TextureImage::load(&fs, &AssetPath::texture("pair.png").unwrap(), false).unwrap();
        assert_eq!(tex.height, 2);
    }

    #[test]
    fn checkerboard_alternates() {
        let tex = TextureImage::checkerboard(8, 2, RED, BLUE);
        assert_eq!(tex.pixels.len(), 8 * 8 * 4);
        assert_eq!(tex.pixel(0, 0), Some(RED));
        assert_eq!(tex.pixel(4, 0), Some(BLUE));
        assert_eq!(tex.pixel(4, 4), Some(RED));
        assert_eq!(tex.pixel(8, 0), None);
    }

    #[test]
    fn checkerboard_tolerates_zero_sizes() {
        let tex = TextureImage::checkerboard(0, 0, RED, BLUE);
        assert_eq!((tex.width, tex.height), (1, 1));
    }
}
