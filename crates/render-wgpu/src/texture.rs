use sandbox_assets::{AssetFs, AssetPath, TextureImage};
use wgpu::util::DeviceExt;

/// Base texture of every object.
pub const BASE_TEXTURE: &str = "container.jpg";
/// Texture blended on top of the base at 20%.
pub const OVERLAY_TEXTURE: &str = "awesomeface.png";

const FALLBACK_SIZE: u32 = 64;
const FALLBACK_CELLS: u32 = 8;

/// Decode `textures/<name>`, or a checkerboard in `colors` when it is
/// missing or unreadable. Images are flipped so V points up.
pub fn load_or_fallback(fs: &AssetFs, name: &str, colors: [[u8; 4]; 2]) -> TextureImage {
    let loaded = AssetPath::texture(name).and_then(|path| TextureImage::load(fs, &path, true));
    match loaded {
        Ok(image) => image,
        Err(e) => {
            tracing::warn!("texture '{name}' unavailable ({e}), using checkerboard");
            TextureImage::checkerboard(FALLBACK_SIZE, FALLBACK_CELLS, colors[0], colors[1])
        }
    }
}

/// A sampled 2D texture on the GPU.
pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

impl GpuTexture {
    pub fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &TextureImage,
        label: &str,
    ) -> Self {
        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some(label),
                size: wgpu::Extent3d {
                    width: image.width,
                    height: image.height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            &image.pixels,
        );
        let view = texture.create_view(&Default::default());
        Self { texture, view }
    }
}

/// Repeat-wrapped linear sampler shared by both textures.
pub fn create_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("scene_sampler"),
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Nearest,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORANGE: [u8; 4] = [200, 120, 40, 255];
    const BROWN: [u8; 4] = [90, 60, 30, 255];

    #[test]
    fn missing_texture_falls_back() {
        let image = load_or_fallback(&AssetFs::new(), BASE_TEXTURE, [ORANGE, BROWN]);
        assert_eq!((image.width, image.height), (FALLBACK_SIZE, FALLBACK_SIZE));
        assert_eq!(image.pixel(0, 0), Some(ORANGE));
        assert_eq!(image.pixel(FALLBACK_SIZE / FALLBACK_CELLS, 0), Some(BROWN));
    }

    #[test]
    fn undecodable_texture_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("textures")).unwrap();
        std::fs::write(dir.path().join("textures").join(OVERLAY_TEXTURE), b"garbage").unwrap();
        let mut fs = AssetFs::new();
        fs.mount(dir.path()).unwrap();
        let image = load_or_fallback(&fs, OVERLAY_TEXTURE, [ORANGE, BROWN]);
        assert_eq!(image.width, FALLBACK_SIZE);
    }
}
