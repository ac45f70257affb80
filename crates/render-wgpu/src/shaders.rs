use sandbox_assets::{AssetError, AssetFs, AssetPath};

use crate::RenderError;

/// File name of the scene shader under `shaders/`.
pub const SCENE_SHADER_FILE: &str = "scene.wgsl";

/// Built-in copy of the scene shader, used when no content root provides one.
pub const SCENE_SHADER: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../contents/shaders/scene.wgsl"
));

pub const VERTEX_ENTRY: &str = "vs_main";
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// Scene shader source from the content root, or the built-in copy when the
/// file is absent. Read errors other than a missing file are returned.
pub fn load_scene_shader(fs: &AssetFs) -> Result<String, RenderError> {
    let path = AssetPath::shader(SCENE_SHADER_FILE)?;
    match fs.read_string(&path) {
        Ok(source) => {
            tracing::debug!("loaded shader {path}");
            Ok(source)
        }
        Err(AssetError::NotFound(_)) => {
            tracing::debug!("{path} not found, using built-in shader");
            Ok(SCENE_SHADER.to_string())
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_shader_has_entry_points() {
        assert!(SCENE_SHADER.contains(&format!("fn {VERTEX_ENTRY}(")));
        assert!(SCENE_SHADER.contains(&format!("fn {FRAGMENT_ENTRY}(")));
        assert!(SCENE_SHADER.contains("mix(base, overlay, 0.2)"));
    }

    #[test]
    fn falls_back_to_builtin() {
        let fs = AssetFs::new();
        assert_eq!(load_scene_shader(&fs).unwrap(), SCENE_SHADER);
    }

    #[test]
    fn prefers_content_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("shaders")).unwrap();
        std::fs::write(dir.path().join("shaders").join(SCENE_SHADER_FILE), "// edited").unwrap();
        let mut fs = AssetFs::new();
        fs.mount(dir.path()).unwrap();
        assert_eq!(load_scene_shader(&fs).unwrap(), "// edited");
    }
}
