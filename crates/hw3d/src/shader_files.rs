//! Locating shader binaries and sources on disk.

use crate::error::MyResult;
use eyre::eyre;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;

pub const CUBE_VS: &str = "cube_vs";
pub const CUBE_PS: &str = "cube_ps";
pub const TRIANGLE_VS: &str = "triangle_vs";
pub const TRIANGLE_PS: &str = "triangle_ps";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderFile {
    /// Precompiled bytecode (`.cso`).
    Compiled(PathBuf),
    /// HLSL source that still needs compiling.
    Source(PathBuf),
}

impl ShaderFile {
    pub fn path(&self) -> &Path {
        match self {
            ShaderFile::Compiled(path) | ShaderFile::Source(path) => path,
        }
    }
}

/// Directories searched for shaders: next to the executable first, then the
/// crate's `shaders/` directory.
pub fn shader_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        dirs.push(exe_dir.join("shaders"));
        dirs.push(exe_dir);
    }
    dirs.push(Path::new(env!("CARGO_MANIFEST_DIR")).join("shaders"));
    dirs
}

/// Finds `stem` in the first directory that has it, preferring `.cso` over
/// `.hlsl` within a directory.
pub fn locate_shader(stem: &str, dirs: &[PathBuf]) -> MyResult<ShaderFile> {
    for dir in dirs {
        let compiled = dir.join(format!("{stem}.cso"));
        if compiled.is_file() {
            debug!(path = %compiled.display(), "found compiled shader");
            return Ok(ShaderFile::Compiled(compiled));
        }
        let source = dir.join(format!("{stem}.hlsl"));
        if source.is_file() {
            debug!(path = %source.display(), "found shader source");
            return Ok(ShaderFile::Source(source));
        }
    }
    Err(eyre!("shader {stem} not found in {dirs:?}").into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crate_shaders() -> Vec<PathBuf> {
        vec![Path::new(env!("CARGO_MANIFEST_DIR")).join("shaders")]
    }

    #[test]
    fn every_stage_has_a_source_file() {
        for stem in [CUBE_VS, CUBE_PS, TRIANGLE_VS, TRIANGLE_PS] {
            let file = locate_shader(stem, &crate_shaders()).unwrap();
            assert!(file.path().ends_with(format!("{stem}.hlsl")), "{file:?}");
        }
    }

    #[test]
    fn missing_shader_is_an_error() {
        let err = locate_shader("does_not_exist", &crate_shaders()).unwrap_err();
        assert!(err.to_string().contains("does_not_exist"));
    }

    #[test]
    fn crate_directory_is_always_searched() {
        assert!(shader_dirs().contains(&crate_shaders()[0]));
    }
}
