use crate::error::MyResult;
use crate::gfx::created;
use crate::shader_files::ShaderFile;
use crate::shader_files::locate_shader;
use crate::shader_files::shader_dirs;
use tracing::error;
use tracing::info;
use windows::Win32::Graphics::Direct3D::Fxc::*;
use windows::Win32::Graphics::Direct3D::*;
use windows::Win32::Graphics::Direct3D11::*;
use windows::Win32::Graphics::Dxgi::Common::*;
use windows::core::*;

/// `float3 position : POSITION`
pub fn position_layout() -> [D3D11_INPUT_ELEMENT_DESC; 1] {
    [D3D11_INPUT_ELEMENT_DESC {
        SemanticName: s!("POSITION"),
        Format: DXGI_FORMAT_R32G32B32_FLOAT,
        InputSlotClass: D3D11_INPUT_PER_VERTEX_DATA,
        ..Default::default()
    }]
}

/// `float3 position : POSITION`, `float4 color : COLOR`
pub fn color_vertex_layout() -> [D3D11_INPUT_ELEMENT_DESC; 2] {
    [
        D3D11_INPUT_ELEMENT_DESC {
            SemanticName: s!("POSITION"),
            Format: DXGI_FORMAT_R32G32B32_FLOAT,
            InputSlotClass: D3D11_INPUT_PER_VERTEX_DATA,
            ..Default::default()
        },
        D3D11_INPUT_ELEMENT_DESC {
            SemanticName: s!("COLOR"),
            Format: DXGI_FORMAT_R32G32B32A32_FLOAT,
            AlignedByteOffset: 12,
            InputSlotClass: D3D11_INPUT_PER_VERTEX_DATA,
            ..Default::default()
        },
    ]
}

/// Vertex shader, pixel shader and the input layout tying the vertex
/// format to the vertex shader's signature.
pub struct ShaderProgram {
    vertex_shader: ID3D11VertexShader,
    pixel_shader: ID3D11PixelShader,
    input_layout: ID3D11InputLayout,
}

impl ShaderProgram {
    pub fn load(
        device: &ID3D11Device,
        vertex_stem: &str,
        pixel_stem: &str,
        layout: &[D3D11_INPUT_ELEMENT_DESC],
    ) -> MyResult<Self> {
        let dirs = shader_dirs();
        let vertex_blob = load_blob(&locate_shader(vertex_stem, &dirs)?, s!("vs_5_0"))?;
        let pixel_blob = load_blob(&locate_shader(pixel_stem, &dirs)?, s!("ps_5_0"))?;
        let vertex_bytes = blob_bytes(&vertex_blob);
        let pixel_bytes = blob_bytes(&pixel_blob);

        let mut vertex_shader = None;
        unsafe { device.CreateVertexShader(vertex_bytes, None, Some(&mut vertex_shader))? };
        let mut pixel_shader = None;
        unsafe { device.CreatePixelShader(pixel_bytes, None, Some(&mut pixel_shader))? };
        let mut input_layout = None;
        unsafe { device.CreateInputLayout(layout, vertex_bytes, Some(&mut input_layout))? };

        info!(vertex_stem, pixel_stem, "shader program loaded");
        Ok(Self {
            vertex_shader: created(vertex_shader, "vertex shader")?,
            pixel_shader: created(pixel_shader, "pixel shader")?,
            input_layout: created(input_layout, "input layout")?,
        })
    }

    pub fn bind(&self, context: &ID3D11DeviceContext) {
        unsafe {
            context.IASetInputLayout(&self.input_layout);
            context.VSSetShader(&self.vertex_shader, None);
            context.PSSetShader(&self.pixel_shader, None);
        }
    }
}

fn blob_bytes(blob: &ID3DBlob) -> &[u8] {
    unsafe { std::slice::from_raw_parts(blob.GetBufferPointer() as *const u8, blob.GetBufferSize()) }
}

fn load_blob(file: &ShaderFile, target: PCSTR) -> MyResult<ID3DBlob> {
    match file {
        ShaderFile::Compiled(path) => {
            Ok(unsafe { D3DReadFileToBlob(&HSTRING::from(path.as_os_str()))? })
        }
        ShaderFile::Source(path) => {
            let flags = if cfg!(debug_assertions) {
                D3DCOMPILE_DEBUG | D3DCOMPILE_SKIP_OPTIMIZATION
            } else {
                0
            };
            compile_shader(&HSTRING::from(path.as_os_str()), s!("main"), target, flags)
        }
    }
}

fn compile_shader(
    hlsl_path: &HSTRING,
    entry_point: PCSTR,
    target: PCSTR,
    flags: u32,
) -> MyResult<ID3DBlob> {
    let mut shader_blob = None;
    let mut error_blob = None;
    let result = unsafe {
        D3DCompileFromFile(
            hlsl_path,
            None,
            None,
            entry_point,
            target,
            flags,
            0,
            &mut shader_blob,
            Some(&mut error_blob),
        )
    };

    if let Err(e) = result {
        if let Some(error_blob) = error_blob {
            let message = String::from_utf8_lossy(blob_bytes(&error_blob));
            error!(
                "Shader compile error ({hlsl_path} {}): {message}",
                unsafe { target.to_string() }.unwrap_or_default()
            );
        }
        return Err(e.into());
    }
    created(shader_blob, "shader bytecode")
}
