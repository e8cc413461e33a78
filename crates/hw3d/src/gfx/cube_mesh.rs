use crate::error::MyResult;
use crate::geometry::CUBE_INDICES;
use crate::geometry::CUBE_VERTICES;
use crate::geometry::FaceColorConstants;
use crate::geometry::TransformConstants;
use crate::geometry::Vertex;
use crate::gfx::buffers::create_constant_buffer;
use crate::gfx::buffers::create_index_buffer;
use crate::gfx::buffers::create_vertex_buffer;
use crate::gfx::buffers::update_constant_buffer;
use crate::math::to_gpu;
use bevy_math::Mat4;
use windows::Win32::Graphics::Direct3D::*;
use windows::Win32::Graphics::Direct3D11::*;
use windows::Win32::Graphics::Dxgi::Common::*;

/// GPU buffers for one cube. The transform buffer is dynamic and rewritten
/// before every draw.
pub struct CubeMesh {
    vertex_buffer: ID3D11Buffer,
    index_buffer: ID3D11Buffer,
    transform_buffer: ID3D11Buffer,
    face_color_buffer: ID3D11Buffer,
}

impl CubeMesh {
    pub fn new(device: &ID3D11Device) -> MyResult<Self> {
        Ok(Self {
            vertex_buffer: create_vertex_buffer(device, &CUBE_VERTICES)?,
            index_buffer: create_index_buffer(device, &CUBE_INDICES)?,
            transform_buffer: create_constant_buffer(
                device,
                &TransformConstants {
                    transform: to_gpu(&Mat4::IDENTITY),
                },
                true,
            )?,
            face_color_buffer: create_constant_buffer(
                device,
                &FaceColorConstants::default(),
                false,
            )?,
        })
    }

    /// Draws with the cube shader program already bound.
    pub fn draw(&self, context: &ID3D11DeviceContext, transform: &Mat4) -> MyResult<()> {
        update_constant_buffer(
            context,
            &self.transform_buffer,
            &TransformConstants {
                transform: to_gpu(transform),
            },
        )?;
        bind_and_draw(
            context,
            &self.vertex_buffer,
            &self.index_buffer,
            &self.transform_buffer,
            &self.face_color_buffer,
        );
        Ok(())
    }
}

/// Builds every buffer for a single draw and lets them go afterwards.
pub fn draw_immediate_cube(
    device: &ID3D11Device,
    context: &ID3D11DeviceContext,
    transform: &Mat4,
) -> MyResult<()> {
    let vertex_buffer = create_vertex_buffer(device, &CUBE_VERTICES)?;
    let index_buffer = create_index_buffer(device, &CUBE_INDICES)?;
    let transform_buffer = create_constant_buffer(
        device,
        &TransformConstants {
            transform: to_gpu(transform),
        },
        false,
    )?;
    let face_color_buffer = create_constant_buffer(device, &FaceColorConstants::default(), false)?;
    bind_and_draw(
        context,
        &vertex_buffer,
        &index_buffer,
        &transform_buffer,
        &face_color_buffer,
    );
    Ok(())
}

fn bind_and_draw(
    context: &ID3D11DeviceContext,
    vertex_buffer: &ID3D11Buffer,
    index_buffer: &ID3D11Buffer,
    transform_buffer: &ID3D11Buffer,
    face_color_buffer: &ID3D11Buffer,
) {
    let stride = std::mem::size_of::<Vertex>() as u32;
    let offset = 0;
    unsafe {
        context.IASetVertexBuffers(
            0,
            1,
            Some(&Some(vertex_buffer.clone())),
            Some(&stride),
            Some(&offset),
        );
        context.IASetIndexBuffer(index_buffer, DXGI_FORMAT_R16_UINT, 0);
        context.IASetPrimitiveTopology(D3D_PRIMITIVE_TOPOLOGY_TRIANGLELIST);
        context.VSSetConstantBuffers(0, Some(&[Some(transform_buffer.clone())]));
        context.PSSetConstantBuffers(0, Some(&[Some(face_color_buffer.clone())]));
        context.DrawIndexed(CUBE_INDICES.len() as u32, 0, 0);
    }
}
