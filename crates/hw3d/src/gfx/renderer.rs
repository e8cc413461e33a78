use crate::error::MyResult;
use crate::geometry::ColorVertex;
use crate::gfx::buffers::create_vertex_buffer;
use crate::gfx::cube_mesh::CubeMesh;
use crate::gfx::cube_mesh::draw_immediate_cube;
use crate::gfx::device_resources::DeviceResources;
use crate::gfx::shader::ShaderProgram;
use crate::gfx::shader::color_vertex_layout;
use crate::gfx::shader::position_layout;
use crate::scene::Draw;
use crate::scene::Frame;
use crate::shader_files::CUBE_PS;
use crate::shader_files::CUBE_VS;
use crate::shader_files::TRIANGLE_PS;
use crate::shader_files::TRIANGLE_VS;
use bevy_math::Mat4;
use tracing::debug;
use windows::Win32::Foundation::HWND;
use windows::Win32::Graphics::Direct3D::*;

pub struct Renderer {
    resources: DeviceResources,
    cube_program: ShaderProgram,
    triangle_program: ShaderProgram,
    box_meshes: Vec<CubeMesh>,
}

impl Renderer {
    pub fn new(hwnd: HWND, size: (u32, u32), use_warp_device: bool) -> MyResult<Self> {
        let resources = DeviceResources::new(hwnd, size, use_warp_device)?;
        let device = resources.device();
        let cube_program = ShaderProgram::load(device, CUBE_VS, CUBE_PS, &position_layout())?;
        let triangle_program =
            ShaderProgram::load(device, TRIANGLE_VS, TRIANGLE_PS, &color_vertex_layout())?;
        Ok(Self {
            resources,
            cube_program,
            triangle_program,
            box_meshes: Vec::new(),
        })
    }

    pub fn render(&mut self, frame: &Frame) -> MyResult<()> {
        self.resources.clear(frame.clear_color);
        for draw in &frame.draws {
            match draw {
                Draw::Triangle { vertices } => self.draw_triangle(vertices)?,
                Draw::Cube { transform } => {
                    self.cube_program.bind(self.resources.context());
                    draw_immediate_cube(
                        self.resources.device(),
                        self.resources.context(),
                        transform,
                    )?;
                }
                Draw::Box { index, transform } => self.draw_box(*index, transform)?,
            }
        }
        Ok(())
    }

    pub fn present(&self, vsync: bool) -> MyResult<()> {
        self.resources.present(vsync)
    }

    fn draw_triangle(&self, vertices: &[ColorVertex; 3]) -> MyResult<()> {
        let context = self.resources.context();
        let vertex_buffer = create_vertex_buffer(self.resources.device(), vertices)?;
        let stride = std::mem::size_of::<ColorVertex>() as u32;
        let offset = 0;
        self.triangle_program.bind(context);
        unsafe {
            context.IASetVertexBuffers(
                0,
                1,
                Some(&Some(vertex_buffer)),
                Some(&stride),
                Some(&offset),
            );
            context.IASetPrimitiveTopology(D3D_PRIMITIVE_TOPOLOGY_TRIANGLELIST);
            context.Draw(vertices.len() as u32, 0);
        }
        Ok(())
    }

    fn draw_box(&mut self, index: usize, transform: &Mat4) -> MyResult<()> {
        while self.box_meshes.len() <= index {
            debug!(index = self.box_meshes.len(), "creating box mesh");
            self.box_meshes.push(CubeMesh::new(self.resources.device())?);
        }
        self.cube_program.bind(self.resources.context());
        self.box_meshes[index].draw(self.resources.context(), transform)
    }
}
