//! Mesh tables and the constant-buffer layouts that go with them.

use bytemuck::Pod;
use bytemuck::Zeroable;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ColorVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

pub const CUBE_VERTICES: [Vertex; 8] = [
    Vertex { position: [-1.0, -1.0, -1.0] },
    Vertex { position: [1.0, -1.0, -1.0] },
    Vertex { position: [-1.0, 1.0, -1.0] },
    Vertex { position: [1.0, 1.0, -1.0] },
    Vertex { position: [-1.0, -1.0, 1.0] },
    Vertex { position: [1.0, -1.0, 1.0] },
    Vertex { position: [-1.0, 1.0, 1.0] },
    Vertex { position: [1.0, 1.0, 1.0] },
];

// Two triangles per face, faces in the same order as CUBE_FACE_COLORS.
#[rustfmt::skip]
pub const CUBE_INDICES: [u16; 36] = [
    0, 2, 1, 2, 3, 1,
    1, 3, 5, 3, 7, 5,
    2, 6, 3, 3, 6, 7,
    4, 5, 7, 4, 7, 6,
    0, 4, 2, 2, 4, 6,
    0, 1, 4, 1, 5, 4,
];

pub const CUBE_FACE_COLORS: [[f32; 4]; 6] = [
    [1.0, 0.0, 1.0, 1.0],
    [1.0, 0.0, 0.0, 1.0],
    [0.0, 1.0, 0.0, 1.0],
    [0.0, 0.0, 1.0, 1.0],
    [1.0, 1.0, 0.0, 1.0],
    [0.0, 1.0, 1.0, 1.0],
];

/// Vertex shader constant buffer, register `b0`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TransformConstants {
    pub transform: [f32; 16],
}

/// Pixel shader constant buffer, register `b0`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FaceColorConstants {
    pub face_colors: [[f32; 4]; 6],
}

impl Default for FaceColorConstants {
    fn default() -> Self {
        Self {
            face_colors: CUBE_FACE_COLORS,
        }
    }
}

/// A red/green/blue triangle whose height is stretched by `aspect`
/// (width over height) so it stays equilateral-ish on wide windows.
pub fn triangle_vertices(aspect: f32) -> [ColorVertex; 3] {
    [
        ColorVertex {
            position: [0.0, 0.25 * aspect, 0.0],
            color: [1.0, 0.0, 0.0, 1.0],
        },
        ColorVertex {
            position: [0.25, -0.25 * aspect, 0.0],
            color: [0.0, 1.0, 0.0, 1.0],
        },
        ColorVertex {
            position: [-0.25, -0.25 * aspect, 0.0],
            color: [0.0, 0.0, 1.0, 1.0],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_math::Vec3;

    fn corner(i: u16) -> Vec3 {
        Vec3::from_array(CUBE_VERTICES[i as usize].position)
    }

    #[test]
    fn indices_reference_existing_vertices() {
        assert!(CUBE_INDICES.iter().all(|i| (*i as usize) < CUBE_VERTICES.len()));
    }

    #[test]
    fn every_vertex_is_used() {
        for v in 0..CUBE_VERTICES.len() as u16 {
            assert!(CUBE_INDICES.contains(&v), "vertex {v} unused");
        }
    }

    #[test]
    fn each_face_pair_is_coplanar_on_one_side() {
        for (face, quad) in CUBE_INDICES.chunks(6).enumerate() {
            let points: Vec<Vec3> = quad.iter().map(|i| corner(*i)).collect();
            let shared_axis = (0..3).find(|axis| {
                let first = points[0][*axis];
                points.iter().all(|p| p[*axis] == first)
            });
            assert!(shared_axis.is_some(), "face {face} is not axis aligned");
        }
    }

    #[test]
    fn triangles_wind_clockwise_from_outside() {
        // the default rasterizer state culls counter-clockwise triangles; in
        // a left-handed space a clockwise triangle's (b - a) x (c - a) points
        // towards the viewer, i.e. away from the cube center
        for tri in CUBE_INDICES.chunks(3) {
            let (a, b, c) = (corner(tri[0]), corner(tri[1]), corner(tri[2]));
            let normal = (b - a).cross(c - a);
            let center = (a + b + c) / 3.0;
            assert!(normal.dot(center) > 0.0, "triangle {tri:?} faces inward");
        }
    }

    #[test]
    fn constant_buffers_are_16_byte_multiples() {
        assert_eq!(std::mem::size_of::<TransformConstants>() % 16, 0);
        assert_eq!(std::mem::size_of::<FaceColorConstants>() % 16, 0);
    }

    #[test]
    fn vertex_strides_match_input_layouts() {
        assert_eq!(std::mem::size_of::<Vertex>(), 12);
        assert_eq!(std::mem::size_of::<ColorVertex>(), 28);
        assert_eq!(std::mem::offset_of!(ColorVertex, color), 12);
    }

    #[test]
    fn triangle_scales_with_aspect() {
        let tri = triangle_vertices(2.0);
        assert_eq!(tri[0].position, [0.0, 0.5, 0.0]);
        assert_eq!(tri[1].position[1], -0.5);
        assert_eq!(tri[2].color, [0.0, 0.0, 1.0, 1.0]);
    }
}
