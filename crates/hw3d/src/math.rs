//! Transform helpers in the DirectX conventions the shaders expect.
//!
//! Matrices are column-vector [`Mat4`]s. They are uploaded column-major and
//! the HLSL side computes `mul(transform, position)`.

use bevy_math::EulerRot;
use bevy_math::Mat4;
use bevy_math::Quat;
use bevy_math::Vec2;
use bevy_math::Vec3;
use bevy_math::Vec4;

/// Left-handed perspective projection from the size of the view volume at
/// the near plane. Depth lands in `[0, 1]`.
pub fn perspective_lh(view_width: f32, view_height: f32, near: f32, far: f32) -> Mat4 {
    crate::soft_assert!(far > near, "far plane must lie beyond the near plane");
    let range = far / (far - near);
    Mat4::from_cols(
        Vec4::new(2.0 * near / view_width, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 2.0 * near / view_height, 0.0, 0.0),
        Vec4::new(0.0, 0.0, range, 1.0),
        Vec4::new(0.0, 0.0, -range * near, 0.0),
    )
}

/// Rotation from `(pitch, yaw, roll)` packed into `x`, `y`, `z`.
/// Roll about Z is applied first, then pitch about X, then yaw about Y.
pub fn roll_pitch_yaw(rotation: Vec3) -> Mat4 {
    Mat4::from_quat(Quat::from_euler(
        EulerRot::YXZ,
        rotation.y,
        rotation.x,
        rotation.z,
    ))
}

/// Transform for the spinning test cube: spin about Z then X by `angle`,
/// push four units into the screen and project.
pub fn test_cube_transform(angle: f32, x: f32, z: f32, aspect: f32) -> Mat4 {
    perspective_lh(1.0, aspect, 0.5, 10.0)
        * Mat4::from_translation(Vec3::new(x, 0.0, z + 4.0))
        * Mat4::from_rotation_x(angle)
        * Mat4::from_rotation_z(angle)
}

/// Maps a client-area pixel to normalized device coordinates, y up.
pub fn mouse_to_ndc(x: i32, y: i32, client_size: (u32, u32)) -> Vec2 {
    let half_width = client_size.0.max(1) as f32 / 2.0;
    let half_height = client_size.1.max(1) as f32 / 2.0;
    Vec2::new(
        x as f32 / half_width - 1.0,
        -(y as f32 / half_height - 1.0),
    )
}

/// Height over width of the client area; used as the view height for a
/// projection one unit wide.
pub fn aspect_height_over_width(client_size: (u32, u32)) -> f32 {
    client_size.1.max(1) as f32 / client_size.0.max(1) as f32
}

/// Column-major float array ready for a constant buffer.
pub fn to_gpu(matrix: &Mat4) -> [f32; 16] {
    matrix.to_cols_array()
}

/// Oscillates a value between `min` and `max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PingPong {
    value: f32,
    min: f32,
    max: f32,
    speed: f32,
    direction: f32,
}

impl PingPong {
    pub fn new(min: f32, max: f32, speed: f32) -> Self {
        Self {
            value: min,
            min,
            max,
            speed,
            direction: 1.0,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn step(&mut self) -> f32 {
        let mut next = self.value + self.speed * self.direction;
        if next >= self.max {
            next = self.max;
            self.direction = -1.0;
        } else if next <= self.min {
            next = self.min;
            self.direction = 1.0;
        }
        self.value = next;
        next
    }
}

/// Background colour that pulses between white-blue and pure blue.
pub fn pulse_color(t: f32) -> [f32; 4] {
    let c = t.sin() / 2.0 + 0.5;
    [c, c, 1.0, 1.0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPS: f32 = 1e-5;

    fn project(m: &Mat4, p: Vec3) -> Vec3 {
        let clip = *m * p.extend(1.0);
        clip.truncate() / clip.w
    }

    #[test]
    fn perspective_maps_near_and_far_to_unit_depth() {
        let proj = perspective_lh(1.0, 0.75, 0.5, 10.0);
        assert!((project(&proj, Vec3::new(0.0, 0.0, 0.5)).z - 0.0).abs() < EPS);
        assert!((project(&proj, Vec3::new(0.0, 0.0, 10.0)).z - 1.0).abs() < EPS);
    }

    #[test]
    fn perspective_near_plane_edges_hit_ndc_edges() {
        let proj = perspective_lh(1.0, 0.75, 0.5, 10.0);
        let right = project(&proj, Vec3::new(0.5, 0.0, 0.5));
        let top = project(&proj, Vec3::new(0.0, 0.375, 0.5));
        assert!((right.x - 1.0).abs() < EPS);
        assert!((top.y - 1.0).abs() < EPS);
    }

    #[test]
    fn perspective_is_left_handed() {
        let proj = perspective_lh(1.0, 1.0, 0.5, 10.0);
        let clip = proj * Vec4::new(0.0, 0.0, 3.0, 1.0);
        assert!((clip.w - 3.0).abs() < EPS);
    }

    #[test]
    fn roll_is_applied_before_yaw() {
        // roll a quarter turn takes +X to +Y, then yaw leaves +Y alone
        let m = roll_pitch_yaw(Vec3::new(0.0, FRAC_PI_2, FRAC_PI_2));
        let v = m.transform_vector3(Vec3::X);
        assert!(v.abs_diff_eq(Vec3::Y, EPS), "{v:?}");
    }

    #[test]
    fn pitch_rotates_y_towards_z() {
        let m = roll_pitch_yaw(Vec3::new(FRAC_PI_2, 0.0, 0.0));
        let v = m.transform_vector3(Vec3::Y);
        assert!(v.abs_diff_eq(Vec3::Z, EPS), "{v:?}");
    }

    #[test]
    fn test_cube_sits_in_front_of_the_camera() {
        let m = test_cube_transform(0.0, 0.0, 0.0, 0.75);
        let center = project(&m, Vec3::ZERO);
        assert!(center.x.abs() < EPS && center.y.abs() < EPS);
        assert!(center.z > 0.0 && center.z < 1.0);
    }

    #[test]
    fn mouse_corners_map_to_ndc_corners() {
        let size = (1280, 720);
        assert!(mouse_to_ndc(0, 0, size).abs_diff_eq(Vec2::new(-1.0, 1.0), EPS));
        assert!(mouse_to_ndc(640, 360, size).abs_diff_eq(Vec2::ZERO, EPS));
        assert!(mouse_to_ndc(1280, 720, size).abs_diff_eq(Vec2::new(1.0, -1.0), EPS));
    }

    #[test]
    fn ping_pong_bounces_between_bounds() {
        let mut p = PingPong::new(0.0, 1.0, 0.4);
        let seen: Vec<f32> = (0..6).map(|_| p.step()).collect();
        let expected = [0.4, 0.8, 1.0, 0.6, 0.2, 0.0];
        for (a, b) in seen.iter().zip(expected) {
            assert!((a - b).abs() < EPS, "{seen:?}");
        }
        assert!((p.step() - 0.4).abs() < EPS);
    }

    #[test]
    fn pulse_color_stays_in_range() {
        for i in 0..500 {
            let [r, g, b, a] = pulse_color(i as f32 * 0.02);
            assert!((0.0..=1.0).contains(&r));
            assert_eq!(r, g);
            assert_eq!((b, a), (1.0, 1.0));
        }
        assert_eq!(pulse_color(0.0), [0.5, 0.5, 1.0, 1.0]);
    }

    #[test]
    fn gpu_layout_is_column_major() {
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let cols = to_gpu(&m);
        assert_eq!(&cols[12..15], &[1.0, 2.0, 3.0]);
    }
}
