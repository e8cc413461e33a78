//! Demo scenes, one per stage of the tutorial.
//!
//! A scene owns only CPU-side state. Each frame it turns the current input
//! into a [`Frame`]: a clear colour plus a list of draws for the renderer.

use crate::config::Config;
use crate::geometry::ColorVertex;
use crate::geometry::triangle_vertices;
use crate::input::InputState;
use crate::math::PingPong;
use crate::math::aspect_height_over_width;
use crate::math::mouse_to_ndc;
use crate::math::perspective_lh;
use crate::math::pulse_color;
use crate::math::roll_pitch_yaw;
use crate::math::test_cube_transform;
use bevy_math::Mat4;
use bevy_math::Vec3;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::f32::consts::TAU;
use tracing::debug;

const CAULIFLOWER_BLUE: [f32; 4] = [0.588, 0.745, 0.827, 1.0];
const NAVY: [f32; 4] = [0.0, 0.2, 0.4, 1.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SceneKind {
    /// Pulsing background colour only.
    Clear,
    /// A single vertex-coloured triangle.
    Triangle,
    /// Two spinning cubes, one following the mouse.
    Cube,
    /// Many cubes orbiting the world centre.
    #[default]
    Boxes,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Draw {
    Triangle { vertices: [ColorVertex; 3] },
    /// Cube whose buffers are built for this draw only.
    Cube { transform: Mat4 },
    /// Cube backed by persistent buffers, identified by `index`.
    Box { index: usize, transform: Mat4 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub clear_color: [f32; 4],
    pub draws: Vec<Draw>,
}

impl Frame {
    pub fn clear(clear_color: [f32; 4]) -> Self {
        Self {
            clear_color,
            draws: Vec::new(),
        }
    }
}

pub enum Scene {
    Clear(ClearScene),
    Triangle(TriangleScene),
    Cube(CubeScene),
    Boxes(BoxField),
}

impl Scene {
    pub fn new(config: &Config) -> Self {
        debug!(kind = ?config.scene, "creating scene");
        match config.scene {
            SceneKind::Clear => Scene::Clear(ClearScene::default()),
            SceneKind::Triangle => Scene::Triangle(TriangleScene),
            SceneKind::Cube => Scene::Cube(CubeScene::default()),
            SceneKind::Boxes => Scene::Boxes(BoxField::random(config.box_count, config.seed)),
        }
    }

    pub fn kind(&self) -> SceneKind {
        match self {
            Scene::Clear(_) => SceneKind::Clear,
            Scene::Triangle(_) => SceneKind::Triangle,
            Scene::Cube(_) => SceneKind::Cube,
            Scene::Boxes(_) => SceneKind::Boxes,
        }
    }

    pub fn update(&mut self, input: &InputState, client_size: (u32, u32)) -> Frame {
        match self {
            Scene::Clear(scene) => scene.update(),
            Scene::Triangle(scene) => scene.update(client_size),
            Scene::Cube(scene) => scene.update(input, client_size),
            Scene::Boxes(scene) => scene.update(client_size),
        }
    }
}

#[derive(Debug, Default)]
pub struct ClearScene {
    t: f32,
}

impl ClearScene {
    pub const STEP: f32 = 0.02;
    pub const LIMIT: f32 = 10.0;

    pub fn update(&mut self) -> Frame {
        let frame = Frame::clear(pulse_color(self.t));
        self.t = (self.t + Self::STEP).min(Self::LIMIT);
        frame
    }
}

#[derive(Debug)]
pub struct TriangleScene;

impl TriangleScene {
    pub fn update(&mut self, client_size: (u32, u32)) -> Frame {
        let aspect = 1.0 / aspect_height_over_width(client_size);
        Frame {
            clear_color: NAVY,
            draws: vec![Draw::Triangle {
                vertices: triangle_vertices(aspect),
            }],
        }
    }
}

#[derive(Debug)]
pub struct CubeScene {
    angle: PingPong,
}

impl Default for CubeScene {
    fn default() -> Self {
        Self {
            angle: PingPong::new(0.0, 10.0, 0.02),
        }
    }
}

impl CubeScene {
    pub fn update(&mut self, input: &InputState, client_size: (u32, u32)) -> Frame {
        let i = self.angle.value();
        let clear_color = pulse_color(i);
        self.angle.step();

        let aspect = aspect_height_over_width(client_size);
        let mouse = mouse_to_ndc(input.mouse_x(), input.mouse_y(), client_size);
        Frame {
            clear_color,
            draws: vec![
                Draw::Cube {
                    transform: test_cube_transform(-i, 0.0, 0.0, aspect),
                },
                Draw::Cube {
                    transform: test_cube_transform(i, mouse.x, mouse.y, aspect),
                },
            ],
        }
    }
}

/// A cube spinning about its own centre while orbiting the world centre.
/// Rotations are `(pitch, yaw, roll)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotatingBox {
    pub position: Vec3,
    pub self_rotation: Vec3,
    pub self_rotation_speed: f32,
    pub world_rotation: Vec3,
    pub world_rotation_speed: f32,
}

impl RotatingBox {
    pub const WORLD_DEPTH: f32 = 20.0;

    pub fn new(
        distance_from_center: f32,
        self_rotation: f32,
        self_rotation_speed: f32,
        world_rotation: f32,
        world_rotation_speed: f32,
    ) -> Self {
        Self {
            position: Vec3::new(distance_from_center, 0.0, 0.0),
            self_rotation: Vec3::splat(self_rotation),
            self_rotation_speed,
            world_rotation: Vec3::splat(world_rotation),
            world_rotation_speed,
        }
    }

    pub fn update(&mut self) {
        self.self_rotation += Vec3::splat(self.self_rotation_speed);
        self.world_rotation += Vec3::splat(self.world_rotation_speed);
    }

    pub fn transform(&self, projection: &Mat4) -> Mat4 {
        *projection
            * Mat4::from_translation(Vec3::new(0.0, 0.0, Self::WORLD_DEPTH))
            * roll_pitch_yaw(self.world_rotation)
            * Mat4::from_translation(self.position)
            * roll_pitch_yaw(self.self_rotation)
    }
}

pub struct BoxField {
    boxes: Vec<RotatingBox>,
}

impl BoxField {
    pub const NEAR: f32 = 0.5;
    pub const FAR: f32 = 40.0;

    pub fn new(boxes: Vec<RotatingBox>) -> Self {
        Self { boxes }
    }

    /// Scatters `count` boxes; the same seed always produces the same field.
    pub fn random(count: usize, seed: u64) -> Self {
        crate::soft_assert!(count > 0, "box field is empty");
        let mut rng = StdRng::seed_from_u64(seed);
        let boxes = (0..count)
            .map(|_| {
                RotatingBox::new(
                    rng.gen_range(6.0..20.0),
                    rng.gen_range(0.0..TAU),
                    rng.gen_range(0.005..0.03),
                    rng.gen_range(0.0..TAU),
                    rng.gen_range(0.002..0.015),
                )
            })
            .collect();
        Self { boxes }
    }

    pub fn boxes(&self) -> &[RotatingBox] {
        &self.boxes
    }

    pub fn projection(client_size: (u32, u32)) -> Mat4 {
        perspective_lh(
            1.0,
            aspect_height_over_width(client_size),
            Self::NEAR,
            Self::FAR,
        )
    }

    pub fn update(&mut self, client_size: (u32, u32)) -> Frame {
        let projection = Self::projection(client_size);
        let draws = self
            .boxes
            .iter_mut()
            .enumerate()
            .map(|(index, rotating_box)| {
                rotating_box.update();
                Draw::Box {
                    index,
                    transform: rotating_box.transform(&projection),
                }
            })
            .collect();
        Frame {
            clear_color: CAULIFLOWER_BLUE,
            draws,
        }
    }
}
