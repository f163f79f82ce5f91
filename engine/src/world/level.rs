//! Level Layout
//!
//! The dust arena: a sand floor, four concrete walls and a wooden crate in
//! front of the spawn point. Each entry is an axis-aligned box that becomes
//! one fixed rigid body with a cuboid collider and one lit mesh.

use glam::Vec3;
use rapier3d::prelude::ColliderHandle;
use serde::{Deserialize, Serialize};

use crate::error::{SimulationError, SimulationResult};
use crate::physics::PhysicsWorld;

/// What a static box represents. Only used for colouring and logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoxKind {
    Ground,
    Wall,
    Prop,
}

/// One immovable box in the level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StaticBox {
    pub kind: BoxKind,
    /// World-space center
    pub center: Vec3,
    /// Half extents along each axis (rapier cuboid convention)
    pub half_extents: Vec3,
    /// sRGB, each channel in 0..=1
    pub color: [f32; 3],
}

impl StaticBox {
    pub fn new(kind: BoxKind, center: Vec3, half_extents: Vec3, color: [f32; 3]) -> Self {
        Self {
            kind,
            center,
            half_extents,
            color,
        }
    }

    /// Box from full width/height/depth, the way walls are authored.
    pub fn from_size(kind: BoxKind, center: Vec3, size: Vec3, color: [f32; 3]) -> Self {
        Self::new(kind, center, size * 0.5, color)
    }

    /// Height of the top face.
    pub fn top(&self) -> f32 {
        self.center.y + self.half_extents.y
    }
}

/// Complete static level: boxes plus the lighting the renderer uses.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelLayout {
    /// Clear colour behind all geometry
    pub sky_color: [f32; 3],
    /// Ambient light intensity
    pub ambient: f32,
    /// Position of the directional "sun"; light travels from here toward the origin
    pub sun_position: Vec3,
    pub sun_intensity: f32,
    pub boxes: Vec<StaticBox>,
}

/// Convert a `0xRRGGBB` colour to normalized RGB.
pub fn rgb_hex(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

const SKY: u32 = 0xa0b0c0;
const SAND: u32 = 0xc2b280;
const WOOD: u32 = 0x8b5a2b;
const CONCRETE: u32 = 0xa9a9a9;

/// Edge length of the crate prop
const CRATE_SIZE: f32 = 2.0;

impl Default for LevelLayout {
    fn default() -> Self {
        let wall = |x: f32, y: f32, z: f32, w: f32, h: f32, d: f32| {
            StaticBox::from_size(
                BoxKind::Wall,
                Vec3::new(x, y, z),
                Vec3::new(w, h, d),
                rgb_hex(CONCRETE),
            )
        };

        Self {
            sky_color: rgb_hex(SKY),
            ambient: 0.6,
            sun_position: Vec3::new(50.0, 100.0, 50.0),
            sun_intensity: 0.8,
            boxes: vec![
                StaticBox::new(
                    BoxKind::Ground,
                    Vec3::ZERO,
                    Vec3::new(100.0, 0.1, 100.0),
                    rgb_hex(SAND),
                ),
                StaticBox::from_size(
                    BoxKind::Prop,
                    Vec3::new(0.0, CRATE_SIZE / 2.0, -10.0),
                    Vec3::splat(CRATE_SIZE),
                    rgb_hex(WOOD),
                ),
                wall(0.0, 5.0, -25.0, 50.0, 10.0, 1.0),
                wall(0.0, 5.0, 25.0, 50.0, 10.0, 1.0),
                wall(-25.0, 5.0, 0.0, 1.0, 10.0, 50.0),
                wall(25.0, 5.0, 0.0, 1.0, 10.0, 50.0),
            ],
        }
    }
}

impl LevelLayout {
    /// A level with no geometry. Bodies fall forever; handy in tests.
    pub fn empty() -> Self {
        Self {
            boxes: Vec::new(),
            ..Self::default()
        }
    }

    /// Direction light travels (from the sun toward the origin), normalized.
    pub fn sun_direction(&self) -> Vec3 {
        (-self.sun_position).normalize_or(Vec3::NEG_Y)
    }

    pub fn count(&self, kind: BoxKind) -> usize {
        self.boxes.iter().filter(|b| b.kind == kind).count()
    }

    pub fn validate(&self) -> SimulationResult<()> {
        for (i, b) in self.boxes.iter().enumerate() {
            if !b.center.is_finite() {
                return Err(SimulationError::InvalidConfig(format!(
                    "level box {i} has a non-finite center"
                )));
            }
            if !(b.half_extents.is_finite() && b.half_extents.min_element() > 0.0) {
                return Err(SimulationError::InvalidConfig(format!(
                    "level box {i} needs positive half extents, got {}",
                    b.half_extents
                )));
            }
        }
        if !self.ambient.is_finite() || !self.sun_intensity.is_finite() {
            return Err(SimulationError::InvalidConfig("level lighting must be finite".to_string()));
        }
        Ok(())
    }
}

/// Insert every box of `layout` into `world` as a fixed body + cuboid collider.
pub fn build_level(world: &mut PhysicsWorld, layout: &LevelLayout) -> Vec<ColliderHandle> {
    let handles: Vec<ColliderHandle> = layout
        .boxes
        .iter()
        .map(|b| world.add_static_box(b.center, b.half_extents))
        .collect();

    tracing::debug!(
        ground = layout.count(BoxKind::Ground),
        walls = layout.count(BoxKind::Wall),
        props = layout.count(BoxKind::Prop),
        "level colliders built"
    );
    handles
}
