//! Level loading and management.
//!
//! A level is described as plain data (boxes and named spawn points) and
//! turned into a read-only [`CollisionWorld`] once, at load time.

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tactica_physics::{CollisionWorld, ContentFlags};
use thiserror::Error;

/// Errors from loading or validating a level description.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse level: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("box {index} has an invalid size {size:?}")]
    InvalidBoxSize { index: usize, size: Vec3 },

    #[error("box {index} has a non-finite centre {center:?}")]
    InvalidBoxCenter { index: usize, center: Vec3 },

    #[error("spawn point {name:?} is not finite")]
    InvalidSpawn { name: String },

    #[error("spawn point {0:?} is defined more than once")]
    DuplicateSpawn(String),

    #[error("no spawn point named {0:?}")]
    UnknownSpawn(String),
}

/// What a box is to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColliderKind {
    /// Blocks movement and can be stood on.
    Solid,
    /// Can be stood on but never blocks horizontal movement.
    Floor,
}

impl ColliderKind {
    pub fn contents(self) -> ContentFlags {
        match self {
            ColliderKind::Solid => ContentFlags::SOLID,
            ColliderKind::Floor => ContentFlags::FLOOR,
        }
    }
}

/// One axis-aligned box in a level description.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxDescription {
    /// Centre in world space.
    pub center: Vec3,
    /// Full size (width, height, depth).
    pub size: Vec3,
    pub kind: ColliderKind,
}

/// A named place where the player can (re)appear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub name: String,

    /// Position of the feet in world space.
    pub position: Vec3,

    /// Initial facing direction (yaw in radians).
    #[serde(default)]
    pub facing: f32,
}

/// Serializable level data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelDescription {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub boxes: Vec<BoxDescription>,
    #[serde(default)]
    pub spawn_points: Vec<SpawnPoint>,
}

impl LevelDescription {
    /// Reject boxes and spawn points the physics cannot use.
    pub fn validate(&self) -> Result<(), LevelError> {
        for (index, b) in self.boxes.iter().enumerate() {
            if !b.center.is_finite() {
                return Err(LevelError::InvalidBoxCenter { index, center: b.center });
            }
            if !b.size.is_finite() || b.size.cmple(Vec3::ZERO).any() {
                return Err(LevelError::InvalidBoxSize { index, size: b.size });
            }
        }

        for (i, spawn) in self.spawn_points.iter().enumerate() {
            if !spawn.position.is_finite() || !spawn.facing.is_finite() {
                return Err(LevelError::InvalidSpawn { name: spawn.name.clone() });
            }
            if self.spawn_points[..i].iter().any(|other| other.name == spawn.name) {
                return Err(LevelError::DuplicateSpawn(spawn.name.clone()));
            }
        }

        Ok(())
    }
}

/// A game level containing collision geometry and spawn points.
#[derive(Debug, Clone)]
pub struct Level {
    /// Level identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Collision world for physics.
    pub collision: CollisionWorld,

    /// Player spawn points.
    pub spawn_points: Vec<SpawnPoint>,
}

impl Level {
    /// Create an empty level.
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            collision: CollisionWorld::new(),
            spawn_points: Vec::new(),
        }
    }

    /// Validate a description and build its collision world.
    pub fn from_description(description: &LevelDescription) -> Result<Self, LevelError> {
        description.validate()?;
        Ok(Self::build(description))
    }

    /// Parse a JSON level description.
    pub fn from_json_str(json: &str) -> Result<Self, LevelError> {
        let description: LevelDescription = serde_json::from_str(json)?;
        Self::from_description(&description)
    }

    /// Load a JSON level description from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    fn build(description: &LevelDescription) -> Self {
        let mut level = Self::new(&description.id, &description.name);

        for b in &description.boxes {
            level.collision.add_box(b.center, b.size * 0.5, b.kind.contents());
        }
        level.spawn_points = description.spawn_points.clone();

        log::debug!(
            "built level {:?}: {} colliders, {} spawn points",
            level.id,
            level.collision.collider_count(),
            level.spawn_points.len()
        );
        level
    }

    /// The built-in practice map.
    pub fn training_arena() -> Self {
        Self::build(&training_arena_description())
    }

    /// Look up a spawn point by name.
    pub fn spawn_point(&self, name: &str) -> Option<&SpawnPoint> {
        self.spawn_points.iter().find(|spawn| spawn.name == name)
    }

    /// The first spawn point, used when none is named.
    pub fn default_spawn(&self) -> Option<&SpawnPoint> {
        self.spawn_points.first()
    }
}

// ============================================================================
// Training Arena
// ============================================================================

const MAP_SIZE: f32 = 700.0;
const WALL_HEIGHT: f32 = 40.0;
const SITE_SIZE: f32 = 120.0;

fn solid(size: [f32; 3], center: [f32; 3]) -> BoxDescription {
    BoxDescription {
        center: Vec3::from(center),
        size: Vec3::from(size),
        kind: ColliderKind::Solid,
    }
}

fn floor(size: [f32; 3], center: [f32; 3]) -> BoxDescription {
    BoxDescription {
        kind: ColliderKind::Floor,
        ..solid(size, center)
    }
}

/// Box that stands on the ground: `center_y` is half its height.
fn grounded(size: [f32; 3], x: f32, z: f32) -> BoxDescription {
    solid(size, [x, size[1] / 2.0, z])
}

/// Description of the built-in arena: two bomb sites, a mid area, connectors
/// and two walled spawn areas inside a square boundary.
pub fn training_arena_description() -> LevelDescription {
    let half = MAP_SIZE / 2.0;
    let small = [3.0, 2.0, 3.0];
    let medium = [4.0, 3.0, 4.0];

    let mut boxes = vec![
        // Ground, top face at y = 0
        floor([MAP_SIZE, 1.0, MAP_SIZE], [0.0, -0.5, 0.0]),
        // Boundary
        solid([MAP_SIZE, WALL_HEIGHT, 2.0], [0.0, 8.0, -half]),
        solid([MAP_SIZE, WALL_HEIGHT, 2.0], [0.0, 8.0, half]),
        solid([2.0, WALL_HEIGHT, MAP_SIZE], [-half, 8.0, 0.0]),
        solid([2.0, WALL_HEIGHT, MAP_SIZE], [half, 8.0, 0.0]),
        // Practice pads and their cover
        floor([20.0, 0.5, 20.0], [-30.0, 0.25, -30.0]),
        solid([2.0, 4.0, 8.0], [-25.0, 2.0, -25.0]),
        solid([8.0, 4.0, 2.0], [-35.0, 2.0, -35.0]),
        floor([20.0, 0.5, 20.0], [30.0, 0.25, 30.0]),
        solid([2.0, 4.0, 8.0], [25.0, 2.0, 25.0]),
        solid([8.0, 4.0, 2.0], [35.0, 2.0, 35.0]),
        // Mid
        solid([80.0, 8.0, 4.0], [0.0, 4.0, 0.0]),
        solid([4.0, 8.0, 40.0], [-30.0, 4.0, 0.0]),
        solid([4.0, 8.0, 40.0], [30.0, 4.0, 0.0]),
        solid([20.0, 6.0, 20.0], [0.0, 3.0, -20.0]),
        grounded([60.0, WALL_HEIGHT, 4.0], -90.0, -40.0),
        grounded([4.0, WALL_HEIGHT, 80.0], -120.0, 0.0),
        grounded([40.0, WALL_HEIGHT, 4.0], 80.0, -60.0),
        grounded([4.0, WALL_HEIGHT, 40.0], 100.0, -40.0),
        // Catwalk and its support
        solid([4.0, 2.0, 80.0], [60.0, 12.0, -80.0]),
        solid([4.0, 12.0, 4.0], [60.0, 6.0, -40.0]),
        // A site
        floor([SITE_SIZE, 1.0, SITE_SIZE], [-200.0, 0.5, -200.0]),
        solid([30.0, 8.0, 30.0], [-180.0, 4.0, -180.0]),
        grounded([40.0, WALL_HEIGHT, 4.0], -220.0, -160.0),
        grounded([4.0, WALL_HEIGHT, 40.0], -240.0, -180.0),
        solid([4.0, 8.0, 60.0], [-160.0, 4.0, -120.0]),
        solid([40.0, 8.0, 4.0], [-180.0, 4.0, -90.0]),
        // B site
        floor([SITE_SIZE, 1.0, SITE_SIZE], [200.0, 0.5, 200.0]),
        solid([40.0, 12.0, 40.0], [180.0, 6.0, 180.0]),
        grounded([60.0, WALL_HEIGHT, 4.0], 220.0, 160.0),
        grounded([4.0, WALL_HEIGHT, 60.0], 250.0, 190.0),
        solid([4.0, 8.0, 120.0], [160.0, 4.0, 80.0]),
        solid([80.0, 8.0, 4.0], [200.0, 4.0, 20.0]),
        // Connectors
        solid([4.0, 8.0, 60.0], [-80.0, 4.0, -60.0]),
        solid([40.0, 8.0, 4.0], [-100.0, 4.0, -30.0]),
        solid([4.0, 8.0, 60.0], [80.0, 4.0, 60.0]),
        solid([40.0, 8.0, 4.0], [100.0, 4.0, 30.0]),
    ];

    // Scattered cover
    for (x, z, size) in [
        (-120.0, -120.0, medium),
        (120.0, 120.0, medium),
        (-40.0, -40.0, small),
        (40.0, 40.0, small),
        (0.0, -80.0, small),
        (0.0, 80.0, small),
    ] {
        boxes.push(grounded(size, x, z));
    }

    // Spawn rooms, open toward the middle of the map
    for side in [-1.0_f32, 1.0] {
        boxes.push(grounded([120.0, WALL_HEIGHT, 4.0], 0.0, 320.0 * side));
        boxes.push(grounded([4.0, WALL_HEIGHT, 80.0], -60.0, 280.0 * side));
        boxes.push(grounded([4.0, WALL_HEIGHT, 80.0], 60.0, 280.0 * side));
    }

    LevelDescription {
        id: "training_arena".to_string(),
        name: "Training Arena".to_string(),
        boxes,
        spawn_points: vec![
            SpawnPoint {
                name: "attackers".to_string(),
                position: Vec3::new(0.0, 0.0, -290.0),
                facing: std::f32::consts::PI,
            },
            SpawnPoint {
                name: "defenders".to_string(),
                position: Vec3::new(0.0, 0.0, 290.0),
                facing: 0.0,
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_creation() {
        let level = Level::new("test", "Test Level");
        assert_eq!(level.id, "test");
        assert_eq!(level.collision.collider_count(), 0);
        assert!(level.default_spawn().is_none());
    }

    #[test]
    fn test_training_arena() {
        let description = training_arena_description();
        assert!(description.validate().is_ok());

        let level = Level::training_arena();
        assert_eq!(level.collision.collider_count(), description.boxes.len());
        assert!(level.spawn_point("attackers").is_some());
        assert!(level.spawn_point("defenders").is_some());
        assert_eq!(level.default_spawn().map(|s| s.name.as_str()), Some("attackers"));
    }

    #[test]
    fn test_training_arena_spawns_are_clear() {
        let level = Level::training_arena();

        for spawn in &level.spawn_points {
            let body = spawn.position + Vec3::new(0.0, 0.9, 0.0);
            assert!(
                !level.collision.point_in_solid(body, ContentFlags::SOLID),
                "{} spawns inside geometry",
                spawn.name
            );
        }
    }

    #[test]
    fn test_floor_kind_maps_to_floor_contents() {
        let level = Level::training_arena();
        let ground = &level.collision.colliders()[0];

        assert_eq!(ground.contents, ContentFlags::FLOOR);
        assert_eq!(ground.max.y, 0.0);
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "id": "box",
            "name": "Box",
            "boxes": [
                { "center": [0.0, -0.5, 0.0], "size": [20.0, 1.0, 20.0], "kind": "floor" },
                { "center": [3.0, 1.0, 0.0], "size": [2.0, 2.0, 2.0], "kind": "solid" }
            ],
            "spawn_points": [
                { "name": "start", "position": [0.0, 0.0, 0.0] }
            ]
        }"#;

        let level = Level::from_json_str(json).unwrap();
        assert_eq!(level.collision.collider_count(), 2);
        assert_eq!(level.collision.colliders()[1].min, Vec3::new(2.0, 0.0, -1.0));
        assert_eq!(level.spawn_point("start").map(|s| s.facing), Some(0.0));
    }

    #[test]
    fn test_rejects_degenerate_box() {
        let description = LevelDescription {
            id: "bad".to_string(),
            name: "Bad".to_string(),
            boxes: vec![solid([1.0, 0.0, 1.0], [0.0, 0.0, 0.0])],
            spawn_points: Vec::new(),
        };

        assert!(matches!(
            Level::from_description(&description),
            Err(LevelError::InvalidBoxSize { index: 0, .. })
        ));
    }

    #[test]
    fn test_rejects_duplicate_spawn() {
        let spawn = SpawnPoint {
            name: "a".to_string(),
            position: Vec3::ZERO,
            facing: 0.0,
        };
        let description = LevelDescription {
            spawn_points: vec![spawn.clone(), spawn],
            ..Default::default()
        };

        assert!(matches!(
            description.validate(),
            Err(LevelError::DuplicateSpawn(name)) if name == "a"
        ));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(Level::from_json_str("{ not json"), Err(LevelError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = Level::load_json("/nonexistent/level.json");
        assert!(matches!(result, Err(LevelError::Io { .. })));
    }
}
