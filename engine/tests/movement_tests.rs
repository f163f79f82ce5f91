//! Movement Tests - Resolver, Physics Write and Eye Sync
//!
//! Exercises the movement path end to end against a real rapier world:
//! key flags -> horizontal velocity -> body -> camera.

use dust_arena_engine::camera::FpsCamera;
use dust_arena_engine::input::{KeyCode, KeyboardState, MovementKeys};
use dust_arena_engine::physics::PhysicsWorld;
use dust_arena_engine::player::{EyeSync, MovementResolver};
use dust_arena_engine::world::{LevelLayout, build_level};
use glam::{Vec2, Vec3};

const EPSILON: f32 = 1e-5;

fn combos() -> Vec<MovementKeys> {
    (0u8..16)
        .map(|bits| MovementKeys {
            forward: bits & 1 != 0,
            backward: bits & 2 != 0,
            left: bits & 4 != 0,
            right: bits & 8 != 0,
        })
        .collect()
}

fn world_with_player(spawn: Vec3) -> (PhysicsWorld, dust_arena_engine::physics::PlayerBody) {
    let mut world = PhysicsWorld::new(Vec3::new(0.0, -9.81, 0.0)).unwrap();
    let player = world.spawn_player(spawn, 0.5, 0.3).unwrap();
    (world, player)
}

// ============================================================================
// Input -> intent
// ============================================================================

#[test]
fn test_both_key_schemes_drive_the_same_flags() {
    let mut letters = KeyboardState::new();
    let mut arrows = KeyboardState::new();

    letters.handle_key(KeyCode::W, true);
    letters.handle_key(KeyCode::D, true);
    arrows.handle_key(KeyCode::ArrowUp, true);
    arrows.handle_key(KeyCode::ArrowRight, true);

    assert_eq!(letters.snapshot(), arrows.snapshot());
}

#[test]
fn test_intent_magnitude_bounded_for_all_combinations() {
    for keys in combos() {
        let intent = MovementResolver::intent(&keys);
        assert!(intent.length() <= 1.0 + EPSILON, "{keys:?}");
    }

    let diagonal = MovementKeys {
        forward: true,
        right: true,
        ..Default::default()
    };
    assert!((MovementResolver::intent(&diagonal).length() - 1.0).abs() < EPSILON);
}

#[test]
fn test_zero_input_gives_zero_velocity_at_any_yaw() {
    let resolver = MovementResolver::default();
    for step in 0..64 {
        let yaw = step as f32 * 0.2 - 6.4;
        assert_eq!(resolver.resolve(&MovementKeys::new(), yaw, true), Vec2::ZERO);
    }
}

#[test]
fn test_pitch_never_affects_movement() {
    let resolver = MovementResolver::default();
    let keys = MovementKeys {
        forward: true,
        ..Default::default()
    };

    let mut level = FpsCamera::new();
    let mut tilted = FpsCamera::new();
    level.apply_mouse_delta(150.0, 0.0);
    tilted.apply_mouse_delta(150.0, -400.0);

    assert_eq!(
        resolver.resolve(&keys, level.yaw, true),
        resolver.resolve(&keys, tilted.yaw, true)
    );
}

// ============================================================================
// Horizontal write preserves vertical velocity
// ============================================================================

#[test]
fn test_vertical_velocity_survives_horizontal_write() {
    let resolver = MovementResolver::default();

    for vy in [-25.0_f32, -3.5, 0.0, 0.25, 8.0] {
        for keys in combos() {
            for engaged in [true, false] {
                let (mut world, player) = world_with_player(Vec3::new(0.0, 5.0, 5.0));
                world.set_linvel(player.body, Vec3::new(1.0, vy, -2.0));

                let horizontal = resolver.resolve(&keys, 0.7, engaged);
                let written = world.apply_horizontal_velocity(player.body, horizontal).unwrap();

                assert_eq!(written.y, vy);
                assert_eq!(world.linvel(player.body).unwrap().y, vy);
                if !engaged {
                    assert_eq!(written.x, 0.0);
                    assert_eq!(written.z, 0.0);
                }
            }
        }
    }
}

// ============================================================================
// Camera follows body
// ============================================================================

#[test]
fn test_camera_sits_at_eye_height_after_each_step() {
    let (mut world, player) = world_with_player(Vec3::new(0.0, 5.0, 5.0));
    let sync = EyeSync::default();
    let mut camera = FpsCamera::new();

    for _ in 0..30 {
        world.step();
        let body = world.translation(player.body).unwrap();
        sync.apply(&mut camera, body);
        assert_eq!(camera.position.y, body.y + 0.6);
        assert_eq!(camera.position.x, body.x);
        assert_eq!(camera.position.z, body.z);
    }
}

// ============================================================================
// Walking on the arena floor
// ============================================================================

#[test]
fn test_walk_forward_on_ground() {
    let (mut world, player) = world_with_player(Vec3::new(0.0, 5.0, 5.0));
    build_level(&mut world, &LevelLayout::default());
    let resolver = MovementResolver::default();

    // Fall and settle
    for _ in 0..180 {
        world.apply_horizontal_velocity(player.body, Vec2::ZERO);
        world.step();
    }
    let landed = world.translation(player.body).unwrap();
    assert!((landed.y - 0.9).abs() < 0.1, "landed at {landed}");

    let keys = MovementKeys {
        forward: true,
        ..Default::default()
    };
    for _ in 0..60 {
        let horizontal = resolver.resolve(&keys, 0.0, true);
        world.apply_horizontal_velocity(player.body, horizontal);
        world.step();
    }

    let walked = world.translation(player.body).unwrap();
    assert!(walked.x.abs() < 0.01);
    assert!(walked.z < landed.z - 8.0, "walked to {walked}");
    assert!((walked.y - landed.y).abs() < 0.1);
    assert_eq!(world.is_rotation_locked(player.body), Some(true));
}

#[test]
fn test_walls_stop_the_player() {
    let (mut world, player) = world_with_player(Vec3::new(0.0, 1.0, 20.0));
    build_level(&mut world, &LevelLayout::default());
    let resolver = MovementResolver::default();
    let back = MovementKeys {
        backward: true,
        ..Default::default()
    };

    // Walk toward +Z into the wall at z = 25 for three seconds
    for _ in 0..180 {
        let horizontal = resolver.resolve(&back, 0.0, true);
        world.apply_horizontal_velocity(player.body, horizontal);
        world.step();
    }

    let position = world.translation(player.body).unwrap();
    assert!(position.z < 24.5 + 0.05, "passed through wall: {position}");
}
