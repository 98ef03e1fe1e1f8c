//! Tick integration tests for steering, movement, collision and animation.

use bevy_ecs::prelude::*;
use glam::Vec2;

use tileworld::components::animation::AnimationPlayer;
use tileworld::components::collision::CollisionState;
use tileworld::components::mapposition::MapPosition;
use tileworld::components::rigidbody::RigidBody;
use tileworld::components::sprite::Sprite;
use tileworld::components::spriteobject::SpriteObject;
use tileworld::components::steering::SteeringController;
use tileworld::geometry::{TilePosition, TileRect, WorldRect};
use tileworld::resources::animationstore::{AnimationSheet, AnimationStore};
use tileworld::resources::debugmode::DebugMode;
use tileworld::resources::draworder::DrawOrder;
use tileworld::resources::simconfig::SimConfig;
use tileworld::resources::spritesheet::SpriteSheet;
use tileworld::resources::tilemap::TileMap;
use tileworld::resources::tileset::{Tile, TileSet, TileType};
use tileworld::resources::worldtime::WorldTime;
use tileworld::scene;
use tileworld::systems::draworder::pick;

const EPSILON: f32 = 1e-4;

const WALL: TilePosition = TilePosition::new(1, 0);

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn make_map() -> TileMap {
    let tileset = TileSet::new(SpriteSheet::new("terrain", 64, 64, 2, 2))
        .with_tile(Tile::new("grass", TilePosition::new(0, 0)))
        .with_tile(Tile::new("wall", WALL).with_type(TileType::Wall));
    TileMap::new(tileset, 10, 10).unwrap()
}

fn make_animations() -> AnimationStore {
    let mut store = AnimationStore::new();
    store.insert(AnimationSheet::rows(
        SpriteSheet::new("hero", 128, 128, 4, 4),
        &[
            ("north", 1.0, 40.0),
            ("south", 1.0, 40.0),
            ("east", 1.0, 40.0),
            ("west", 1.0, 40.0),
        ],
    ));
    store
}

fn make_world(config: SimConfig) -> World {
    init_logging();
    scene::build_world(config, make_map(), make_animations())
}

fn small_footprint() -> WorldRect {
    WorldRect::new(-4.0, -4.0, 8.0, 8.0)
}

fn hero(world: &mut World, x: f32, y: f32) -> Entity {
    scene::spawn_character(world, "hero", Vec2::new(x, y), small_footprint()).unwrap()
}

#[test]
fn static_footprint_claims_its_cell() {
    let mut world = make_world(SimConfig::default());
    scene::spawn_object(
        &mut world,
        Vec2::new(96.0, 96.0),
        SpriteObject::fixed(WorldRect::new(0.0, 0.0, 32.0, 32.0), TileType::Furniture),
        None,
    );

    assert!(world.resource::<TileMap>().is_freespace(TilePosition::new(3, 3)));
    let claimed = scene::initialize(&mut world);
    assert_eq!(claimed, 1);

    let map = world.resource::<TileMap>();
    assert!(!map.is_freespace(TilePosition::new(3, 3)));
    assert!(map.is_freespace(TilePosition::new(2, 2)));
    assert_eq!(
        map.sector(TilePosition::new(3, 3)).unwrap().tile_type,
        TileType::Furniture
    );
}

#[test]
fn steering_clamps_first_tick_to_max_speed() {
    let mut world = make_world(SimConfig::default());
    let e = hero(&mut world, 160.0, 160.0);
    world
        .get_mut::<SteeringController>(e)
        .unwrap()
        .seek(Vec2::new(260.0, 160.0), 50.0);

    let mut schedule = scene::tick_schedule();
    scene::step(&mut world, &mut schedule, 1.0);

    let body = world.get::<RigidBody>(e).unwrap();
    assert!(approx_eq(body.speed(), 50.0));
    assert!(approx_eq(body.velocity.x, 50.0));
    assert!(approx_eq(body.velocity.y, 0.0));

    let pos = world.get::<MapPosition>(e).unwrap();
    assert!(approx_eq(pos.pos.x, 210.0));
    assert!(!world.get::<CollisionState>(e).unwrap().is_blocked);
}

#[test]
fn overlapping_move_is_rolled_back() {
    let mut world = make_world(SimConfig::default());
    let a = hero(&mut world, 100.0, 100.0);
    let b = hero(&mut world, 112.0, 100.0);
    world.get_mut::<RigidBody>(a).unwrap().velocity = Vec2::new(10.0, 0.0);

    let mut schedule = scene::tick_schedule();
    scene::step(&mut world, &mut schedule, 1.0);

    assert_eq!(world.get::<MapPosition>(a).unwrap().pos, Vec2::new(100.0, 100.0));
    let state = world.get::<CollisionState>(a).unwrap();
    assert!(state.is_blocked);
    assert_eq!(state.dynamic_obstacle, Some(b));
    assert!(!world.get::<CollisionState>(b).unwrap().is_blocked);
}

#[test]
fn touching_footprints_count_as_collision() {
    let mut world = make_world(SimConfig::default());
    let a = hero(&mut world, 100.0, 100.0);
    let b = hero(&mut world, 112.0, 100.0);
    // Moving 4 units makes a's right edge touch b's left edge exactly.
    world.get_mut::<RigidBody>(a).unwrap().velocity = Vec2::new(4.0, 0.0);

    let mut schedule = scene::tick_schedule();
    scene::step(&mut world, &mut schedule, 1.0);

    assert_eq!(world.get::<MapPosition>(a).unwrap().pos, Vec2::new(100.0, 100.0));
    assert_eq!(world.get::<CollisionState>(a).unwrap().dynamic_obstacle, Some(b));
}

#[test]
fn walls_block_without_dynamic_obstacle() {
    let mut world = make_world(SimConfig::default());
    world
        .resource_mut::<TileMap>()
        .set_region_tiles(&TileRect::new(5, 0, 1, 10), Some(WALL))
        .unwrap();
    let e = hero(&mut world, 150.0, 100.0);
    world.get_mut::<RigidBody>(e).unwrap().velocity = Vec2::new(20.0, 0.0);

    let mut schedule = scene::tick_schedule();
    scene::step(&mut world, &mut schedule, 1.0);

    assert_eq!(world.get::<MapPosition>(e).unwrap().pos, Vec2::new(150.0, 100.0));
    let state = world.get::<CollisionState>(e).unwrap();
    assert!(state.is_blocked);
    assert_eq!(state.dynamic_obstacle, None);

    // The next unobstructed move clears the flags.
    world.get_mut::<RigidBody>(e).unwrap().velocity = Vec2::new(0.0, 20.0);
    scene::step(&mut world, &mut schedule, 1.0);
    assert_eq!(world.get::<MapPosition>(e).unwrap().pos, Vec2::new(150.0, 120.0));
    assert!(!world.get::<CollisionState>(e).unwrap().is_blocked);
}

#[test]
fn static_objects_never_move() {
    let mut world = make_world(SimConfig::default());
    let e = scene::spawn_object(
        &mut world,
        Vec2::new(64.0, 64.0),
        SpriteObject::fixed(WorldRect::new(0.0, 0.0, 32.0, 32.0), TileType::Wall),
        None,
    );
    world.entity_mut(e).insert(RigidBody::with_velocity(Vec2::new(10.0, 10.0)));
    scene::initialize(&mut world);

    let mut schedule = scene::tick_schedule();
    scene::step(&mut world, &mut schedule, 1.0);
    assert_eq!(world.get::<MapPosition>(e).unwrap().pos, Vec2::new(64.0, 64.0));
}

#[test]
fn walking_character_animates_by_distance() {
    let mut world = make_world(SimConfig::default());
    let e = hero(&mut world, 100.0, 100.0);
    world.get_mut::<RigidBody>(e).unwrap().velocity = Vec2::new(20.0, 0.0);

    let mut schedule = scene::tick_schedule();
    scene::step(&mut world, &mut schedule, 0.5);

    // The first tick starts "east" from the position reached after moving.
    let player = world.get::<AnimationPlayer>(e).unwrap();
    assert!(player.is_playing("east"));
    assert_eq!(world.get::<Sprite>(e).unwrap().frame, TilePosition::new(0, 2));

    // 20 more units of a 40 stride is halfway through the cycle.
    scene::step(&mut world, &mut schedule, 1.0);
    assert_eq!(world.get::<Sprite>(e).unwrap().frame, TilePosition::new(2, 2));

    world.get_mut::<RigidBody>(e).unwrap().velocity = Vec2::ZERO;
    scene::step(&mut world, &mut schedule, 1.0);
    let player = world.get::<AnimationPlayer>(e).unwrap();
    assert!(player.is_stopped());
    assert_eq!(world.get::<Sprite>(e).unwrap().frame, TilePosition::new(0, 2));
}

#[test]
fn time_scale_slows_integration() {
    let mut config = SimConfig::default();
    config.time_scale = 0.5;
    let mut world = make_world(config);
    let e = hero(&mut world, 100.0, 100.0);
    world.get_mut::<RigidBody>(e).unwrap().velocity = Vec2::new(10.0, 0.0);

    let mut schedule = scene::tick_schedule();
    scene::step(&mut world, &mut schedule, 1.0);

    assert!(approx_eq(world.get::<MapPosition>(e).unwrap().pos.x, 105.0));
    assert_eq!(world.resource::<WorldTime>().frame_count, 1);
}

#[test]
fn debug_mode_records_steering_vectors() {
    let mut config = SimConfig::default();
    config.debug = true;
    let mut world = make_world(config);
    assert!(world.get_resource::<DebugMode>().is_some());

    let e = hero(&mut world, 100.0, 100.0);
    world
        .get_mut::<SteeringController>(e)
        .unwrap()
        .seek(Vec2::new(200.0, 100.0), 50.0);
    let mut schedule = scene::tick_schedule();
    scene::step(&mut world, &mut schedule, 0.01);

    let steering = world.get::<SteeringController>(e).unwrap();
    assert!(approx_eq(steering.debug.seek.x, 100.0));
    assert_eq!(steering.debug.velocity, world.get::<RigidBody>(e).unwrap().velocity);
}

#[test]
fn draw_order_sorts_by_y_and_pick_takes_topmost() {
    let mut world = make_world(SimConfig::default());
    let low = scene::spawn_object(
        &mut world,
        Vec2::new(40.0, 50.0),
        SpriteObject::new(WorldRect::new(0.0, 0.0, 4.0, 4.0)),
        Some(Sprite::new("hero", 32.0, 32.0).with_origin(Vec2::new(16.0, 32.0))),
    );
    let high = scene::spawn_object(
        &mut world,
        Vec2::new(40.0, 30.0),
        SpriteObject::new(WorldRect::new(0.0, 0.0, 4.0, 4.0)),
        Some(Sprite::new("hero", 32.0, 32.0).with_origin(Vec2::new(16.0, 32.0))),
    );
    let far = scene::spawn_object(
        &mut world,
        Vec2::new(200.0, 10.0),
        SpriteObject::new(WorldRect::new(0.0, 0.0, 4.0, 4.0)),
        Some(Sprite::new("hero", 32.0, 32.0)),
    );
    scene::initialize(&mut world);

    let order: Vec<Entity> = world.resource::<DrawOrder>().iter().collect();
    assert_eq!(order, vec![far, high, low]);

    // (40, 25) is inside both character boxes; the lower one is drawn on top.
    assert_eq!(pick(&mut world, Vec2::new(40.0, 25.0)), Some(low));
    assert_eq!(pick(&mut world, Vec2::new(40.0, 5.0)), Some(high));
    assert_eq!(pick(&mut world, Vec2::new(500.0, 500.0)), None);

    assert!(scene::despawn(&mut world, low));
    assert!(!scene::despawn(&mut world, low));
    assert_eq!(world.resource::<DrawOrder>().len(), 2);
}
