use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemState;
use glam::Vec2;

use crate::components::Renderable;
use crate::components::mapposition::MapPosition;
use crate::components::sprite::Sprite;
use crate::resources::draworder::DrawOrder;

/// Rebuild [`DrawOrder`] back to front, by ascending y.
///
/// The sort is stable, so sprites on the same row keep world iteration order.
pub fn sort_draw_order(query: Query<(Entity, &MapPosition), With<Sprite>>, mut order: ResMut<DrawOrder>) {
    let mut sprites: Vec<(Entity, f32)> = query.iter().map(|(e, p)| (e, p.pos.y)).collect();
    sprites.sort_by(|a, b| a.1.total_cmp(&b.1));
    order.entities.clear();
    order.entities.extend(sprites.into_iter().map(|(e, _)| e));
}

/// Topmost sprite (greatest y) whose bounding box contains `point`.
pub fn pick(world: &mut World, point: Vec2) -> Option<Entity> {
    let mut state = SystemState::<Query<(Entity, &MapPosition, &Sprite)>>::new(world);
    let query = state.get(world);
    query
        .iter()
        .filter(|(_, position, sprite)| sprite.hit_test(position.pos, point))
        .max_by(|a, b| a.1.pos.y.total_cmp(&b.1.pos.y))
        .map(|(entity, _, _)| entity)
}
