//! Back-to-front drawing order.
//!
//! Sprites lower on screen (greater y) are drawn later, on top of the ones
//! behind them. The order is rebuilt at the end of every tick by
//! [`sort_draw_order`](crate::systems::draworder::sort_draw_order).

use bevy_ecs::prelude::*;

#[derive(Resource, Debug, Clone, Default)]
pub struct DrawOrder {
    pub entities: Vec<Entity>,
}

impl DrawOrder {
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn remove(&mut self, entity: Entity) {
        self.entities.retain(|e| *e != entity);
    }
}
