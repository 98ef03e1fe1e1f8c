//! Simulation systems.
//!
//! This module groups all ECS systems that advance the simulation. Within a
//! tick they run in the order listed by
//! [`scene::tick_schedule`](crate::scene::tick_schedule).
//!
//! Submodules overview
//! - [`animation`] – select character animations and sample display frames
//! - [`collision`] – overlap queries and static footprint stamping
//! - [`draworder`] – back-to-front order and picking
//! - [`movement`] – integrate positions and roll back blocked moves
//! - [`pathfollow`] – path following, goto, facing and wandering
//! - [`steering`] – integrate steering controllers into velocities
//! - [`time`] – update simulation time and delta

pub mod animation;
pub mod collision;
pub mod draworder;
pub mod movement;
pub mod pathfollow;
pub mod steering;
pub mod time;
