//! Resumable path-following state.
//!
//! A [`PathFollower`] walks a list of world-space waypoints one tick at a
//! time. It only remembers the index of the next waypoint, so it can be
//! suspended between ticks and resumed without losing progress. Finishing
//! (by completion, cancellation or timeout) is reported exactly once so the
//! caller can stop the steering controller and leave no stale target behind.

use bevy_ecs::prelude::Component;
use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowStatus {
    Following,
    Completed,
    Cancelled,
    TimedOut,
}

/// What the follower wants from the steering controller this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FollowStep {
    /// Seek this waypoint.
    Seek(Vec2),
    /// The path just ended with this status; stop the controller.
    Finished(FollowStatus),
    /// Finished on an earlier tick; nothing to do.
    Idle,
}

#[derive(Debug, Clone, Component)]
pub struct PathFollower {
    waypoints: Vec<Vec2>,
    index: usize,
    pub speed: f32,
    pub arrival_radius: f32,
    status: FollowStatus,
    /// Seconds after which the follower gives up.
    pub timeout: Option<f32>,
    elapsed: f32,
    reported: bool,
}

impl PathFollower {
    pub fn new(waypoints: Vec<Vec2>, speed: f32, arrival_radius: f32) -> Self {
        Self {
            waypoints,
            index: 0,
            speed,
            arrival_radius,
            status: FollowStatus::Following,
            timeout: None,
            elapsed: 0.0,
            reported: false,
        }
    }

    pub fn with_timeout(mut self, seconds: f32) -> Self {
        self.timeout = Some(seconds);
        self
    }

    pub fn status(&self) -> FollowStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status != FollowStatus::Following
    }

    /// Index of the waypoint currently sought.
    pub fn waypoint_index(&self) -> usize {
        self.index
    }

    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    pub fn current_waypoint(&self) -> Option<Vec2> {
        match self.status {
            FollowStatus::Following => self.waypoints.get(self.index).copied(),
            _ => None,
        }
    }

    /// Abandon the path; the next step reports `Finished(Cancelled)`.
    pub fn cancel(&mut self) {
        if self.status == FollowStatus::Following {
            self.status = FollowStatus::Cancelled;
        }
    }

    /// Advance by one tick of `dt` seconds for a body now at `position`.
    pub fn step(&mut self, position: Vec2, dt: f32) -> FollowStep {
        if self.status == FollowStatus::Following {
            self.elapsed += dt;
            if self.timeout.is_some_and(|t| self.elapsed > t) {
                self.status = FollowStatus::TimedOut;
            } else {
                while self
                    .waypoints
                    .get(self.index)
                    .is_some_and(|w| position.distance(*w) <= self.arrival_radius)
                {
                    self.index += 1;
                }
                match self.waypoints.get(self.index) {
                    Some(w) => return FollowStep::Seek(*w),
                    None => self.status = FollowStatus::Completed,
                }
            }
        }
        if self.reported {
            return FollowStep::Idle;
        }
        self.reported = true;
        FollowStep::Finished(self.status)
    }
}
