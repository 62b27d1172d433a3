use serde::Serialize;

use crate::geo::Point2;

/// Default drone travel speed, in cells per tick.
pub const DRONE_SPEED: f64 = 1.0;
/// Observer eye height above the terrain directly underneath, in elevation
/// units.
pub const DRONE_HEIGHT: f64 = 1.0;

/// An aerial observer flying a fixed linear route at constant speed.
///
/// The drone exists (can be asked for a position) only within
/// `[start_time, end_time]`, where the end time is derived from the route
/// length and speed at construction. All fields are fixed afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Drone {
    pub origin: Point2,
    pub destination: Point2,
    pub start_time: f64,
    pub end_time: f64,
    pub speed: f64,
    velocity: Point2,
}

impl Drone {
    pub fn new(origin: Point2, destination: Point2, start_time: f64, speed: f64) -> Self {
        let end_time = origin.distance_to(destination) / speed + start_time;
        let dx = destination.x - origin.x;
        let dy = destination.y - origin.y;
        let len = (dx * dx + dy * dy).sqrt();
        let velocity = if len > 0.0 {
            Point2::new(dx / len, dy / len)
        } else {
            Point2::default()
        };
        Self {
            origin,
            destination,
            start_time,
            end_time,
            speed,
            velocity,
        }
    }

    /// Whether the drone is airborne at `time`. Callers must check this
    /// before asking for a position.
    pub fn exists_at(&self, time: f64) -> bool {
        time >= self.start_time && time <= self.end_time
    }

    /// Position at `time`. Unchecked: outside the existence window the
    /// result is a meaningless extrapolation, see [`Drone::exists_at`].
    pub fn position_at(&self, time: f64) -> Point2 {
        debug_assert!(
            self.exists_at(time),
            "drone queried at {time}, exists in [{}, {}]",
            self.start_time,
            self.end_time
        );
        let dt = time - self.start_time;
        Point2::new(
            self.origin.x + self.velocity.x * self.speed * dt,
            self.origin.y + self.velocity.y * self.speed * dt,
        )
    }

    /// Checked variant of [`Drone::position_at`] for callers outside the
    /// snapshot hot loop.
    pub fn try_position_at(&self, time: f64) -> Option<Point2> {
        self.exists_at(time).then(|| self.position_at(time))
    }
}
