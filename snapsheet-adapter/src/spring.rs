use snapsheet::SpringConfig;

/// Integration substep. Small enough to stay stable for stiff, heavily damped springs.
const STEP_SECONDS: f32 = 1.0 / 240.0;
/// Longest stretch simulated by one `advance`, so a stalled frame loop doesn't spin.
const MAX_ELAPSED_MS: u64 = 1_000;
/// Displacement (px) below which the spring may come to rest.
const REST_DISPLACEMENT: f32 = 0.5;
/// Velocity (px/s) below which the spring may come to rest.
const REST_VELOCITY: f32 = 5.0;

fn magnitude(v: f32) -> f32 {
    if v < 0.0 { -v } else { v }
}

/// A damped spring driving the live offset toward a target.
///
/// The spring is stateful: call [`Spring::advance`] once per frame. Retargeting keeps the current
/// position and velocity, so an interrupted transition bends toward the new target instead of
/// restarting.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spring {
    pub config: SpringConfig,
    pub position: f32,
    /// Current velocity in px/s.
    pub velocity: f32,
    pub target: f32,
    last_ms: u64,
}

impl Spring {
    pub fn new(from: f32, to: f32, now_ms: u64, config: SpringConfig) -> Self {
        Self {
            config,
            position: from,
            velocity: 0.0,
            target: to,
            last_ms: now_ms,
        }
    }

    /// Seeds the spring with an initial velocity (e.g. the release velocity of a gesture).
    pub fn with_velocity(mut self, velocity: f32) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn is_settled(&self) -> bool {
        magnitude(self.target - self.position) < REST_DISPLACEMENT
            && magnitude(self.velocity) < REST_VELOCITY
    }

    /// Simulates up to `now_ms` and returns the new position.
    pub fn advance(&mut self, now_ms: u64) -> f32 {
        let elapsed_ms = now_ms.saturating_sub(self.last_ms).min(MAX_ELAPSED_MS);
        self.last_ms = self.last_ms.max(now_ms);

        let mass = if self.config.mass > 0.0 { self.config.mass } else { 1.0 };
        let mut remaining = elapsed_ms as f32 / 1000.0;
        while remaining > 0.0 && !self.is_settled() {
            let step = remaining.min(STEP_SECONDS);
            let displacement = self.position - self.target;
            let force = -self.config.stiffness * displacement - self.config.damping * self.velocity;
            // Semi-implicit Euler: velocity first, then position with the new velocity.
            self.velocity += force / mass * step;
            self.position += self.velocity * step;
            remaining -= step;
        }

        if self.is_settled() {
            self.position = self.target;
            self.velocity = 0.0;
        }
        self.position
    }

    /// Points the spring at a new target without losing momentum.
    ///
    /// Retargeting to the current target does nothing.
    pub fn retarget(&mut self, now_ms: u64, new_to: f32) {
        if self.target == new_to {
            return;
        }
        self.advance(now_ms);
        self.target = new_to;
    }
}
