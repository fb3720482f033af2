use bevy::prelude::*;

/// Current velocity, world units per second.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

/// Velocity the avatar is steering toward, derived from movement input and
/// the character profile each fixed tick.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct DesiredVelocity {
    pub x: f32,
    pub y: f32,
}

/// Raw movement input accumulated by the input handlers since the last fixed
/// tick. Consumed (and cleared) when desired velocity is computed.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct MovementInput {
    pub accumulated: Vec2,
}

impl MovementInput {
    pub fn add(&mut self, direction: Vec2, scale: f32) {
        self.accumulated += direction * scale;
    }

    pub fn consume(&mut self) -> Vec2 {
        let input = self.accumulated.clamp_length_max(1.0);
        self.accumulated = Vec2::ZERO;
        input
    }
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Friction {
    pub coefficient: f32,
}

impl Default for Friction {
    fn default() -> Self {
        Self { coefficient: 0.95 }
    }
}

/// Control rotation driven by Look input. Yaw defines the movement reference
/// frame; pitch is camera-only and clamped.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Orientation {
    pub yaw: f32,
    pub pitch: f32,
}

const PITCH_LIMIT: f32 = 1.4;

impl Orientation {
    pub fn add_input(&mut self, yaw: f32, pitch: f32) {
        self.yaw += yaw;
        self.pitch = (self.pitch + pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn forward(&self) -> Vec2 {
        // Yaw 0 faces +Y; positive yaw turns clockwise toward +X.
        Vec2::new(self.yaw.sin(), self.yaw.cos())
    }

    pub fn right(&self) -> Vec2 {
        let forward = self.forward();
        Vec2::new(forward.y, -forward.x)
    }
}

/// Jump and crouch state. Airborne time counts down each tick; releasing the
/// jump input cuts the remaining ascent in half once.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct CharacterStance {
    pub crouched: bool,
    pub airborne_remaining: f32,
    pub jump_held: bool,
}

impl CharacterStance {
    pub fn is_airborne(&self) -> bool {
        self.airborne_remaining > 0.0
    }

    pub fn begin_jump(&mut self, duration: f32) {
        if !self.is_airborne() {
            self.airborne_remaining = duration;
            self.jump_held = true;
            // Jumping stands the avatar up.
            self.crouched = false;
        }
    }

    pub fn release_jump(&mut self) {
        if self.jump_held {
            self.jump_held = false;
            self.airborne_remaining *= 0.5;
        }
    }
}
