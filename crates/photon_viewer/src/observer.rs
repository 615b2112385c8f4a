//! Keyboard-driven observer (fly camera).
//!
//! Position plus yaw/pitch; the view direction is derived from the angles.
//! Movement is horizontal along the yaw heading, with separate vertical keys.

use photon_math::DVec3;

/// Distance moved per key press.
const MOVE_SPEED: f64 = 0.3;

/// Radians turned per key press.
const ROTATION_STEP: f64 = 0.1;

/// Pitch limit in radians, short of straight up/down.
const PITCH_LIMIT: f64 = 1.5;

/// Observer commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Forward,
    Back,
    Left,
    Right,
    Up,
    Down,
    YawLeft,
    YawRight,
    LookDown,
    LookUp,
}

impl Key {
    /// Map a keyboard character (`w s a d r f q e z x`) to a command.
    pub fn from_char(c: char) -> Option<Key> {
        match c.to_ascii_lowercase() {
            'w' => Some(Key::Forward),
            's' => Some(Key::Back),
            'a' => Some(Key::Left),
            'd' => Some(Key::Right),
            'r' => Some(Key::Up),
            'f' => Some(Key::Down),
            'q' => Some(Key::YawLeft),
            'e' => Some(Key::YawRight),
            'z' => Some(Key::LookDown),
            'x' => Some(Key::LookUp),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverController {
    pub position: DVec3,
    pub yaw: f64,
    pub pitch: f64,
    pub move_speed: f64,
}

impl Default for ObserverController {
    fn default() -> Self {
        Self::new(DVec3::new(0.0, 0.0, -5.0))
    }
}

impl ObserverController {
    /// Start at `position` looking down +Z.
    pub fn new(position: DVec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            move_speed: MOVE_SPEED,
        }
    }

    /// Unit view direction `(cos p · sin y, sin p, cos p · cos y)`.
    pub fn direction(&self) -> DVec3 {
        DVec3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        )
    }

    /// Horizontal heading used for forward/back movement.
    fn forward(&self) -> DVec3 {
        DVec3::new(self.yaw.sin(), 0.0, self.yaw.cos())
    }

    fn right(&self) -> DVec3 {
        DVec3::new(self.yaw.cos(), 0.0, -self.yaw.sin())
    }

    /// Apply one key press.
    pub fn handle_key(&mut self, key: Key) {
        let step = self.move_speed;
        match key {
            Key::Forward => self.position += self.forward() * step,
            Key::Back => self.position -= self.forward() * step,
            Key::Left => self.position -= self.right() * step,
            Key::Right => self.position += self.right() * step,
            Key::Up => self.position += DVec3::Y * step,
            Key::Down => self.position -= DVec3::Y * step,
            Key::YawLeft => self.yaw -= ROTATION_STEP,
            Key::YawRight => self.yaw += ROTATION_STEP,
            Key::LookDown => self.pitch = (self.pitch - ROTATION_STEP).max(-PITCH_LIMIT),
            Key::LookUp => self.pitch = (self.pitch + ROTATION_STEP).min(PITCH_LIMIT),
        }
        log::debug!("{:?} -> position {:?}, direction {:?}", key, self.position, self.direction());
    }
}
