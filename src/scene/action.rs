use std::cell::RefCell;
use std::rc::Weak;

/// Weak reference a session keeps to a clip player owned by the mounted scene.
pub type ActionHandle = Weak<RefCell<ClipAction>>;

/// Live playback state of one clip on a mounted scene.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipAction {
    clip_name: String,
    duration: f32,
    pub time: f32,
    time_scale: f32,
    running: bool,
}

impl ClipAction {
    pub fn new(clip_name: impl Into<String>, duration: f32) -> Self {
        Self {
            clip_name: clip_name.into(),
            duration,
            time: 0.0,
            time_scale: 1.0,
            running: false,
        }
    }

    pub fn clip_name(&self) -> &str {
        &self.clip_name
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Rewind to the first frame without changing the running state.
    pub fn reset(&mut self) -> &mut Self {
        self.time = 0.0;
        self
    }

    pub fn play(&mut self) -> &mut Self {
        self.running = true;
        self
    }

    /// Stop playback and rewind. There is no paused-in-place state.
    pub fn stop(&mut self) -> &mut Self {
        self.running = false;
        self.reset()
    }

    pub fn set_time_scale(&mut self, time_scale: f32) -> &mut Self {
        self.time_scale = time_scale;
        self
    }

    /// Advance the clip by `dt` seconds, looping at the clip boundaries.
    pub fn update(&mut self, dt: f32) {
        if !self.running || self.duration <= 0.0 {
            return;
        }

        self.time += dt * self.time_scale;

        if self.time >= self.duration {
            self.time %= self.duration;
        } else if self.time < 0.0 {
            // Reverse playback wraps to the end
            self.time = self.duration + (self.time % self.duration);
        }
    }
}
