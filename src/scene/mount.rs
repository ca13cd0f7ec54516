// Render-side mount of a session
// Owns the clip players; sessions only see them through weak handles.

use super::action::{ActionHandle, ClipAction};
use crate::model::{AnimationClip, SessionId};
use std::cell::RefCell;
use std::rc::Rc;

pub struct SceneMount {
    session_id: SessionId,
    actions: Vec<Rc<RefCell<ClipAction>>>,
}

impl SceneMount {
    /// Create one player per distinct clip name, in order of first appearance.
    /// Clips sharing a name are driven together, so they share a player; the last
    /// of them supplies its duration.
    pub fn new(session_id: SessionId, clips: &[AnimationClip]) -> Self {
        let mut actions: Vec<Rc<RefCell<ClipAction>>> = Vec::with_capacity(clips.len());
        for clip in clips {
            let player = ClipAction::new(&clip.name, clip.duration_seconds);
            match actions
                .iter()
                .find(|action| action.borrow().clip_name() == clip.name)
            {
                Some(existing) => *existing.borrow_mut() = player,
                None => actions.push(Rc::new(RefCell::new(player))),
            }
        }
        Self { session_id, actions }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn actions(&self) -> &[Rc<RefCell<ClipAction>>] {
        &self.actions
    }

    pub fn action(&self, clip_name: &str) -> Option<&Rc<RefCell<ClipAction>>> {
        self.actions
            .iter()
            .find(|action| action.borrow().clip_name() == clip_name)
    }

    /// Weak handles paired with the clip name they play, for binding.
    pub fn handles(&self) -> Vec<(String, ActionHandle)> {
        self.actions
            .iter()
            .map(|action| (action.borrow().clip_name().to_string(), Rc::downgrade(action)))
            .collect()
    }

    pub fn running_count(&self) -> usize {
        self.actions
            .iter()
            .filter(|action| action.borrow().is_running())
            .count()
    }

    pub fn update(&mut self, dt: f32) {
        for action in &self.actions {
            action.borrow_mut().update(dt);
        }
    }
}
