// Clip playback engine
// Operates on a session's clip list. Every clip sharing a name is driven together.

use crate::model::AnimationClip;
use crate::scene::ActionHandle;
use std::rc::Weak;

/// Attach a live player to every clip called `clip_name`.
/// Rebinding replaces the previous handle; binding the same handle again is a no-op.
/// Returns the number of clips whose binding changed.
pub fn bind_runtime_handle(clips: &mut [AnimationClip], clip_name: &str, handle: &ActionHandle) -> usize {
    let mut bound = 0;

    for clip in clips.iter_mut().filter(|clip| clip.name == clip_name) {
        if clip
            .runtime_binding()
            .is_some_and(|current| Weak::ptr_eq(current, handle))
        {
            continue;
        }

        clip.set_runtime_binding(handle.clone());
        bound += 1;

        // A fresh player picks up whatever the user set before the scene was mounted
        if let Some(action) = clip.live_action() {
            let mut action = action.borrow_mut();
            action.set_time_scale(clip.speed_multiplier);
            if clip.is_playing {
                action.reset().play();
            }
        }
    }

    if bound > 0 {
        log::debug!("Bound runtime handle for clip '{clip_name}' ({bound} clip(s))");
    }
    bound
}

/// Set `is_playing` to `play`, or flip it when `play` is `None`.
/// Bound players restart from time 0 on play and stop (rewinding) on pause.
/// Returns the new state, or `None` when no clip has that name.
pub fn toggle(clips: &mut [AnimationClip], clip_name: &str, play: Option<bool>) -> Option<bool> {
    let mut result = None;

    for clip in clips.iter_mut().filter(|clip| clip.name == clip_name) {
        let should_play = play.unwrap_or(!clip.is_playing);
        clip.is_playing = should_play;

        match clip.live_action() {
            Some(action) => {
                let mut action = action.borrow_mut();
                if should_play {
                    action.reset().play();
                } else {
                    action.stop();
                }
            }
            None => log::debug!("Clip '{clip_name}' is not bound yet; state updated only"),
        }

        result = Some(should_play);
    }

    result
}

/// Store a new speed multiplier. Any value is accepted; range limits belong to the UI.
/// Returns false when no clip has that name.
pub fn set_speed(clips: &mut [AnimationClip], clip_name: &str, multiplier: f32) -> bool {
    let mut found = false;

    for clip in clips.iter_mut().filter(|clip| clip.name == clip_name) {
        clip.speed_multiplier = multiplier;
        if let Some(action) = clip.live_action() {
            action.borrow_mut().set_time_scale(multiplier);
        }
        found = true;
    }

    found
}

/// Stop and rewind every bound player and mark every clip as not playing.
/// Speed multipliers are kept.
pub fn reset_all(clips: &mut [AnimationClip]) {
    for clip in clips.iter_mut() {
        if let Some(action) = clip.live_action() {
            action.borrow_mut().stop().reset();
        }
        clip.is_playing = false;
    }
}
