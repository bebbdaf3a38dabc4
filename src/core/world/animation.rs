//=========================================================================
// Animation Clock
//=========================================================================
//
// Idle-loop frame selection on a fixed cadence.
//
// Moving resets the clock; idling accumulates elapsed time and steps the
// frame once per `frame_duration`, carrying the remainder forward.
//
//=========================================================================

//=== AnimationState ======================================================

/// Per-entity animation cursor.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimationState {
    pub frame_index: usize,
    pub timer: f64,
}

//=== AnimationClock ======================================================

/// Cadence shared by every entity using the same sprite loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationClock {
    frame_duration: f64,
    frame_count: usize,
}

impl AnimationClock {
    /// # Panics
    ///
    /// Panics if `frame_duration` is not positive or `frame_count` is zero.
    pub fn new(frame_duration: f64, frame_count: usize) -> Self {
        assert!(
            frame_duration.is_finite() && frame_duration > 0.0,
            "frame duration must be positive, got {frame_duration}"
        );
        assert!(frame_count > 0, "frame count must be at least 1");

        Self {
            frame_duration,
            frame_count,
        }
    }

    /// Advances `state` by one tick of `elapsed` seconds.
    pub fn advance(&self, state: &mut AnimationState, is_moving: bool, elapsed: f64) {
        if is_moving {
            *state = AnimationState::default();
            return;
        }

        state.timer += elapsed.max(0.0);
        while state.timer >= self.frame_duration {
            state.timer -= self.frame_duration;
            state.frame_index = (state.frame_index + 1) % self.frame_count;
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
