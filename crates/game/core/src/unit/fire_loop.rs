//! Per-unit repeating fire timer.
//!
//! A suspend/resume state machine resumed once per host frame:
//!
//! ```text
//!            start()                 targets present
//!   Idle ───────────► AwaitTargets ─────────────────► Cooldown { elapsed }
//!    ▲                     ▲                                │
//!    │ stop()              │        elapsed >= interval     │
//!    └──── (any state)     └──────────── fire ◄─────────────┘
//! ```
//!
//! While awaiting targets the loop re-checks every frame instead of blocking.
//! A stopped loop never reports a due shot, even if its wait had already
//! elapsed: the check happens at resume time.

#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FireState {
    #[default]
    Idle,
    /// Firing but suspended until a target exists.
    AwaitTargets,
    /// Waiting out the fire interval.
    Cooldown { elapsed: f32 },
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FireLoop {
    state: FireState,
}

impl FireLoop {
    pub fn state(&self) -> FireState {
        self.state
    }

    pub fn is_firing(&self) -> bool {
        !matches!(self.state, FireState::Idle)
    }

    /// Arms the loop. Returns false if it was already firing.
    pub fn start(&mut self) -> bool {
        if self.is_firing() {
            return false;
        }
        self.state = FireState::AwaitTargets;
        true
    }

    /// Cancels the loop and any pending wait. Returns false if already idle.
    pub fn stop(&mut self) -> bool {
        if !self.is_firing() {
            return false;
        }
        self.state = FireState::Idle;
        true
    }

    /// Resumes the loop for one frame. Returns true when a shot is due.
    ///
    /// At most one shot per frame. After a due shot the loop waits for
    /// [`FireLoop::rearm`] to restart the interval.
    pub fn advance(&mut self, dt: f32, has_targets: bool, interval: f32) -> bool {
        match self.state {
            FireState::Idle => false,
            FireState::AwaitTargets => {
                if has_targets {
                    self.state = FireState::Cooldown { elapsed: 0.0 };
                }
                false
            }
            FireState::Cooldown { elapsed } => {
                let elapsed = elapsed + dt;
                if elapsed >= interval {
                    self.state = FireState::AwaitTargets;
                    true
                } else {
                    self.state = FireState::Cooldown { elapsed };
                    false
                }
            }
        }
    }

    /// Restarts the wait in the same frame a shot resolved, if targets remain.
    pub fn rearm(&mut self, has_targets: bool) {
        if self.state == FireState::AwaitTargets && has_targets {
            self.state = FireState::Cooldown { elapsed: 0.0 };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_loop_never_fires() {
        let mut fire_loop = FireLoop::default();
        for _ in 0..100 {
            assert!(!fire_loop.advance(1.0, true, 0.1));
        }
    }

    #[test]
    fn start_and_stop_are_idempotent() {
        let mut fire_loop = FireLoop::default();
        assert!(fire_loop.start());
        assert!(!fire_loop.start());
        assert!(fire_loop.stop());
        assert!(!fire_loop.stop());
    }

    #[test]
    fn polls_until_targets_then_waits_interval() {
        let mut fire_loop = FireLoop::default();
        fire_loop.start();

        for _ in 0..10 {
            assert!(!fire_loop.advance(0.5, false, 1.0));
            assert_eq!(fire_loop.state(), FireState::AwaitTargets);
        }

        // Target appears: the wait starts this frame.
        assert!(!fire_loop.advance(0.5, true, 1.0));
        assert!(!fire_loop.advance(0.5, true, 1.0));
        assert!(fire_loop.advance(0.5, true, 1.0));

        fire_loop.rearm(true);
        assert_eq!(fire_loop.state(), FireState::Cooldown { elapsed: 0.0 });
    }

    #[test]
    fn stop_cancels_an_elapsed_wait() {
        let mut fire_loop = FireLoop::default();
        fire_loop.start();
        fire_loop.advance(0.0, true, 1.0);
        fire_loop.advance(0.9, true, 1.0);

        fire_loop.stop();
        assert!(!fire_loop.advance(5.0, true, 1.0));
    }

    #[test]
    fn rearm_without_targets_keeps_polling() {
        let mut fire_loop = FireLoop::default();
        fire_loop.start();
        fire_loop.advance(0.0, true, 1.0);
        assert!(fire_loop.advance(1.0, true, 1.0));

        fire_loop.rearm(false);
        assert_eq!(fire_loop.state(), FireState::AwaitTargets);
    }
}
