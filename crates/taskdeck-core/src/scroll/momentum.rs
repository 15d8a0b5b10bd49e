//! Inertial scrolling after drag release
//!
//! Velocity decays geometrically once per frame. Each run is identified by a
//! [`MomentumToken`]; stepping with a token from an earlier run does nothing.

use tracing::debug;

/// Handle identifying one momentum run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MomentumToken(u64);

/// Result of advancing the animation by one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// The offset should change by `delta`; the run continues
    Moved { delta: f64 },
    /// Velocity fell below the threshold; the run is over
    Finished,
    /// The token does not belong to the live run
    Stale,
}

#[derive(Debug, Clone, Copy)]
struct ActiveRun {
    token: MomentumToken,
    velocity: f64,
    steps: u32,
}

/// Decaying-velocity animator with Idle/Running states
#[derive(Debug, Clone)]
pub struct MomentumAnimator {
    friction: f64,
    threshold: f64,
    frame_ms: f64,
    generation: u64,
    run: Option<ActiveRun>,
}

impl MomentumAnimator {
    pub fn new(friction: f64, threshold: f64, frame_ms: f64) -> Self {
        Self {
            friction,
            threshold,
            frame_ms,
            generation: 0,
            run: None,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// Token of the live run, if any
    pub fn token(&self) -> Option<MomentumToken> {
        self.run.map(|r| r.token)
    }

    /// Current velocity, zero when idle
    pub fn velocity(&self) -> f64 {
        self.run.map(|r| r.velocity).unwrap_or(0.0)
    }

    /// Start a run if `velocity` is above the threshold
    ///
    /// Any earlier run is cancelled either way. A non-finite velocity never
    /// starts a run, since it could not decay below the threshold.
    pub fn start_if_significant(&mut self, velocity: f64) -> Option<MomentumToken> {
        self.cancel();

        if !velocity.is_finite() || velocity.abs() <= self.threshold {
            return None;
        }

        self.generation += 1;
        let token = MomentumToken(self.generation);
        self.run = Some(ActiveRun {
            token,
            velocity,
            steps: 0,
        });
        debug!(velocity, token = self.generation, "momentum started");
        Some(token)
    }

    /// Advance the run identified by `token` by one frame
    pub fn step(&mut self, token: MomentumToken) -> StepOutcome {
        let Some(run) = self.run.as_mut().filter(|r| r.token == token) else {
            return StepOutcome::Stale;
        };

        run.velocity *= self.friction;
        run.steps += 1;

        if run.velocity.abs() < self.threshold {
            debug!(steps = run.steps, "momentum settled");
            self.run = None;
            return StepOutcome::Finished;
        }

        StepOutcome::Moved {
            delta: -run.velocity * self.frame_ms,
        }
    }

    /// Invalidate the live run; returns whether one was running
    pub fn cancel(&mut self) -> bool {
        match self.run.take() {
            Some(run) => {
                debug!(steps = run.steps, "momentum cancelled");
                true
            }
            None => false,
        }
    }
}

/// Upper bound on steps until `|v0|` decays below `threshold`
pub fn steps_to_settle(v0: f64, friction: f64, threshold: f64) -> u32 {
    if v0.abs() < threshold {
        return 0;
    }
    ((threshold / v0.abs()).ln() / friction.ln()).ceil() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animator() -> MomentumAnimator {
        MomentumAnimator::new(0.95, 0.1, 16.0)
    }

    fn run_to_end(animator: &mut MomentumAnimator, token: MomentumToken) -> (u32, f64) {
        let mut steps = 0;
        let mut travelled = 0.0;
        loop {
            match animator.step(token) {
                StepOutcome::Moved { delta } => travelled += delta,
                StepOutcome::Finished => return (steps + 1, travelled),
                StepOutcome::Stale => panic!("token went stale mid-run"),
            }
            steps += 1;
            assert!(steps < 10_000, "momentum did not terminate");
        }
    }

    #[test]
    fn test_below_threshold_does_nothing() {
        let mut animator = animator();
        assert!(animator.start_if_significant(0.1).is_none());
        assert!(animator.start_if_significant(-0.05).is_none());
        assert!(!animator.is_running());
    }

    #[test]
    fn test_non_finite_velocity_does_nothing() {
        let mut animator = animator();
        for v0 in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(animator.start_if_significant(v0).is_none());
            assert!(!animator.is_running());
        }
    }

    #[test]
    fn test_first_step_applies_decayed_velocity() {
        let mut animator = animator();
        let token = animator.start_if_significant(2.0).unwrap();
        match animator.step(token) {
            StepOutcome::Moved { delta } => assert!((delta + 1.9 * 16.0).abs() < 1e-9),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_terminates_within_bound() {
        for v0 in [5.0, -5.0, 0.2, 12.5] {
            let mut animator = animator();
            let token = animator.start_if_significant(v0).unwrap();
            let (steps, travelled) = run_to_end(&mut animator, token);
            let bound = steps_to_settle(v0, 0.95, 0.1);
            assert!(steps <= bound, "v0={} took {} steps, bound {}", v0, steps, bound);
            assert!(!animator.is_running());
            // Content keeps moving opposite to the pointer's direction of travel
            assert!(travelled.signum() == -v0.signum() || travelled == 0.0);
        }
        assert_eq!(steps_to_settle(5.0, 0.95, 0.1), 77);
    }

    #[test]
    fn test_cancel_makes_token_stale() {
        let mut animator = animator();
        let token = animator.start_if_significant(3.0).unwrap();
        assert!(animator.cancel());
        assert_eq!(animator.step(token), StepOutcome::Stale);
        assert!(!animator.cancel());
    }

    #[test]
    fn test_new_run_invalidates_previous_token() {
        let mut animator = animator();
        let first = animator.start_if_significant(3.0).unwrap();
        let second = animator.start_if_significant(-3.0).unwrap();
        assert_ne!(first, second);
        assert_eq!(animator.step(first), StepOutcome::Stale);
        assert!(matches!(animator.step(second), StepOutcome::Moved { .. }));
    }
}
