use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use clap::ValueEnum;
use serde::Serialize;
use tracing::debug;

use taskdeck_core::config::{AxisPreference, ScrollConfig};
use taskdeck_core::scroll::{
    steps_to_settle, Axis, ScrollEngine, ScrollEvent, ScrollSurface, VirtualSurface, WrapJump,
};
use taskdeck_core::AppConfig;

/// Time between the pointer sample and release in the scripted drag
const SAMPLE_MS: u64 = 4;
/// Cross-axis size of the simulated surface
const CROSS_EXTENT: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisArg {
    Horizontal,
    Vertical,
}

impl From<AxisArg> for Axis {
    fn from(arg: AxisArg) -> Self {
        match arg {
            AxisArg::Horizontal => Axis::Horizontal,
            AxisArg::Vertical => Axis::Vertical,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimulateParams {
    pub velocity: f64,
    pub axis: AxisArg,
    pub viewport: f64,
    pub content: f64,
    pub start: f64,
    pub wrap: bool,
}

#[derive(Debug, Serialize)]
pub struct Frame {
    pub t_ms: u64,
    pub offset: f64,
    pub velocity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrapped: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct Trajectory {
    pub axis: AxisArg,
    pub release_velocity: f64,
    pub start_offset: f64,
    pub release_offset: f64,
    pub final_offset: f64,
    pub steps: u32,
    pub step_bound: u32,
    pub frames: Vec<Frame>,
}

pub fn run(config: &AppConfig, params: &SimulateParams) -> Result<()> {
    let trajectory = simulate(&config.scroll, params)?;
    println!("{}", serde_json::to_string_pretty(&trajectory)?);
    Ok(())
}

/// Drag, release at `params.velocity` and tick until momentum settles
pub fn simulate(scroll: &ScrollConfig, params: &SimulateParams) -> Result<Trajectory> {
    if !(params.viewport > 0.0) || !(params.content > 0.0) {
        bail!("viewport and content must be positive");
    }
    if !params.velocity.is_finite() {
        bail!("velocity must be a finite number, got {}", params.velocity);
    }

    let axis: Axis = params.axis.into();
    let config = ScrollConfig {
        axis: match axis {
            Axis::Horizontal => AxisPreference::Horizontal,
            Axis::Vertical => AxisPreference::Vertical,
        },
        circular: params.wrap,
        ..scroll.clone()
    };
    config.validate()?;

    let mut surface = match axis {
        Axis::Horizontal => VirtualSurface::new(params.viewport, CROSS_EXTENT, params.content, CROSS_EXTENT),
        Axis::Vertical => VirtualSurface::new(CROSS_EXTENT, params.viewport, CROSS_EXTENT, params.content),
    };
    surface.set_scroll_offset(axis, params.start);
    let start_offset = surface.scroll_offset(axis);

    let mut engine = ScrollEngine::new(&config, params.viewport);
    let frame_ms = config.frame_interval_ms;

    // A single sample yields exactly the requested release velocity
    let t0 = Instant::now();
    let travel = params.velocity * SAMPLE_MS as f64;
    let (x, y) = match axis {
        Axis::Horizontal => (travel, 0.0),
        Axis::Vertical => (0.0, travel),
    };
    engine.handle(ScrollEvent::PointerDown { x: 0.0, y: 0.0 }, &mut surface, t0);
    engine.handle(
        ScrollEvent::PointerMove { x, y },
        &mut surface,
        t0 + Duration::from_millis(SAMPLE_MS),
    );
    engine.handle(
        ScrollEvent::PointerUp,
        &mut surface,
        t0 + Duration::from_millis(SAMPLE_MS),
    );
    let release_offset = surface.scroll_offset(axis);
    let release_velocity = engine.tracker().velocity();
    let step_bound = steps_to_settle(release_velocity, config.friction, config.velocity_threshold);
    debug!(release_velocity, release_offset, step_bound, "fling released");

    let mut frames = Vec::new();
    let mut steps = 0u32;
    while engine.needs_update() {
        steps += 1;
        let elapsed = SAMPLE_MS + steps as u64 * frame_ms;
        let outcome = engine.handle(
            ScrollEvent::Tick,
            &mut surface,
            t0 + Duration::from_millis(elapsed),
        );
        frames.push(Frame {
            t_ms: elapsed,
            offset: surface.scroll_offset(axis),
            velocity: engine.momentum_velocity(),
            wrapped: outcome.wrapped.map(|jump| match jump {
                WrapJump::ToEnd => "to-end",
                WrapJump::ToStart => "to-start",
            }),
        });
        if steps > step_bound {
            bail!("momentum exceeded its step bound of {}", step_bound);
        }
    }

    Ok(Trajectory {
        axis: params.axis,
        release_velocity,
        start_offset,
        release_offset,
        final_offset: surface.scroll_offset(axis),
        steps,
        step_bound,
        frames,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(velocity: f64) -> SimulateParams {
        SimulateParams {
            velocity,
            axis: AxisArg::Horizontal,
            viewport: 300.0,
            content: 1000.0,
            start: 350.0,
            wrap: true,
        }
    }

    #[test]
    fn test_fling_settles_within_bound() {
        let trajectory = simulate(&ScrollConfig::default(), &params(-1.0)).unwrap();
        assert_eq!(trajectory.step_bound, 45);
        assert!(trajectory.steps <= trajectory.step_bound);
        assert!(!trajectory.frames.is_empty());
        // Pointer moved left, content keeps scrolling forward
        assert!(trajectory.final_offset > trajectory.release_offset);
    }

    #[test]
    fn test_slow_release_has_no_momentum() {
        let trajectory = simulate(&ScrollConfig::default(), &params(0.05)).unwrap();
        assert_eq!(trajectory.steps, 0);
        assert!(trajectory.frames.is_empty());
    }

    #[test]
    fn test_no_overflow_has_no_momentum() {
        let mut p = params(3.0);
        p.content = 200.0;
        let trajectory = simulate(&ScrollConfig::default(), &p).unwrap();
        assert_eq!(trajectory.steps, 0);
    }

    #[test]
    fn test_non_finite_velocity_is_rejected() {
        for velocity in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(simulate(&ScrollConfig::default(), &params(velocity)).is_err());
        }
    }

    #[test]
    fn test_json_shape() {
        let trajectory = simulate(&ScrollConfig::default(), &params(2.0)).unwrap();
        let json = serde_json::to_value(&trajectory).unwrap();
        assert_eq!(json["axis"], "horizontal");
        assert!(json["frames"].is_array());
    }
}
