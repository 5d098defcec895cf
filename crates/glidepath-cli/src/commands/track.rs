use std::time::Duration;

use anyhow::{bail, Result};
use serde::Serialize;

use glidepath_core::{AppConfig, Point, PointerTracker, Rect, SizePreset, StaticProbe, TargetSpec};

const ELEMENT: &str = "target";

pub struct TrackArgs {
    pub anchor: Point,
    pub pointer: Point,
    pub size: SizePreset,
    pub max_deflection: Option<f64>,
    pub frames: usize,
    pub dt_ms: u64,
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct TrackFrame {
    frame: usize,
    t_ms: u64,
    offset: Point,
}

#[derive(Debug, Serialize)]
struct TrackReport {
    size: SizePreset,
    max_deflection: f64,
    raw: Point,
    trajectory: Vec<TrackFrame>,
}

pub fn run(config: &AppConfig, args: TrackArgs) -> Result<()> {
    let report = simulate(config, &args)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "raw offset  ({:.3}, {:.3})  |{:.3}| <= {}",
        report.raw.x,
        report.raw.y,
        report.raw.length(),
        report.max_deflection
    );
    for frame in &report.trajectory {
        println!(
            "{:>4} {:>6}ms  ({:.3}, {:.3})",
            frame.frame, frame.t_ms, frame.offset.x, frame.offset.y
        );
    }
    Ok(())
}

/// Register one target around `anchor`, move the pointer once, then step frames
fn simulate(config: &AppConfig, args: &TrackArgs) -> Result<TrackReport> {
    let mut pointer_config = config.pointer.clone();
    if let Some(max) = args.max_deflection {
        if !max.is_finite() || max < 0.0 {
            bail!("--max-deflection must be a finite, non-negative number");
        }
        pointer_config.size_mut(args.size).max_deflection = max;
    }
    let size = pointer_config.size(args.size);

    // The anchor is the center of an element with the preset's diameter
    let diameter = size.diameter.max(1.0);
    let probe = StaticProbe::new().with(
        ELEMENT,
        Rect::new(
            args.anchor.x - diameter / 2.0,
            args.anchor.y - diameter / 2.0,
            diameter,
            diameter,
        ),
    );

    let mut tracker = PointerTracker::new(pointer_config);
    let handle = tracker.register(TargetSpec::new(ELEMENT, args.size), &probe);
    tracker.on_pointer_move(args.pointer);
    let raw = tracker.raw_offset_of(handle);

    let dt = Duration::from_millis(args.dt_ms);
    let trajectory = (1..=args.frames)
        .map(|frame| {
            tracker.frame(dt, &probe);
            TrackFrame {
                frame,
                t_ms: args.dt_ms.saturating_mul(frame as u64),
                offset: tracker.offset_of(handle),
            }
        })
        .collect();

    Ok(TrackReport {
        size: args.size,
        max_deflection: size.max_deflection,
        raw,
        trajectory,
    })
}
