use anyhow::Result;

use glidepath_core::{AppConfig, GuideSnapshot, StepGuide};

pub fn run(config: &AppConfig, fraction: Option<f64>, json: bool) -> Result<()> {
    let guide = StepGuide::from_config(&config.guide)?;
    let snapshot = guide.snapshot(fraction);

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", render(&guide, &snapshot));
    }
    Ok(())
}

/// Plain-text report of a snapshot
fn render(guide: &StepGuide, snapshot: &GuideSnapshot) -> String {
    let mut out = String::new();
    out.push_str(&format!("fraction    {:.3}\n", snapshot.fraction));
    out.push_str(&format!("coordinate  {:.3}\n", snapshot.coordinate));
    let active = snapshot
        .active_step
        .map(|i| i.to_string())
        .unwrap_or_else(|| "-".to_string());
    out.push_str(&format!("active      {}\n", active));
    out.push_str(&format!("focused     {}\n", snapshot.focused_step));

    out.push_str("\nSteps:\n");
    for (i, (step, state)) in guide.steps().iter().zip(&snapshot.steps).enumerate() {
        let params = step
            .params
            .as_ref()
            .map(|p| format!(" {}", p))
            .unwrap_or_default();
        out.push_str(&format!(
            "  {} {:<16} {:<8} -> {}{}\n",
            i, step.id, state.as_str(), step.destination, params
        ));
    }

    if !snapshot.segments.is_empty() {
        out.push_str("\nSegments:\n");
        for (i, segment) in snapshot.segments.iter().enumerate() {
            let pulse = if segment.state.pulse_visible { "  pulse" } else { "" };
            out.push_str(&format!(
                "  {}-{}  draw {:.3}{}\n",
                i,
                i + 1,
                segment.state.draw_fraction,
                pulse
            ));
        }
    }
    out
}
