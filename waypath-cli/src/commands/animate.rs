//! `waypath animate` - find a path and play back its reveal.
//!
//! Frames are sampled on a fixed tick. In real time the tick is a tokio
//! interval on the wall clock; with `--instant` a manual clock is stepped by
//! exactly one frame period per tick, so output is deterministic.

use super::exit_with_notice;
use super::path::PathReport;
use crate::output::{format_weight, JsonOutput, OutputFormat};
use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::time::Duration;
use waypath_core::{
    AnimationPhase, AnimationState, Clock, Graph, ManualClock, MonotonicClock, Point, Session,
    SessionSettings,
};

#[derive(Debug, Clone, Copy)]
pub struct AnimateOptions {
    pub duration_ms: u64,
    pub fps: u32,
    pub instant: bool,
}

impl AnimateOptions {
    fn frame_period_ms(&self) -> f64 {
        1000.0 / f64::from(self.fps.max(1))
    }
}

/// One sampled frame as emitted on stdout.
#[derive(Debug, Serialize)]
pub struct Frame {
    pub elapsed_ms: f64,
    pub progress: f64,
    pub phase: AnimationPhase,
    pub revealed: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment: Option<(String, String)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point: Option<Point>,
}

impl Frame {
    fn new(state: AnimationState, elapsed_ms: f64, graph: &Graph) -> Self {
        let point = state.point(graph);
        Self {
            elapsed_ms,
            progress: state.progress,
            phase: state.phase,
            segment: state.segment.map(|s| (s.from, s.to)),
            revealed: state.revealed,
            point,
        }
    }

    fn to_line(&self) -> String {
        let percent = format!("{:>3.0}%", self.progress * 100.0);
        let trail = self.revealed.join(" -> ");
        let marker = match (&self.segment, self.point) {
            (Some((from, to)), Some(p)) => {
                format!("  {} {}..{} at ({:.0}, {:.0})", "@".dimmed(), from, to, p.x, p.y)
            }
            _ => String::new(),
        };
        match self.phase {
            AnimationPhase::Running => format!("[{}] {}{}", percent, trail, marker),
            AnimationPhase::Completed => format!("[{}] {} {}", percent, trail, "done".green()),
        }
    }
}

/// Writes frames in the chosen format.
///
/// Tables print a line whenever the revealed prefix grows or the animation
/// completes; JSON prints every sampled frame as one JSON Lines record.
struct FramePrinter {
    format: OutputFormat,
    last_revealed: usize,
}

impl FramePrinter {
    fn new(format: OutputFormat) -> Self {
        Self {
            format,
            last_revealed: 0,
        }
    }

    fn print(&mut self, frame: &Frame) {
        match self.format {
            OutputFormat::Json => println!("{}", JsonOutput::format_line(frame)),
            OutputFormat::Table => {
                let complete = frame.phase == AnimationPhase::Completed;
                if frame.revealed.len() > self.last_revealed || complete {
                    println!("{}", frame.to_line());
                }
            }
        }
        self.last_revealed = frame.revealed.len();
    }
}

/// Sample one frame; `Some(true)` once the animation has completed.
fn step<C: Clock>(
    session: &mut Session<C>,
    started_ms: f64,
    printer: &mut FramePrinter,
) -> Option<bool> {
    let state = session.frame()?;
    let elapsed = session.clock().now_ms() - started_ms;
    let frame = Frame::new(state, elapsed, session.graph());
    printer.print(&frame);
    Some(frame.phase == AnimationPhase::Completed)
}

/// Select both endpoints and start the animation, or exit with a notice.
fn start<C: Clock>(session: &mut Session<C>, from: &str, to: &str, format: OutputFormat) -> f64 {
    let started = session
        .select_origin(from)
        .and_then(|_| session.select_destination(to))
        .and_then(|_| session.find_path());
    match started {
        Ok(result) => {
            if format == OutputFormat::Table {
                let report = PathReport::new(result, session.graph());
                println!(
                    "{} {} ({}, {}ms)",
                    "Animating".bold(),
                    report.names.join(" -> ").cyan(),
                    format_weight(report.distance),
                    session.settings().animation_duration_ms
                );
            }
            session.clock().now_ms()
        }
        Err(e) => exit_with_notice(&e, format),
    }
}

pub async fn run(
    graph: Graph,
    from: &str,
    to: &str,
    settings: SessionSettings,
    options: AnimateOptions,
    format: OutputFormat,
) -> Result<()> {
    let settings = SessionSettings {
        animation_duration_ms: options.duration_ms,
        ..settings
    };
    let mut printer = FramePrinter::new(format);

    if options.instant {
        let mut session = Session::new(graph, ManualClock::new(0.0)).with_settings(settings);
        let started = start(&mut session, from, to, format);
        while let Some(false) = step(&mut session, started, &mut printer) {
            session.clock().advance(options.frame_period_ms());
        }
    } else {
        let mut session = Session::new(graph, MonotonicClock::new()).with_settings(settings);
        let started = start(&mut session, from, to, format);
        let mut ticker =
            tokio::time::interval(Duration::from_secs_f64(options.frame_period_ms() / 1000.0));
        loop {
            ticker.tick().await;
            if step(&mut session, started, &mut printer) != Some(false) {
                break;
            }
        }
    }

    tracing::debug!("Animation finished");
    Ok(())
}
