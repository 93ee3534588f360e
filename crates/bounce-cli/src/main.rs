// crates/bounce-cli/src/main.rs
//
// Console front end: prompt for the three parameters (with retry until each
// constraint holds), run the estimator and simulator, save the
// height-vs-time plot, and print the report sentence.
//
// An optional first argument is a path to additionally dump the run as JSON
// (the series plus the two plot annotations) for an external plotting tool.

use std::env;
use std::fs;
use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use plotters::prelude::*;
use serde::Serialize;

use bounce_core::{estimate_bounces, SimulationParams};
use bounce_sim::{simulate, SimOptions, Simulation};

const PLOT_PATH: &str = "bounce.png";

fn main() -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let initial_height = read_positive(&mut lines, "Please enter the initial height: ")?;

    let minimum_height = loop {
        let v = read_positive(&mut lines, "Please enter the minimum height: ")?;
        if v <= initial_height {
            break v;
        }
        println!("The minimum height cannot be greater than the initial.");
    };

    let efficiency = loop {
        let v = read_positive(&mut lines, "Please enter the value of efficiency: ")?;
        if v < 1.0 {
            break v;
        }
        println!("Please enter a value between 0 and 1.");
    };

    let params = SimulationParams {
        initial_height,
        minimum_height,
        efficiency,
    };
    params.validate()?;

    let estimate = estimate_bounces(params);
    let sim = simulate(params, estimate.floored, SimOptions::default());

    render_plot(&params, &sim, PLOT_PATH)
        .with_context(|| format!("failed to render {PLOT_PATH}"))?;
    println!("Plot saved to {PLOT_PATH}");

    if let Some(path) = env::args().nth(1) {
        export_json(&params, &sim, &path)
            .with_context(|| format!("failed to write {path}"))?;
        println!("Series written to {path}");
    }

    println!(
        "The number of bounces required is {}, and this takes {:.2} seconds to achieve.",
        sim.target_bounces, sim.target_time
    );

    Ok(())
}

/// Prompt until the user enters a strictly positive number.
fn read_positive<B: BufRead>(
    lines: &mut io::Lines<B>,
    prompt: &str,
) -> Result<f64> {
    print!("{prompt}");
    loop {
        io::stdout().flush()?;
        let line = lines
            .next()
            .context("stdin closed while waiting for input")??;

        match line.trim().parse::<f64>() {
            Ok(v) if v > 0.0 => return Ok(v),
            Ok(_) => print!("Please enter a positive value: "),
            Err(_) => print!("Please enter a numerical value: "),
        }
    }
}

/// Height-vs-time line plot with a horizontal reference line at the minimum
/// height and a vertical one at the target-bounce time.
fn render_plot(params: &SimulationParams, sim: &Simulation, path: &str) -> Result<()> {
    let t_end = sim.series.times.last().copied().unwrap_or(1.0);
    let y_max = params.initial_height * 1.05;
    let y_min = sim.series.heights.iter().copied().fold(0.0, f64::min);

    let root = BitMapBackend::new(path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Height vs Time", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(0.0..t_end, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Time(s)")
        .y_desc("Height(m)")
        .draw()?;

    let trace = sim
        .series
        .times
        .iter()
        .zip(&sim.series.heights)
        .map(|(&t, &h)| (t, h));
    chart.draw_series(LineSeries::new(trace, &BLUE))?;

    // Reference lines: threshold height and target-bounce time.
    chart.draw_series(LineSeries::new(
        [(0.0, params.minimum_height), (t_end, params.minimum_height)],
        &RED,
    ))?;
    chart.draw_series(LineSeries::new(
        [(sim.target_time, y_min), (sim.target_time, y_max)],
        &RED,
    ))?;

    root.present()?;
    Ok(())
}

/// The stable plotting payload: the two parallel sequences plus the two
/// scalar annotations.
#[derive(Serialize)]
struct PlotExport<'a> {
    times: &'a [f64],
    heights: &'a [f64],
    minimum_height: f64,
    target_time: f64,
}

fn export_json(params: &SimulationParams, sim: &Simulation, path: &str) -> Result<()> {
    let export = PlotExport {
        times: &sim.series.times,
        heights: &sim.series.heights,
        minimum_height: params.minimum_height,
        target_time: sim.target_time,
    };
    fs::write(path, serde_json::to_string_pretty(&export)?)?;
    Ok(())
}
