mod error;
mod report;

use clap::{Parser, Subcommand};
use error::{AppError, AppResult};
use pl_chart::{ChartSeries, LineChart, colors};
use pl_design::{Design, SweepProgress, run_sweep};
use pl_hydraulics::Trace;
use pl_project::{ChartDef, PipelineProject};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "pl-cli")]
#[command(about = "Pipeline designer - least-cost pipe diameter, burial and pump layout", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sweep the diameter and burial grid for the cheapest design
    Optimize {
        /// Project YAML file (built-in defaults when omitted)
        #[arg(short, long)]
        project: Option<PathBuf>,
        /// Chart output path
        #[arg(long)]
        chart: Option<PathBuf>,
        /// Do not write a chart
        #[arg(long)]
        no_chart: bool,
        /// Also plot the hydraulic grade line
        #[arg(long)]
        hgl: bool,
        /// Print the final design as JSON
        #[arg(long)]
        json: bool,
    },
    /// Evaluate a single design point
    Evaluate {
        /// Nominal pipe diameter in meters
        #[arg(long)]
        diameter: f64,
        /// Burial fraction in [0, 1]
        #[arg(long)]
        burial: f64,
        /// Project YAML file (built-in defaults when omitted)
        #[arg(short, long)]
        project: Option<PathBuf>,
        /// Chart output path
        #[arg(long)]
        chart: Option<PathBuf>,
        /// Also plot the hydraulic grade line
        #[arg(long)]
        hgl: bool,
    },
    /// Print the default project YAML
    Defaults,
    /// Validate project file syntax and values
    Validate {
        /// Path to the project YAML file
        project_path: PathBuf,
    },
}

/// Where and how the grade-line chart is drawn.
struct ChartTarget {
    path: PathBuf,
    chart: LineChart,
    include_hgl: bool,
}

impl ChartTarget {
    fn new(def: &ChartDef, path: Option<PathBuf>, hgl: bool) -> Self {
        Self {
            path: path.unwrap_or_else(|| PathBuf::from(&def.output_path)),
            chart: LineChart {
                width: def.width,
                height: def.height,
                x_grid_step: def.x_grid_step_m,
            },
            include_hgl: hgl || def.include_hgl,
        }
    }

    fn draw(&self, trace: &Trace) -> AppResult<()> {
        let x = trace.distances_m();
        let egl = trace.egl_m();
        let hgl = trace.hgl_m();
        let mut series = vec![ChartSeries {
            label: "EGL",
            values: &egl,
            color: colors::BLUE,
        }];
        if self.include_hgl {
            series.push(ChartSeries {
                label: "HGL",
                values: &hgl,
                color: colors::GREEN,
            });
        }
        self.chart.save(&self.path, &x, &series)?;
        Ok(())
    }

    /// Chart failures never stop the sweep.
    fn refresh(&self, trace: &Trace) {
        if let Err(e) = self.draw(trace) {
            warn!(path = %self.path.display(), error = %e, "chart refresh failed");
        }
    }
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Optimize {
            project,
            chart,
            no_chart,
            hgl,
            json,
        } => cmd_optimize(project.as_deref(), chart, no_chart, hgl, json),
        Commands::Evaluate {
            diameter,
            burial,
            project,
            chart,
            hgl,
        } => cmd_evaluate(project.as_deref(), diameter, burial, chart, hgl),
        Commands::Defaults => cmd_defaults(),
        Commands::Validate { project_path } => cmd_validate(&project_path),
    }
}

fn load_project(path: Option<&Path>) -> AppResult<PipelineProject> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "loading project");
            Ok(pl_project::load_yaml(path)?)
        }
        None => Ok(PipelineProject::default()),
    }
}

fn cmd_optimize(
    project_path: Option<&Path>,
    chart: Option<PathBuf>,
    no_chart: bool,
    hgl: bool,
    json: bool,
) -> AppResult<()> {
    let project = load_project(project_path)?;
    let problem = project.problem();
    let grid = project.grid();
    let target = (!no_chart).then(|| ChartTarget::new(&project.chart, chart, hgl));

    if !json {
        println!("Optimizing: {}", project.name);
        println!("  diameters       {}", grid.diameters);
        println!("  burial fraction {}", grid.burial_fractions);
        println!();
    }

    let mut last_emit = Instant::now();
    let mut on_progress = |event: SweepProgress<'_>| match event {
        SweepProgress::Started { .. } => {}
        SweepProgress::Improved { design, .. } => {
            if !json {
                report::clear_progress_line();
                report::print_design("CURRENT OPTIMAL SOLUTION", design);
            }
            if let Some(target) = &target {
                target.refresh(&design.trace);
            }
        }
        SweepProgress::DiameterFinished {
            index,
            diameters,
            nominal_diameter_m,
            best_cost,
        } => {
            let last = index + 1 == diameters;
            if !json && (last || last_emit.elapsed().as_millis() >= 100) {
                report::render_progress(index, diameters, nominal_diameter_m, best_cost);
                last_emit = Instant::now();
            }
        }
    };
    let outcome = run_sweep(&problem, &grid, Some(&mut on_progress))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome.best.summary())?);
    } else {
        report::clear_progress_line();
        report::print_final(&outcome);
        if let Some(target) = &target {
            println!("Chart written to {}", target.path.display());
        }
    }
    Ok(())
}

fn cmd_evaluate(
    project_path: Option<&Path>,
    diameter: f64,
    burial: f64,
    chart: Option<PathBuf>,
    hgl: bool,
) -> AppResult<()> {
    if !(diameter.is_finite() && diameter > 0.0) {
        return Err(AppError::InvalidArg(format!(
            "diameter must be positive, got {diameter}"
        )));
    }
    if !(0.0..=1.0).contains(&burial) {
        return Err(AppError::InvalidArg(format!(
            "burial fraction must be within [0, 1], got {burial}"
        )));
    }

    let project = load_project(project_path)?;
    let problem = project.problem();
    let design: Design = problem.evaluate_point(diameter, burial)?;

    report::print_design("DESIGN", &design);
    println!(
        "Minimum pressure   : {:.3} kPa",
        design.trace.min_pressure_kpa()
    );
    println!(
        "Maximum head       : {:.3} m",
        design.trace.max_pressure_head_m()
    );

    let target = ChartTarget::new(&project.chart, chart, hgl);
    target.draw(&design.trace)?;
    println!("Chart written to {}", target.path.display());
    Ok(())
}

fn cmd_defaults() -> AppResult<()> {
    let yaml = pl_project::to_yaml_string(&PipelineProject::default())?;
    print!("{yaml}");
    Ok(())
}

fn cmd_validate(project_path: &Path) -> AppResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = pl_project::load_yaml(project_path)?;
    println!("✓ Project '{}' is valid", project.name);
    println!(
        "  {} diameters x {} burial fractions",
        project.grid().diameters.len(),
        project.grid().burial_fractions.len()
    );
    Ok(())
}
