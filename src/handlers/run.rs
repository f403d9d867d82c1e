//! Run-and-plot pipeline: execute the simulation, load its outputs, render and show.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;

use crate::{
    case::{Output, TIME_FILE},
    error::{Result, UqError},
    plot::{render_figure, Figure, PlotConfig, TIME_LABEL},
    table::{read_table, read_time_vector},
    utils::{run_command, SimCommand},
    viewer::Viewer,
};

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub command: SimCommand,
    /// Directory the simulation runs in and writes its outputs to.
    pub workdir: PathBuf,
    pub out_dir: PathBuf,
    pub shell_name: String,
    pub timeout: Option<Duration>,
    /// Abort on a non-zero exit instead of reading whatever was left behind.
    pub strict: bool,
    /// When false the outputs already in `workdir` are plotted.
    pub execute: bool,
    pub render: bool,
    pub show: bool,
    pub viewer: Option<String>,
    pub plot: PlotConfig,
}

impl RunOptions {
    pub fn new(command: SimCommand) -> Self {
        Self {
            command,
            workdir: PathBuf::from("."),
            out_dir: PathBuf::from("."),
            shell_name: "auto".into(),
            timeout: None,
            strict: false,
            execute: true,
            render: true,
            show: false,
            viewer: None,
            plot: PlotConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FigureReport {
    pub output: Output,
    pub source: PathBuf,
    /// Number of realizations drawn.
    pub series: usize,
    /// Samples per realization.
    pub steps: usize,
    pub image: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub command: String,
    pub case: u8,
    pub executed: bool,
    pub exit_code: Option<i32>,
    pub success: Option<bool>,
    pub time_steps: usize,
    pub figures: Vec<FigureReport>,
}

pub struct RunHandler;

impl RunHandler {
    pub async fn run(opts: &RunOptions) -> Result<RunReport> {
        let cmd_line = opts.command.command_line();
        let case = opts.command.case;
        let mut report = RunReport {
            command: cmd_line.clone(),
            case: case.get(),
            executed: opts.execute,
            exit_code: None,
            success: None,
            time_steps: 0,
            figures: Vec::new(),
        };

        if opts.execute {
            tracing::info!(case = case.get(), "running `{cmd_line}`");
            let exit = run_command(&cmd_line, &opts.workdir, &opts.shell_name, opts.timeout).await?;
            report.exit_code = exit.code();
            report.success = Some(exit.success());
            if !exit.success() {
                tracing::warn!(status = %exit.status, "simulation exited with failure");
                if opts.strict {
                    return Err(UqError::SimulationFailed {
                        command: cmd_line,
                        status: exit.status.to_string(),
                    });
                }
            }
        }

        let outputs = case.outputs();
        if outputs.is_empty() {
            tracing::info!(case = case.get(), "case produces no time series");
            return Ok(report);
        }

        let time = read_time_vector(&opts.workdir.join(TIME_FILE))?;
        report.time_steps = time.len();
        tracing::debug!(steps = time.len(), "loaded time vector");

        if opts.render {
            fs::create_dir_all(&opts.out_dir).map_err(|e| UqError::io(&opts.out_dir, e))?;
        }
        let mut viewer = (opts.render && opts.show).then(|| Viewer::new(opts.viewer.as_deref()));

        for output in outputs {
            let source = opts.workdir.join(output.file_name());
            let series = read_table(&source)?.series_against(output.file_name(), time.len())?;

            let image = if opts.render {
                let path = opts
                    .out_dir
                    .join(format!("{}.{}", output.file_name(), opts.plot.format.extension()));
                let figure = Figure {
                    ylabel: output.ylabel(),
                    xlabel: TIME_LABEL,
                    series: &series,
                };
                render_figure(&figure, &time, &path, &opts.plot)?;
                if let Some(v) = viewer.as_mut() {
                    v.open(&path)?;
                }
                Some(path)
            } else {
                None
            };

            report.figures.push(FigureReport {
                output,
                source,
                series: series.len(),
                steps: time.len(),
                image,
            });
        }

        if let Some(v) = viewer.as_mut() {
            tracing::info!(viewers = v.pending(), "waiting for viewers to close");
            v.wait().await?;
        }

        Ok(report)
    }
}
