use std::path::PathBuf;

use clap::{ArgAction, ArgGroup, Parser};

#[derive(Parser, Debug, Clone)]
#[command(name = "uqplot", about = "Run the uqsim UQ challenge executable and plot its outputs", version)]
#[command(group(ArgGroup::new("show_switch").args(["show", "no_show"]).multiple(false)))]
#[command(group(ArgGroup::new("run_mode").args(["dry_run", "skip_run"]).multiple(false)))]
pub struct Cli {
    /// Case selector passed to the simulation (1..=7); 7 computes y, z and g.
    #[arg(short = 'c', long)]
    pub case: Option<i64>,

    /// Aleatory uncertainty descriptor file.
    #[arg(long, default_value = "aleatory.dat")]
    pub aleatory: PathBuf,

    /// Epistemic uncertainty descriptor file.
    #[arg(long, default_value = "epistemic.dat")]
    pub epistemic: PathBuf,

    /// Design parameter file.
    #[arg(long, default_value = "design.dat")]
    pub design: PathBuf,

    /// Simulation executable (defaults to UQSIM_BIN or `uqsim`).
    #[arg(long = "bin")]
    pub bin: Option<String>,

    /// Directory the simulation runs in and writes tout/yout/z1out/z2out to.
    #[arg(short = 'w', long)]
    pub workdir: Option<PathBuf>,

    /// Where rendered figures are written (defaults to the working directory).
    #[arg(short = 'o', long = "out-dir")]
    pub out_dir: Option<PathBuf>,

    /// Image format for figures (png|svg).
    #[arg(long)]
    pub format: Option<String>,

    /// Figure width in pixels.
    #[arg(long)]
    pub width: Option<u32>,

    /// Figure height in pixels.
    #[arg(long)]
    pub height: Option<u32>,

    /// Open each figure in an image viewer and wait for all viewers to close.
    #[arg(long)]
    pub show: bool,
    /// Only write the figures.
    #[arg(long = "no-show")]
    pub no_show: bool,

    /// Abort when the simulation exits with a failure status.
    #[arg(long)]
    pub strict: bool,

    /// Print the simulation command without running anything.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Do not run the simulation; plot the outputs already in the working directory.
    #[arg(long = "skip-run")]
    pub skip_run: bool,

    /// Run and load outputs but render no figures.
    #[arg(long = "no-plot")]
    pub no_plot: bool,

    /// Print the run report as JSON.
    #[arg(long)]
    pub json: bool,

    /// List case selectors and the files each produces.
    #[arg(short = 'l', long = "list-cases")]
    pub list_cases: bool,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
