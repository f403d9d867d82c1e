mod cli;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, EnvFilter};
use uqplot::{
    case::CaseNumber,
    config::Config,
    handlers::{
        cases::CasesHandler,
        run::{RunHandler, RunOptions, RunReport},
    },
    plot::{ImageFormat, PlotConfig},
    printer::TextPrinter,
    utils::SimCommand,
};

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();
    init_logging(args.verbose);

    let cfg = Config::load();
    tracing::debug!(config = %cfg.config_path.display(), "configuration loaded");
    let printer = TextPrinter::default();

    if args.list_cases {
        CasesHandler::run(&printer);
        return Ok(());
    }

    // Resolve case: CLI overrides config; fall back to 7
    let case_value = args
        .case
        .or_else(|| cfg.get_i64("UQPLOT_CASE"))
        .unwrap_or(7);
    let case = CaseNumber::new(case_value)?;

    let program = args.bin.clone().unwrap_or_else(|| cfg.simulator());
    let command = SimCommand::new(
        program,
        case,
        args.aleatory.clone(),
        args.epistemic.clone(),
        args.design.clone(),
    );

    if args.dry_run {
        println!("{}", command.command_line());
        return Ok(());
    }

    let format: ImageFormat = match args.format.as_deref() {
        Some(f) => f.parse()?,
        None => cfg.image_format().context("invalid UQPLOT_FORMAT")?,
    };
    let defaults = PlotConfig::default();
    let plot = PlotConfig {
        width: args.width.or_else(|| cfg.get_u32("UQPLOT_WIDTH")).unwrap_or(defaults.width),
        height: args.height.or_else(|| cfg.get_u32("UQPLOT_HEIGHT")).unwrap_or(defaults.height),
        format,
        ..defaults
    };

    // Effective boolean switches with config defaults
    let show = if args.no_show {
        false
    } else if args.show {
        true
    } else {
        cfg.get_bool("UQPLOT_SHOW")
    };
    let strict = args.strict || cfg.get_bool("UQPLOT_STRICT");

    let workdir = args.workdir.clone().unwrap_or_else(|| cfg.workdir());
    let out_dir = args
        .out_dir
        .clone()
        .or_else(|| cfg.get_path("UQPLOT_OUT_DIR"))
        .unwrap_or_else(|| workdir.clone());

    let opts = RunOptions {
        workdir,
        out_dir,
        shell_name: cfg.get("SHELL_NAME").unwrap_or_else(|| "auto".into()),
        timeout: cfg.sim_timeout(),
        strict,
        execute: !args.skip_run,
        render: !args.no_plot,
        show,
        viewer: cfg.get("UQPLOT_VIEWER"),
        plot,
        ..RunOptions::new(command)
    };

    let report = RunHandler::run(&opts)
        .await
        .with_context(|| format!("run-and-plot failed for case {}", case))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&printer, &report);
    }
    Ok(())
}

fn print_report(printer: &TextPrinter, report: &RunReport) {
    printer.heading(&report.command);
    match (report.executed, report.success) {
        (false, _) => printer.warn("skipped", "simulation not run; plotted existing outputs"),
        (true, Some(true)) => printer.ok("exit", "success"),
        (true, _) => {
            let code = report
                .exit_code
                .map(|c| c.to_string())
                .unwrap_or_else(|| "signal".into());
            printer.warn("exit", &format!("failure ({code})"));
        }
    }
    if report.figures.is_empty() {
        printer.line("no time-series outputs for this case");
        return;
    }
    printer.line(&format!("time steps: {}", report.time_steps));
    for fig in &report.figures {
        let target = fig
            .image
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(not rendered)".into());
        printer.ok(
            "plotted",
            &format!(
                "{} -> {} ({} series x {} steps)",
                fig.source.display(),
                target,
                fig.series,
                fig.steps
            ),
        );
    }
}
