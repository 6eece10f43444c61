use anyhow::{Context as AnyhowContext, Result};
use chrono::Utc;
use clap::Parser;
use flags::{ColorFlag, MtimeFlag, PositionFlag};
use kubefields_annotate::{AnnotateConfig, Placement};
use kubefields_output::{resolve_color, AlignConfig};
use std::env;
use std::io::{self, Read, Write};

mod flags;
mod pipeline;

pub use pipeline::{run, RunOptions, RunOutput};

fn print_stdout(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err).context("Failed to write to stdout");
    }
    Ok(())
}

#[derive(Parser, Debug)]
#[command(name = "kubectl-fields")]
#[command(about = "Annotate Kubernetes YAML with field ownership information")]
#[command(
    long_about = "Reads Kubernetes resource YAML from stdin, annotates each managed field with \
its owner (manager name and timestamp), and writes the annotated YAML to stdout.

Examples:
  kubectl get deploy nginx -o yaml --show-managed-fields | kubectl fields
  kubectl get deploy -o yaml --show-managed-fields | kubectl fields --above
  kubectl get deploy nginx -o yaml --show-managed-fields | kubectl fields --mtime hide --show-operation"
)]
#[command(version)]
struct Cli {
    /// Where ownership comments go
    #[arg(short, long, value_enum, default_value_t = PositionFlag::Inline)]
    position: PositionFlag,

    /// Place comments on the line above each field (same as --position above)
    #[arg(long)]
    above: bool,

    /// Timestamp display
    #[arg(long, value_enum, default_value_t = MtimeFlag::Relative)]
    mtime: MtimeFlag,

    /// Include the operation type (apply, update) in comments
    #[arg(long)]
    show_operation: bool,

    /// Color comments by manager
    #[arg(long, value_enum, default_value_t = ColorFlag::Auto)]
    color: ColorFlag,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode: log only errors (stdout is reserved for YAML)
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn placement(&self) -> Placement {
        if self.above {
            Placement::Above
        } else {
            self.position.as_domain()
        }
    }

    fn run_options(&self) -> RunOptions {
        let no_color = env::var("NO_COLOR").ok();
        let color = resolve_color(
            self.color.as_domain(),
            console::Term::stdout().features().is_attended(),
            no_color.as_deref(),
        );
        RunOptions {
            annotate: AnnotateConfig::default()
                .with_placement(self.placement())
                .with_time_mode(self.mtime.as_domain())
                .with_operation(self.show_operation),
            align: AlignConfig::default(),
            color,
            now: Utc::now(),
        }
    }
}

fn init_logger(verbose: bool, quiet: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if quiet {
        builder.filter_level(log::LevelFilter::Error);
    } else if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

pub fn main_entry() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose, cli.quiet);

    let options = cli.run_options();
    log::debug!(
        "placement={} mtime={} color={}",
        options.annotate.placement.as_str(),
        options.annotate.time_mode.as_str(),
        options.color
    );

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read stdin")?;

    let output = run(&input, &options)?;
    print_stdout(&output.text)
}
