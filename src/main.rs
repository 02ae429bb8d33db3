mod entity;
mod graph;
mod orchestrator;
mod point;
mod report;
mod selector;

use anyhow::Context;
use clap::{Parser, Subcommand};
use entity::Entity;
use graph::{CallChainGraph, GraphFormat};
use orchestrator::{OverflowPolicy, increment_and_select};
use point::Point;
use report::{EntityReport, OutputFormat, RunReport, SelectReport, render};
use selector::{Larger, select_larger};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt};

/// 引数なしで実行したときの入力値
const DEFAULT_INPUT: i32 = 5;

#[derive(Parser)]
#[command(name = "select_demo")]
#[command(about = "Increment-and-select demo")]
#[command(version = "0.1.0")]
struct Cli {
    /// Enable debug logging (stderr)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Increment a value and select the larger of the two (default)
    Run {
        #[arg(default_value_t = DEFAULT_INPUT, allow_negative_numbers = true)]
        value: i32,

        /// Overflow behavior on increment
        #[arg(long, value_enum, default_value_t = OverflowPolicy::Checked)]
        overflow: OverflowPolicy,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Select the larger of two integers (ties return B)
    Select {
        #[arg(allow_negative_numbers = true)]
        a: i32,

        #[arg(allow_negative_numbers = true)]
        b: i32,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Create two entities and assign a value to each
    Entity {
        /// Value to assign
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        value: i32,

        /// Accept only positive values (others reset the attribute to 0)
        #[arg(long)]
        checked: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Add two points
    Point {
        #[arg(default_value_t = 2, allow_negative_numbers = true)]
        x1: i32,
        #[arg(default_value_t = 3, allow_negative_numbers = true)]
        y1: i32,
        #[arg(default_value_t = 4, allow_negative_numbers = true)]
        x2: i32,
        #[arg(default_value_t = 5, allow_negative_numbers = true)]
        y2: i32,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Render the call chain of one evaluation
    Graph {
        #[arg(default_value_t = DEFAULT_INPUT, allow_negative_numbers = true)]
        value: i32,

        /// Output format
        #[arg(short = 'o', long, value_enum, default_value_t = GraphFormat::Tree)]
        format: GraphFormat,

        /// Maximum depth for the tree format
        #[arg(short, long, default_value_t = 10)]
        depth: usize,

        /// Overflow behavior on increment
        #[arg(long, value_enum, default_value_t = OverflowPolicy::Checked)]
        overflow: OverflowPolicy,
    },
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    // ログの初期化（stdoutは結果専用）
    let default_filter = if cli.verbose {
        "select_demo=debug,info"
    } else {
        "select_demo=info,warn"
    };
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let command = cli.command.unwrap_or(Commands::Run {
        value: DEFAULT_INPUT,
        overflow: OverflowPolicy::Checked,
        format: OutputFormat::Text,
    });

    match command {
        Commands::Run { value, overflow, format } => println!("{}", run(value, overflow, format)?),
        Commands::Select { a, b, format } => println!("{}", run_select(a, b, format)?),
        Commands::Entity { value, checked, format } => {
            println!("{}", run_entity(value, checked, format)?)
        }
        Commands::Point { x1, y1, x2, y2, format } => {
            println!("{}", run_point(Point::new(x1, y1), Point::new(x2, y2), format)?)
        }
        Commands::Graph { value, format, depth, overflow } => {
            let eval = increment_and_select(value, &Larger, overflow)
                .with_context(|| format!("Failed to evaluate call chain for {value}"))?;
            let graph = CallChainGraph::from_evaluation(&eval);
            debug!("{}", graph.get_stats().to_string().trim_end());
            print!("{}", graph.render(format, depth));
        }
    }

    Ok(())
}

fn run(value: i32, overflow: OverflowPolicy, format: OutputFormat) -> Result<String, anyhow::Error> {
    info!("Running increment_and_select on {} ({:?})", value, overflow);

    let eval = increment_and_select(value, &Larger, overflow)
        .with_context(|| format!("Failed to increment and select {value}"))?;
    let report = RunReport::from(eval);

    Ok(render(format, report.result, &report)?)
}

fn run_select(a: i32, b: i32, format: OutputFormat) -> Result<String, anyhow::Error> {
    let result = select_larger(a, b);
    debug!("select_larger({}, {}) = {}", a, b, result);

    Ok(render(format, result, &SelectReport { a, b, result })?)
}

fn run_point(p1: Point, p2: Point, format: OutputFormat) -> Result<String, anyhow::Error> {
    let sum = p1 + p2;
    debug!("{} + {} = {}", p1, p2, sum);

    Ok(render(format, sum, &sum)?)
}

fn run_entity(value: i32, checked: bool, format: OutputFormat) -> Result<String, anyhow::Error> {
    let mut entities = [Entity::new(), Entity::new()];

    let mut accepted = None;
    for entity in entities.iter_mut() {
        if checked {
            accepted = Some(entity.set_positive(value));
        } else {
            entity.set(value);
        }
    }

    let report = EntityReport {
        value: entities[0].value(),
        instances: entities.len(),
        accepted,
    };

    let line = match (format, accepted) {
        (OutputFormat::Text, Some(ok)) => render(format, ok, &report)?,
        _ => render(format, report.value, &report)?,
    };

    Ok(line)
}
