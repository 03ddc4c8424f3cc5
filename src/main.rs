use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rand::Rng;
use randomized_bst::core::{run_trial, KeyOrder, ScalingConfig, ScalingReport};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "randomized-bst",
    about = "Measure height and work of a randomized BST as keys are inserted"
)]
struct Cli {
    /// Keys inserted per trial.
    #[arg(short = 'n', long, default_value_t = ScalingConfig::DEFAULT_ELEMENTS)]
    elements: usize,
    /// Order in which keys are inserted.
    #[arg(long, value_enum, default_value_t = Order::Random)]
    order: Order,
    /// Number of independent trials.
    #[arg(long, default_value_t = 1)]
    trials: u32,
    /// Base seed (default: random).
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Order {
    Random,
    Sorted,
    Reversed,
}

impl From<Order> for KeyOrder {
    fn from(order: Order) -> Self {
        match order {
            Order::Random => Self::Random,
            Order::Sorted => Self::Sorted,
            Order::Reversed => Self::Reversed,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ScalingConfig::standard()
        .with_elements(cli.elements)
        .with_order(cli.order.into())
        .with_trials(cli.trials)
        .with_seed(cli.seed.unwrap_or_else(|| rand::thread_rng().gen()));

    tracing::info!(
        "Inserting {} {} keys per trial, {} trial(s), seed {}",
        config.elements,
        config.order.name(),
        config.trials,
        config.seed
    );

    let mut trials = Vec::with_capacity(config.trials as usize);
    for trial in 0..config.trials {
        let report = run_trial(&config, trial)
            .with_context(|| format!("trial {trial} failed"))?;
        println!(
            "trial {}\theight={}\trebuilds={}\tnodes_visited={}",
            report.trial,
            report.height,
            report.rebuilds,
            report.nodes_visited()
        );
        trials.push(report);
    }

    print_summary(&ScalingReport { config, trials });
    Ok(())
}

fn print_summary(report: &ScalingReport) {
    println!(
        "mean_height={:.2}\tmax_height={}\tbound={:.2}\tmean_nodes_visited={:.0}\twork_per_key={:.2}",
        report.mean_height(),
        report.max_height(),
        report.height_bound(),
        report.mean_nodes_visited(),
        report.work_per_key()
    );
    if !report.within_bound() {
        tracing::warn!("mean height exceeds the 3·log2(n) reference bound");
    }
}
