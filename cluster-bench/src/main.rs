//! Benchmarking CLI for the correlation clustering engine.

mod generator;
mod report;
mod strategy_choice;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use cluster_core::{
    count_mistakes, formulate, interpret, local_search, singleton_assignment, Clustering,
    IntegralSolver, RelaxationSolver, RoundingSettings, SearchOutcome, SearchSettings,
    SignedGraph,
};

use generator::planted_partition;
use report::{BenchReport, GraphSummary, LpReport, RunResult};
use strategy_choice::StrategyChoice;

/// CLI arguments for the benchmark.
#[derive(Parser, Debug)]
#[command(name = "cluster-bench")]
#[command(about = "Run correlation clustering heuristics on planted-partition signed graphs")]
struct Args {
    /// Number of vertices
    #[arg(long, default_value_t = 30)]
    vertices: u32,

    /// Number of planted groups
    #[arg(long, default_value_t = 3)]
    clusters: u32,

    /// Probability that a vertex pair carries an edge
    #[arg(long, default_value_t = 0.5)]
    density: f64,

    /// Probability that an edge sign is flipped
    #[arg(long, default_value_t = 0.1)]
    noise: f64,

    /// Generator seed
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// Local search strategy
    #[arg(long, value_enum, default_value_t = StrategyChoice::All)]
    strategy: StrategyChoice,

    /// Round ceiling (default: vertices squared)
    #[arg(long)]
    max_rounds: Option<usize>,

    /// Skip the LP relaxation
    #[arg(long)]
    skip_lp: bool,

    /// Write the report as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Log search progress
    #[arg(short, long)]
    verbose: bool,
}

fn run_search(
    graph: &SignedGraph<u32>,
    settings: &SearchSettings,
) -> Result<(SearchOutcome<u32>, RunResult)> {
    let outcome = local_search(graph, settings)
        .with_context(|| format!("{:?} search failed", settings.strategy))?;

    let result = RunResult {
        strategy: format!("{:?}", settings.strategy),
        status: format!("{:?}", outcome.status),
        mistakes: outcome.clustering.mistakes(),
        clusters: outcome.clustering.cluster_count(),
        rounds: outcome.stats.rounds,
        candidates_evaluated: outcome.stats.candidates_evaluated,
        moves_accepted: outcome.stats.moves_accepted,
        solve_time_ms: outcome.stats.elapsed_ms,
    };

    println!("\n{}", "=".repeat(60));
    println!("{}", result.strategy);
    println!("{}", "=".repeat(60));
    println!("Status:           {}", result.status);
    println!("Mistakes:         {}", result.mistakes);
    println!("Clusters:         {}", result.clusters);
    println!("Rounds:           {}", result.rounds);
    println!("Candidates:       {}", result.candidates_evaluated);
    println!("Accepted merges:  {}", result.moves_accepted);
    println!("Solve time:       {} ms", result.solve_time_ms);

    Ok((outcome, result))
}

fn run_relaxation(graph: &SignedGraph<u32>, best: &Clustering<u32>) -> Result<LpReport> {
    let start = Instant::now();
    let lp = formulate(graph).context("LP formulation failed")?;
    let formulate_time_ms = start.elapsed().as_secs_f64() * 1000.0;

    let solution = IntegralSolver::new(best).solve(&lp)?;
    let z = lp.values_from(&solution)?;
    let rounded = interpret(graph, &solution, &RoundingSettings::default())
        .context("Rounding the integral point failed")?;

    let report = LpReport {
        variables: lp.num_vars(),
        constraints: lp.num_constraints(),
        nonzeros: lp.constraints().nnz(),
        formulate_time_ms,
        integral_disagreement: lp.disagreement_value(&z)?,
        max_violation: lp.max_violation(&z)?,
        rounded_mistakes: rounded.mistakes(),
        rounded_clusters: rounded.cluster_count(),
    };

    println!("\n{}", "=".repeat(60));
    println!("LP relaxation");
    println!("{}", "=".repeat(60));
    println!("Variables:        {}", report.variables);
    println!("Constraints:      {}", report.constraints);
    println!("Nonzeros:         {}", report.nonzeros);
    println!("Formulate time:   {:.3} ms", report.formulate_time_ms);
    println!("Integral value:   {:.1}", report.integral_disagreement);
    println!("Max violation:    {:.2e}", report.max_violation);
    println!(
        "Rounded:          {} mistakes, {} clusters",
        report.rounded_mistakes, report.rounded_clusters
    );

    Ok(report)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    if args.clusters == 0 {
        bail!("--clusters must be at least 1");
    }
    if !(0.0..=1.0).contains(&args.density) || !(0.0..=1.0).contains(&args.noise) {
        bail!("--density and --noise must lie in [0, 1]");
    }

    println!("Correlation Clustering Benchmarks");
    println!("=================================\n");

    let instance = planted_partition(
        args.vertices,
        args.clusters,
        args.density,
        args.noise,
        args.seed,
    )?;
    let graph = &instance.graph;
    let stats = graph.stats();

    let summary = GraphSummary {
        vertices: stats.vertex_count,
        positive_edges: stats.positive_edge_count,
        negative_edges: stats.negative_edge_count,
        seed: args.seed,
        planted_mistakes: count_mistakes(graph, &instance.planted)?,
        singleton_mistakes: count_mistakes(graph, &singleton_assignment(graph))?,
    };

    println!("Vertices:         {}", summary.vertices);
    println!("Positive edges:   {}", summary.positive_edges);
    println!("Negative edges:   {}", summary.negative_edges);
    println!("Planted mistakes: {}", summary.planted_mistakes);
    println!("Singleton:        {}", summary.singleton_mistakes);

    let mut runs = Vec::new();
    let mut best: Option<Clustering<u32>> = None;

    for strategy in args.strategy.strategies() {
        let mut settings = SearchSettings {
            strategy,
            max_rounds: args.max_rounds,
            ..Default::default()
        };
        if args.verbose {
            settings.verbose = true;
            settings.log_freq = 1;
        }

        let (outcome, result) = run_search(graph, &settings)?;
        runs.push(result);

        let improves = best
            .as_ref()
            .map_or(true, |b| outcome.clustering.mistakes() < b.mistakes());
        if improves {
            best = Some(outcome.clustering);
        }
    }

    let lp = match (&best, args.skip_lp) {
        (Some(best), false) => Some(run_relaxation(graph, best)?),
        _ => None,
    };

    if let Some(best) = &best {
        log::info!("Best clustering: {} mistakes", best.mistakes());
        if args.verbose {
            print!("\n{}", best);
        }
    }

    let report = BenchReport {
        graph: summary,
        runs,
        lp,
    };

    if let Some(path) = &args.json {
        report.save_json(path)?;
        println!("\nReport written to {}", path.display());
    }

    println!("\n{}", "=".repeat(60));
    println!("Benchmarks complete");
    println!("{}", "=".repeat(60));

    Ok(())
}
