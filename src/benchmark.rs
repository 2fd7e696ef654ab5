use clap::{Parser, ValueEnum};
use ordered_tree::{OrderedTree, TreeConfig, TreeOps, TreeResult, is_sorted_strictly};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use std::io;
use std::process;
use std::time::Instant;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, fmt};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KeyOrder {
    Shuffled,
    Ascending,
}

#[derive(Parser)]
#[command(name = "tree-benchmark")]
#[command(about = "A binary search tree performance testing tool")]
struct Args {
    #[arg(long, default_value = "10000")]
    size: usize,

    #[arg(long, value_enum, default_value = "shuffled")]
    order: KeyOrder,

    #[arg(long, default_value = "42")]
    seed: u64,

    /// Flatten/rebuild bound, defaults to the tree size
    #[arg(long)]
    capacity: Option<usize>,

    /// Print the tree in order and sideways after building it
    #[arg(long)]
    show: bool,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();
    setup_logging(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> TreeResult<()> {
    let config = TreeConfig::new(args.capacity.unwrap_or(args.size))?;
    let mut tree = OrderedTree::with_config(config);

    let mut keys: Vec<u64> = (0..args.size as u64).collect();
    if let KeyOrder::Shuffled = args.order {
        let mut rng = rand::rngs::StdRng::seed_from_u64(args.seed);
        keys.shuffle(&mut rng);
    }

    println!(
        "Running with {:?} keys, {} node count and capacity {}",
        args.order,
        args.size,
        config.capacity()
    );

    let start = Instant::now();
    insert_all(&mut tree, &keys);
    let inserted = Instant::now();
    for key in keys.iter() {
        assert!(tree.contains(key));
    }
    for key in keys.iter() {
        assert!(!tree.insert(*key));
    }
    let checked_contains = Instant::now();
    let copy = tree.clone();
    assert!(copy == tree);
    let copied = Instant::now();

    if args.show {
        print!("{}", tree);
        if let Err(e) = tree.display_sideways(&mut io::stdout().lock()) {
            tracing::error!("sideways display failed: {}", e);
        }
    }
    let height = tree.height();

    let flattened = Instant::now();
    let flat = tree.flatten();
    assert!(is_sorted_strictly(&flat.records));
    let emitted = flat.records.len();
    let rebuild_start = Instant::now();
    let rebuilt = tree.rebuild_from_sorted(flat.records)?;
    let end = Instant::now();

    println!(
        "Inserts took {} seconds",
        inserted.saturating_duration_since(start).as_secs_f32()
    );
    println!(
        "Checking contains and duplicates took {} seconds",
        checked_contains
            .saturating_duration_since(inserted)
            .as_secs_f32()
    );
    println!(
        "Deep copy and compare took {} seconds",
        copied.saturating_duration_since(checked_contains).as_secs_f32()
    );
    println!(
        "Flatten took {} seconds ({} emitted, {} dropped)",
        rebuild_start.saturating_duration_since(flattened).as_secs_f32(),
        emitted,
        flat.dropped
    );
    println!(
        "Rebuild took {} seconds ({} records)",
        end.saturating_duration_since(rebuild_start).as_secs_f32(),
        rebuilt
    );
    println!("Height {} before rebuild, {} after", height, tree.height());
    println!(
        "Total {} seconds",
        end.saturating_duration_since(start).as_secs_f32()
    );
    Ok(())
}

fn insert_all<O: TreeOps<u64>>(tree: &mut O, keys: &[u64]) {
    for (i, key) in keys.iter().enumerate() {
        assert_eq!(tree.len(), i);
        assert!(tree.insert(*key));
    }
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            eprintln!("Don't be crazy, max is -v -v -v");
            LevelFilter::TRACE
        }
    };

    let fmt_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();

    tracing::debug!(?filter, "logging initialised");
}
