use anyhow::{bail, ensure, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use separator::Separatable;
use setsearch::cards::{pack, Card, PACK_SIZE};
use setsearch::{
    runtime, BasicSearch, CancelToken, Cancelled, IncrementalSearch, SearchStats, SetCount,
};
use std::env;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Clone, Copy, PartialEq)]
enum Algorithm {
    Basic,
    Incremental,
}

struct Options {
    algorithm: Algorithm,
    deck_size: usize,
    include: Vec<Card>,
    exclude: Vec<Card>,
    workers: Option<usize>,
    batch_size: Option<usize>,
}

fn usage() -> ! {
    eprintln!(
        "usage: setsearch [--algo basic|incremental] [--include I,J,..] [--exclude I,J,..]\n                 [--workers N] [--batch-size N] <deck_size>"
    );
    std::process::exit(1);
}

fn parse_cards(arg: &str) -> Result<Vec<Card>> {
    arg.split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| {
            let index: usize = s
                .trim()
                .parse()
                .with_context(|| format!("bad card index {s:?}"))?;
            ensure!(index < PACK_SIZE, "card index {index} out of range");
            Ok(pack()[index])
        })
        .collect()
}

fn parse_args() -> Result<Options> {
    let mut algorithm = Algorithm::Incremental;
    let mut include = Vec::new();
    let mut exclude = Vec::new();
    let mut workers = None;
    let mut batch_size = None;
    let mut deck_size = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--algo" => {
                let v = args.next().unwrap_or_else(|| usage());
                algorithm = match v.as_str() {
                    "basic" => Algorithm::Basic,
                    "incremental" => Algorithm::Incremental,
                    _ => bail!("unknown algorithm {v:?}"),
                };
            }
            "--include" => include = parse_cards(&args.next().unwrap_or_else(|| usage()))?,
            "--exclude" => exclude = parse_cards(&args.next().unwrap_or_else(|| usage()))?,
            "--workers" => {
                workers = Some(
                    args.next()
                        .unwrap_or_else(|| usage())
                        .parse()
                        .context("bad --workers value")?,
                )
            }
            "--batch-size" => {
                batch_size = Some(
                    args.next()
                        .unwrap_or_else(|| usage())
                        .parse()
                        .context("bad --batch-size value")?,
                )
            }
            "--help" | "-h" => usage(),
            _ if deck_size.is_none() => {
                deck_size = Some(
                    arg.parse()
                        .with_context(|| format!("bad deck size {arg:?}"))?,
                )
            }
            _ => usage(),
        }
    }

    Ok(Options {
        algorithm,
        deck_size: deck_size.unwrap_or_else(|| usage()),
        include,
        exclude,
        workers,
        batch_size,
    })
}

/// First Ctrl-C requests cooperative cancellation; the second aborts.
fn install_ctrlc(cancel: &CancelToken) -> Result<()> {
    let cancel = cancel.clone();
    let presses = AtomicU32::new(0);
    ctrlc::set_handler(move || {
        if presses.fetch_add(1, Ordering::SeqCst) == 0 {
            eprintln!("\n[cancel] stopping at the next batch boundary (press again to abort)");
            cancel.cancel();
        } else {
            std::process::exit(130);
        }
    })
    .context("install Ctrl-C handler")
}

fn print_summary(opts: &Options, stats: &SearchStats, final_count: Option<u64>) {
    println!(
        "decks analyzed: {}",
        stats.decks_analyzed().separated_string()
    );
    println!(
        "triples tested: {}",
        stats.triples_tested().separated_string()
    );
    println!("no-Set decks by size:");
    for (size, n) in stats.no_set_by_size() {
        println!("  {:>2} cards: {}", size, n.separated_string());
    }
    let longest = stats.longest_no_set();
    if !longest.is_empty() {
        let indexes: Vec<usize> = longest.iter().map(|c| c.index()).collect();
        println!(
            "longest no-Set deck seen ({} cards): {:?}",
            longest.len(),
            indexes
        );
    }
    if let Some(count) = final_count {
        println!(
            "no-Set decks of size {}: {}",
            opts.deck_size,
            count.separated_string()
        );
    }
}

fn main() -> Result<()> {
    runtime::configure_thread_pool();
    let opts = parse_args()?;

    let cancel = CancelToken::new();
    install_ctrlc(&cancel)?;

    let stats = Arc::new(SearchStats::new());
    let done = Arc::new(AtomicBool::new(false));

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    pb.enable_steady_tick(Duration::from_millis(120));
    let status = {
        let stats = Arc::clone(&stats);
        let done = Arc::clone(&done);
        let pb = pb.clone();
        thread::spawn(move || {
            while !done.load(Ordering::Relaxed) {
                pb.set_message(stats.status_line());
                thread::sleep(Duration::from_secs(1));
            }
        })
    };

    let observer = {
        let stats = Arc::clone(&stats);
        move |cards: &[Card], count: SetCount| stats.record(cards, count)
    };

    let result = match opts.algorithm {
        Algorithm::Basic => {
            BasicSearch::new(opts.deck_size, &opts.include, &opts.exclude, observer)?.run(&cancel)
        }
        Algorithm::Incremental => {
            let mut engine =
                IncrementalSearch::new(opts.deck_size, &opts.include, &opts.exclude, observer)?;
            if let Some(workers) = opts.workers {
                engine = engine.with_workers(workers)?;
            }
            if let Some(batch) = opts.batch_size {
                engine = engine.with_batch_size(batch)?;
            }
            engine.run(&cancel)
        }
    };

    done.store(true, Ordering::Relaxed);
    let _ = status.join();
    pb.finish_and_clear();

    match result {
        Ok(count) => {
            print_summary(&opts, &stats, Some(count));
            Ok(())
        }
        Err(err) if err.is::<Cancelled>() => {
            eprintln!("[cancel] run cancelled; statistics up to the cancellation point:");
            print_summary(&opts, &stats, None);
            std::process::exit(130);
        }
        Err(err) => Err(err),
    }
}
