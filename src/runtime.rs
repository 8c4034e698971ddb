//! Thread-pool configuration and tuning knobs.

use rayon::ThreadPoolBuilder;
use std::sync::Once;

/// Batch length a worker runs between coordinator drains. Values in the
/// hundreds-to-thousands range all behave well.
pub const DEFAULT_BATCH_SIZE: usize = 800;

struct ThreadConfig {
    count: usize,
    source: String,
}

fn parse_env_threads(keys: &[&str]) -> Option<ThreadConfig> {
    for &key in keys {
        if let Ok(v) = std::env::var(key) {
            if let Ok(val) = v.parse::<usize>() {
                if val > 0 {
                    return Some(ThreadConfig {
                        count: val,
                        source: key.to_string(),
                    });
                }
            }
        }
    }
    None
}

fn detect_thread_config() -> ThreadConfig {
    const ENV_HINTS: [&str; 4] = [
        "SETSEARCH_THREADS",
        "RAYON_NUM_THREADS",
        "SLURM_CPUS_PER_TASK",
        "OMP_NUM_THREADS",
    ];

    if let Some(cfg) = parse_env_threads(&ENV_HINTS) {
        return cfg;
    }

    let fallback = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .max(1);

    ThreadConfig {
        count: fallback,
        source: "available_parallelism".to_string(),
    }
}

/// Configure the global rayon pool once. Safe to call repeatedly.
pub fn configure_thread_pool() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let cfg = detect_thread_config();
        match ThreadPoolBuilder::new()
            .num_threads(cfg.count)
            .thread_name(|i| format!("setsearch-worker-{i}"))
            .build_global()
        {
            Ok(_) => {
                eprintln!(
                    "[threads] rayon pool = {} threads (hint: {})",
                    cfg.count, cfg.source
                );
            }
            Err(err) => {
                eprintln!(
                    "[threads] warn: failed to configure rayon pool ({err}); continuing with default"
                );
            }
        }
    });
}

/// Default worker-context count for the incremental engine: leave a few
/// cores for the coordinator and the rest of the machine.
pub fn default_workers() -> usize {
    if let Some(cfg) = parse_env_threads(&["SETSEARCH_WORKERS"]) {
        return cfg.count;
    }
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .saturating_sub(4)
        .max(1)
}

/// Batch-size override via `SETSEARCH_BATCH`; falls back to the default.
pub fn default_batch_size() -> usize {
    std::env::var("SETSEARCH_BATCH")
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_BATCH_SIZE)
}
