//! Database access

mod pool;

pub use pool::{create_pool, prune_rate_limits, run_migrations};
