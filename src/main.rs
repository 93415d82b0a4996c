use tracing::info;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

use spmat::{
    diagonal, inverse, poisson_2d, product_with_config, transpose, CsrMatrix, CsrStorage,
    SpmatConfig,
};

/// Logs to stdout, respecting `RUST_LOG` and defaulting to "info".
fn init_subscriber() {
    let fmt_layer = fmt::layer().with_target(true);

    let filter_layer = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}

fn main() -> spmat::Result<()> {
    init_subscriber();

    let grid = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(32usize);

    let config = SpmatConfig::from_env();
    info!(version = spmat::VERSION, grid, threads = config.n_threads, "spmat demo");

    let a: CsrMatrix<f64> = poisson_2d(grid);
    info!(rows = a.rows(), nnz = a.nnz(), "assembled 2D Poisson matrix");

    // Transposed rows come out column-sorted; sort A the same way to compare
    let t = transpose(&a)?;
    let mut sorted = a.clone();
    sorted.sort_rows();
    info!(symmetric = (t == sorted), "transpose");

    let a2 = product_with_config(&a, &a, &config)?;
    info!(nnz = a2.nnz(), "A * A");

    let diag = diagonal(&a)?;
    info!(first = ?diag.first(), "diagonal");

    // Invert the leading 1D block of the grid
    let block: CsrMatrix<f64> = spmat::poisson_1d(grid.min(8));
    let block_inv = inverse(&block)?;
    let identity = product_with_config(&block, &block_inv, &config)?;
    let max_err = spmat::to_dense(&identity)
        .indexed_iter()
        .map(|((i, j), &v)| (v - if i == j { 1.0 } else { 0.0 }).abs())
        .fold(0.0f64, f64::max);
    info!(n = block.rows(), max_err, "block inverse");

    Ok(())
}
