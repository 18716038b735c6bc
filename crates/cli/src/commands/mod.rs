pub mod batch;
pub mod hetero;
pub mod predictive;
pub mod pulse;
pub mod run;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar over `len` items, or a hidden one when `show` is false.
pub(crate) fn progress_bar(len: usize, show: bool) -> Result<ProgressBar> {
    if !show {
        return Ok(ProgressBar::hidden());
    }
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {per_sec}",
            )?
            .progress_chars("#>-"),
    );
    Ok(pb)
}
