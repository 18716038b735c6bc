use anyhow::{Context, Result};
use cultevo_analysis::analysis::{BatchSummary, PulseDeviation, Summary, WindowSummary};
use cultevo_sim::evolution::BiasSpec;
use cultevo_sim::simulation::{HeteroConfig, HeteroOutput, TransmissionConfig, TransmissionOutput};
use serde::Serialize;

/// Write `value` to stdout as pretty-printed JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{text}");
    Ok(())
}

pub fn print_parameters(config: &TransmissionConfig) {
    println!("\n📋 Run Configuration");
    println!(
        "  • Population Size: {} [-n, --population-size]",
        config.population_size
    );
    println!(
        "  • Innovation Rate: {} [-m, --innovation-rate]",
        config.innovation_rate
    );
    println!("  • Timesteps: {} [-T, --timesteps]", config.timesteps);
    println!("  • Warm-up: {} [-w, --warm-up]", config.warm_up);
    match config.seed {
        Some(seed) => println!("  • Random Seed: {seed} [--seed]"),
        None => println!("  • Random Seed: Random [--seed]"),
    }

    println!("\n🎯 Transmission Bias");
    match &config.bias {
        BiasSpec::Constant(b) => println!("  • Constant: {b} [-b, --bias]"),
        BiasSpec::Schedule(schedule) => println!(
            "  • Schedule: {} generations, mean {:.4} [--schedule]",
            schedule.len(),
            config.bias.mean(config.timesteps)
        ),
        BiasSpec::Heterogeneous { mean, sd } => {
            println!("  • Heterogeneous: Normal({mean}, {sd}) [-b, --bias-sd]")
        }
    }
    if let Some(top) = config.top {
        println!("  • Turnover list sizes: 1..={top} [--top]");
    }
    println!();
}

pub fn print_hetero_parameters(config: &HeteroConfig) {
    println!("\n📋 Heterogeneous Run Configuration");
    println!("  • Population Size: {}", config.population_size);
    println!("  • Innovation Rate: {}", config.innovation_rate);
    println!("  • Timesteps: {}", config.timesteps);
    println!(
        "  • Bias: Normal({}, {}) per birth",
        config.bias_mean, config.bias_sd
    );
    println!();
}

pub fn print_output(out: &TransmissionOutput) {
    println!("📊 Results");
    println!("  • Generations recorded: {}", out.obs_div.len());
    println!("  • Mean diversity: {:.4}", out.mean_diversity());
    println!("  • Final diversity: {:.4}", out.final_diversity());
    println!("  • Expected neutral diversity: {:.4}", out.exp_div);
    println!(
        "  • Deviation from neutral: {:+.4}",
        out.mean_diversity() - out.exp_div
    );
    if let Some(turnover) = &out.turnover {
        match turnover.fit() {
            Some(fit) => println!(
                "  • Turnover exponent x: {:.4} (R² = {:.3}, {} list sizes)",
                fit.exponent,
                fit.r_squared,
                fit.list_sizes.len()
            ),
            None => println!("  • Turnover exponent x: insufficient data"),
        }
    }
    if let Some(matrix) = &out.frequencies {
        println!(
            "  • Frequency matrix: {} generations × {} variants",
            matrix.len(),
            matrix.variants().len()
        );
    }
}

pub fn print_hetero_output(out: &HeteroOutput) {
    println!("📊 Results");
    println!("  • Generations recorded: {}", out.obs_div.len());
    println!("  • Mean diversity: {:.4}", out.mean_diversity());
    println!("  • Final diversity: {:.4}", out.final_diversity());
    println!("  • Expected neutral diversity: {:.4}", out.exp_div);
}

fn print_summary_line(label: &str, s: &Summary) {
    if s.n == 0 {
        println!("  • {label}: no estimates ({} undefined)", s.nan_count);
        return;
    }
    println!(
        "  • {label}: mean {:.4} ± {:.4}, median {:.4}, IQR [{:.4}, {:.4}]",
        s.mean, s.sd, s.median, s.q25, s.q75
    );
    if s.nan_count > 0 {
        println!("    - {} undefined", s.nan_count);
    }
}

pub fn print_batch_summary(summary: &BatchSummary) {
    println!("📊 Batch Summary ({} repetitions)", summary.repetitions);
    println!("  • Expected neutral diversity: {:.4}", summary.exp_div);
    print_summary_line("Mean diversity", &summary.mean_diversity);
    print_summary_line("Final diversity", &summary.final_diversity);
    if summary.turnover.n + summary.turnover.nan_count > 0 {
        print_summary_line("Turnover exponent", &summary.turnover);
    }
}

pub fn print_window_summaries(summaries: &[WindowSummary]) {
    println!("\n🪟 Window Sensitivity");
    for s in summaries {
        println!("  Window {} generations:", s.window);
        print_summary_line("  Turnover exponent", &s.exponent);
        print_summary_line("  Mean diversity", &s.diversity);
    }
}

pub fn print_pulse(deviation: &PulseDeviation) {
    println!("📉 Pulse Response");
    println!("  • Compared generations: {}", deviation.deviation.len());
    println!(
        "  • Trough: {:+.4} at {} generations after onset",
        deviation.trough, deviation.trough_offset
    );
    println!("  • Recovery gap: {:+.4}", deviation.recovery_gap);
}
