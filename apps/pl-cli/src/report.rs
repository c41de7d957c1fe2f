//! Plain-text reports printed to stdout.

use pl_design::{Design, SweepOutcome};
use std::io::{self, Write};

/// Dollar amount with thousands separators and at most two decimals.
pub fn money(value: f64) -> String {
    if !value.is_finite() {
        return format!("${value}");
    }
    let cents = (value.abs() * 100.0).round();
    let whole = (cents / 100.0).trunc() as u128;
    let frac = (cents % 100.0) as u32;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && cents > 0.0 { "-" } else { "" };
    match frac {
        0 => format!("{sign}${grouped}"),
        f if f % 10 == 0 => format!("{sign}${grouped}.{}", f / 10),
        f => format!("{sign}${grouped}.{f:02}"),
    }
}

pub fn print_design(heading: &str, design: &Design) {
    let c = &design.costs;
    println!("===== {heading} =====");
    if design.pipe.parallel {
        println!("Effective Diameter : {:.6} m", design.effective_diameter_m());
        println!("Actual Diameter    : {:.6} m (x2)", design.nominal_diameter_m());
    } else {
        println!("Diameter           : {:.6} m", design.nominal_diameter_m());
    }
    println!("Percent Buried     : {:.6} %", design.burial_fraction * 100.0);
    println!("Number of Pumps    : {}", c.pump_count);
    println!();
    println!("---- Cost Breakdown ----");
    println!("Pipe Cost          : {}", money(c.pipe_cost));
    println!("Burial Cost        : {}", money(c.burial_cost));
    println!("Pump Cost          : {}", money(c.pump_cost));
    println!("--------------------------");
    println!("Total Cost         : {}", money(c.total_cost));
    println!("=====================================");
    println!();
}

/// One-line description of the chosen diameter.
pub fn diameter_line(design: &Design) -> String {
    if design.pipe.parallel {
        format!(
            "effective diameter {:.6} m (2 x {:.6} m actual)",
            design.effective_diameter_m(),
            design.nominal_diameter_m()
        )
    } else {
        format!("diameter {:.6} m", design.nominal_diameter_m())
    }
}

pub fn final_line(outcome: &SweepOutcome) -> String {
    let best = &outcome.best;
    format!(
        "Lowest cost {} at {:.6}% buried with {} pumps and {} ({} designs evaluated, {} improvements)",
        money(best.total_cost()),
        best.burial_fraction * 100.0,
        best.pump_count(),
        diameter_line(best),
        outcome.evaluated,
        outcome.improvements
    )
}

pub fn print_final(outcome: &SweepOutcome) {
    println!("{}", final_line(outcome));
}

pub fn render_progress(index: usize, diameters: usize, nominal_m: f64, best_cost: f64) {
    let done = index + 1;
    let fraction = done as f64 / diameters.max(1) as f64;
    let width = 28usize;
    let filled = ((fraction * width as f64).round() as usize).min(width);
    print!(
        "\r[{}{}] {:>6.2}%  diameter={:.6} m  {}/{}  best={}",
        "#".repeat(filled),
        "-".repeat(width.saturating_sub(filled)),
        fraction * 100.0,
        nominal_m,
        done,
        diameters,
        money(best_cost)
    );
    let _ = io::stdout().flush();
}

pub fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(120));
    let _ = io::stdout().flush();
}
