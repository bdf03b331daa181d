//! Colored console output helpers shared by the CLI commands.

use colored::Colorize;

pub fn section(title: &str) {
    println!();
    println!("{}", format!("=== {title} ===").cyan().bold());
}

pub fn info(message: &str) {
    println!("{message}");
}

pub fn success(message: &str) {
    println!("{}", message.green());
}

pub fn warn(message: &str) {
    println!("{}", message.yellow());
}

/// A fixed-width proportional bar for the dashboard charts.
pub fn bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let filled = ((value / max) * width as f64).round() as usize;
    "█".repeat(filled.clamp(1, width))
}

/// Human label for a day offset to a payment date.
pub fn due_label(days: i64) -> String {
    match days {
        d if d < -1 => format!("{} days overdue", -d),
        -1 => "1 day overdue".into(),
        0 => "due today".into(),
        1 => "in 1 day".into(),
        d => format!("in {d} days"),
    }
}
