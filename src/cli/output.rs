//! Output formatting for CLI

use crate::pipeline::{ComparisonResult, TrainingResult};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

pub fn format_percent(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Print statistics table
pub fn print_stats_table(stats: &[(&str, String)]) {
    for (key, value) in stats {
        print_kv(key, value);
    }
}

pub fn print_training_result(result: &TrainingResult) {
    print_section("Training Results");
    let promotions = if result.promotions.is_empty() {
        "none".to_string()
    } else {
        result
            .promotions
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };
    print_stats_table(&[
        ("Episodes", format_number(result.episodes)),
        ("Wins", format_number(result.wins)),
        ("Win rate", format_percent(result.win_rate)),
        ("Average reward", format!("{:.3}", result.average_reward)),
        ("Average turns", format!("{:.2}", result.average_turns)),
        ("Final epsilon", format!("{:.5}", result.final_epsilon)),
        ("States learned", format_number(result.states_learned)),
        ("Promotions", promotions),
    ]);
}

pub fn print_comparison_result(result: &ComparisonResult) {
    print_section(&format!("{} vs {}", result.agent_one, result.agent_two));
    print_stats_table(&[
        ("Games", format_number(result.games)),
        ("Wins", format_number(result.wins)),
        ("Losses", format_number(result.losses)),
        ("Draws", format_number(result.draws)),
        ("Win rate", format_percent(result.win_rate)),
        ("Average reward", format!("{:.3}", result.average_reward)),
        ("Average turns", format!("{:.2}", result.average_turns)),
    ]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1_000), "1,000");
        assert_eq!(format_number(1_234_567), "1,234,567");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.6543), "65.43%");
    }
}
