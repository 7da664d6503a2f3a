//! Terminal rendering of the post-interview analysis.

use crate::api::{AnalysisItem, AnalysisResult, ProgressBucket};
use owo_colors::OwoColorize;

const BAR_WIDTH: usize = 20;

/// Scores are on a 0..=10 scale.
fn score_label(score: f64) -> &'static str {
    if score >= 7.5 {
        "strong"
    } else if score >= 5.0 {
        "fair"
    } else {
        "weak"
    }
}

fn score_bar(score: f64) -> String {
    let filled = ((score / 10.0) * BAR_WIDTH as f64).round().clamp(0.0, BAR_WIDTH as f64) as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn print_score_line(label: &str, score: f64) {
    let bar = score_bar(score);
    let text = format!("{} {:>4.1}/10", bar, score);
    match score_label(score) {
        "strong" => println!("  {} {}", label.dimmed(), text.green()),
        "fair" => println!("  {} {}", label.dimmed(), text.yellow()),
        _ => println!("  {} {}", label.dimmed(), text.red()),
    }
}

fn print_item(index: usize, item: &AnalysisItem) {
    println!();
    println!("{} {}", format!("Q{}.", index + 1).bold(), item.question);
    if item.answer.is_empty() {
        println!("    {}", "(no answer recorded)".dimmed());
    } else {
        println!("    {}", item.answer);
    }
    if let Some(score) = item.item_score {
        print_score_line("score ", score);
    }
    if !item.hits.is_empty() {
        println!("    {} {}", "covered:".dimmed(), item.hits.join(", ").green());
    }
    if !item.misses.is_empty() {
        println!("    {} {}", "missed: ".dimmed(), item.misses.join(", ").red());
    }
    if !item.expected.is_empty() {
        println!("    {} {}", "expected:".dimmed(), item.expected.dimmed());
    }
}

fn print_bucket(bucket: &ProgressBucket) {
    let questions = if bucket.questions == 1 {
        "1 question".to_string()
    } else {
        format!("{} questions", bucket.questions)
    };
    print_score_line(&format!("{:<24} ({questions})", bucket.name), bucket.score);
}

fn print_list(heading: &str, entries: &[String]) {
    if entries.is_empty() {
        return;
    }
    println!();
    println!("{}", heading.bold());
    for entry in entries {
        println!("  - {}", entry);
    }
}

/// Print the full analysis report to stdout.
pub fn render(result: &AnalysisResult) {
    println!();
    println!("{}", "Interview results".bold());
    print_score_line("overall", result.overall_score);

    for (index, item) in result.items.iter().enumerate() {
        print_item(index, item);
    }

    if !result.progress.is_empty() {
        println!();
        println!("{}", "Progress by area".bold());
        for bucket in &result.progress {
            print_bucket(bucket);
        }
    }

    print_list("Strengths", &result.strengths);
    print_list("Improvements", &result.improvements);
    print_list("Next steps", &result.next_steps);

    if !result.analysis.is_empty() {
        println!();
        println!("{}", result.analysis);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_bar_is_fixed_width() {
        for score in [0.0, 2.5, 5.0, 9.9, 10.0] {
            assert_eq!(score_bar(score).chars().count(), BAR_WIDTH);
        }
    }

    #[test]
    fn score_bar_extremes() {
        assert_eq!(score_bar(0.0), "░".repeat(BAR_WIDTH));
        assert_eq!(score_bar(10.0), "█".repeat(BAR_WIDTH));
    }

    #[test]
    fn score_label_thresholds() {
        assert_eq!(score_label(10.0), "strong");
        assert_eq!(score_label(7.5), "strong");
        assert_eq!(score_label(7.4), "fair");
        assert_eq!(score_label(5.0), "fair");
        assert_eq!(score_label(4.9), "weak");
        assert_eq!(score_label(0.0), "weak");
    }

    #[test]
    fn render_empty_result_does_not_panic() {
        render(&AnalysisResult::default());
    }

    #[test]
    fn render_full_result_does_not_panic() {
        render(&AnalysisResult {
            overall_score: 6.8,
            items: vec![
                AnalysisItem {
                    question: "What is impedance matching?".to_string(),
                    answer: "Keeping trace impedance constant.".to_string(),
                    expected: "A complete answer.".to_string(),
                    item_score: Some(7.0),
                    hits: vec!["impedance".to_string()],
                    misses: vec!["termination".to_string()],
                },
                AnalysisItem {
                    question: "Unanswered question".to_string(),
                    ..Default::default()
                },
            ],
            strengths: vec!["Signal integrity".to_string()],
            improvements: vec!["Terminations".to_string()],
            next_steps: vec!["Review reflections".to_string()],
            analysis: "Overall a fair performance.".to_string(),
            progress: vec![ProgressBucket {
                name: "Signal integrity".to_string(),
                score: 7.0,
                questions: 2,
            }],
        });
    }
}
