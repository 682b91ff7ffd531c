//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::distributed::{RunReport, Share};
use crate::search::{Solution, SolutionSet};
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::Path;

/// Format solutions and run reports for display
pub struct SolutionFormatter;

impl SolutionFormatter {
    /// Draw a solution as a board, with row and column numbers
    pub fn format_board(solution: &Solution) -> String {
        let n = solution.size();
        let mut output = String::new();

        output.push_str("   ");
        for col in 0..n {
            let _ = write!(output, "{:2}", (col + 1) % 10);
        }
        output.push('\n');

        for row in 1..=n {
            let _ = write!(output, "{:2} ", row);
            for &queen_row in solution.rows() {
                output.push_str(if usize::from(queen_row) == row { " ♛" } else { " ·" });
            }
            output.push('\n');
        }

        output
    }

    /// Summary of a finished run
    pub fn format_run_summary(report: &RunReport) -> String {
        let mut output = String::new();
        let _ = writeln!(output, "Board: {}x{}", report.board_size, report.board_size);
        let _ = writeln!(output, "Workers: {}", report.worker_count);
        let _ = writeln!(output, "Solutions: {}", report.count);
        let _ = writeln!(
            output,
            "Max worker time: {:.6}s",
            report.max_worker_elapsed.as_secs_f64()
        );
        output
    }

    /// Per-worker breakdown as a table
    pub fn format_worker_table(report: &RunReport) -> String {
        let mut output = String::new();

        output.push_str("Rank | Rows        | Solutions | Placements   | Time(ms)\n");
        output.push_str("-----|-------------|-----------|--------------|----------\n");

        for worker in &report.workers {
            let rows = if worker.rows == 0 {
                "-".to_string()
            } else {
                format!("{}..={}", worker.first_row, worker.first_row + worker.rows - 1)
            };
            let _ = writeln!(
                output,
                "{:4} | {:11} | {:9} | {:12} | {:8.3}",
                worker.rank, rows, worker.solutions, worker.placements, worker.elapsed_ms
            );
        }

        output
    }

    /// One line per share
    pub fn format_share_plan(board_size: usize, shares: &[Share]) -> String {
        let mut output = String::new();
        let _ = writeln!(
            output,
            "Column 0 has {} candidate rows split across {} workers:",
            board_size,
            shares.len()
        );
        for share in shares {
            let _ = writeln!(output, "  {}", share);
        }
        output
    }

    /// Save the solutions of a run based on output format
    pub fn save_solutions<P: AsRef<Path>>(
        report: &RunReport,
        output_dir: P,
        format: OutputFormat,
    ) -> Result<()> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

        match format {
            OutputFormat::Text => {
                let mut content = String::new();
                for solution in &report.solutions {
                    let _ = writeln!(content, "{}", solution);
                }
                let path = output_dir.join("solutions.txt");
                std::fs::write(&path, content)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
            }
            OutputFormat::Json => {
                let set = SolutionSet::new(
                    report.board_size,
                    report.worker_count,
                    report.solutions.clone(),
                );
                set.save_to_file(output_dir.join("solutions.json"))?;

                // Also save a summary file
                let summary_path = output_dir.join("run_summary.json");
                let summary_json = serde_json::to_string_pretty(&report.workers)?;
                std::fs::write(&summary_path, summary_json)
                    .with_context(|| format!("Failed to write {}", summary_path.display()))?;
            }
            OutputFormat::Visual => {
                let mut content = String::new();
                for (i, solution) in report.solutions.iter().enumerate() {
                    let _ = writeln!(content, "Solution {} ({}):", i + 1, solution);
                    content.push_str(&Self::format_board(solution));
                    content.push('\n');
                }
                let path = output_dir.join("solutions_visual.txt");
                std::fs::write(&path, content)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
            }
        }

        Ok(())
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err()
            && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
