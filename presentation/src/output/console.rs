//! Console output formatter for council results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use council_application::{FINAL_PRODUCT_HEADING, RunCouncilOutput, SynthesisOutput};
use council_domain::{AgentResult, Document, RunState};
use std::path::PathBuf;

/// Formats council results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the run summary followed by the Final Product section
    pub fn format(output: &RunCouncilOutput) -> String {
        let mut text = Self::summary(output);
        if let Some(body) = output
            .document
            .section_by_heading(FINAL_PRODUCT_HEADING)
            .and_then(|section| section.body())
        {
            text.push_str(&Self::section_header(FINAL_PRODUCT_HEADING));
            text.push('\n');
            text.push_str(body);
            text.push('\n');
        }
        text.push_str(&Self::footer());
        text
    }

    /// Run summary followed by the whole rendered document
    pub fn format_full(output: &RunCouncilOutput) -> String {
        let mut text = Self::summary(output);
        text.push_str(&Self::footer());
        text.push('\n');
        text.push_str(&output.document.render_markdown());
        text
    }

    fn summary(output: &RunCouncilOutput) -> String {
        let mut text = String::new();

        text.push_str(&Self::header("Council Results"));
        text.push('\n');

        text.push_str(&format!(
            "{} {}\n",
            "Document:".cyan().bold(),
            output.document.title()
        ));
        text.push_str(&format!(
            "{} {} ({} agents, {:.1}s)\n",
            "Run:".cyan().bold(),
            Self::state_label(output.run.state()),
            output.run.roster_size(),
            output.duration_ms as f64 / 1000.0
        ));

        text.push_str(&Self::section_header("Agents"));
        for result in output.results.iter() {
            text.push_str(&Self::agent_line(result));
            text.push('\n');
        }

        if !output.run.failures().is_empty() {
            text.push_str(&Self::section_header("Failures"));
            for failure in output.run.failures() {
                text.push_str(&format!(
                    "  {} {}: {}\n",
                    format!("#{}", failure.index + 1).dimmed(),
                    failure.agent.red(),
                    failure.reason
                ));
            }
        }

        text.push_str(&Self::section_header("Sections"));
        text.push_str(&Self::section_list(&output.document));

        if output.meta_analysis.is_degraded() {
            text.push_str(&format!(
                "\n{} {}\n",
                "Meta-analysis:".yellow().bold(),
                output.meta_analysis.text()
            ));
        }
        if let Some(review) = &output.final_review
            && review.is_degraded()
        {
            text.push_str(&format!(
                "{} {}\n",
                "Final review:".yellow().bold(),
                review.text()
            ));
        }

        text
    }

    /// Format per-agent results as JSON
    pub fn format_json(output: &RunCouncilOutput) -> String {
        serde_json::to_string_pretty(&output.results).unwrap_or_else(|_| "[]".to_string())
    }

    /// Format the summary of a synthesis pass
    pub fn format_synthesis(output: &SynthesisOutput) -> String {
        let mut text = String::new();

        text.push_str(&format!(
            "{}\n\n",
            "=== Synthesis Complete ===".cyan().bold()
        ));
        text.push_str(&format!(
            "{} {}\n",
            "Document:".bold(),
            output.document.title()
        ));
        text.push_str(&format!(
            "{} {}/{} synthesized, {} after merging ({:.1}s)\n",
            "Chunks:".bold(),
            output.synthesized_count,
            output.chunk_count,
            output.merged_count,
            output.duration_ms as f64 / 1000.0
        ));

        let dropped = output.chunk_count.saturating_sub(output.synthesized_count);
        if dropped > 0 {
            text.push_str(&format!(
                "{}\n",
                format!("{} chunk(s) failed and were dropped", dropped).yellow()
            ));
        }

        text
    }

    /// List of artifact files written
    pub fn format_paths(paths: &[PathBuf]) -> String {
        let mut text = format!("\n{}\n", "Written:".cyan().bold());
        for path in paths {
            text.push_str(&format!("  {}\n", path.display()));
        }
        text
    }

    fn agent_line(result: &AgentResult) -> String {
        if result.is_failed() {
            return format!("  {} {}", "x".red(), result.agent().red().bold());
        }

        let degraded = result.degraded_count();
        let mut line = format!(
            "  {} {} {}",
            "v".green(),
            result.agent().bold(),
            format!("({:.1}s)", result.duration_ms() as f64 / 1000.0).dimmed()
        );
        if degraded > 0 {
            line.push_str(&format!(" {}", format!("{} degraded", degraded).yellow()));
        }
        line
    }

    fn section_list(document: &Document) -> String {
        let mut text = String::new();
        for section in document.sections() {
            let marker = if section.is_filled() {
                "*".green()
            } else {
                "-".dimmed()
            };
            text.push_str(&format!("  {} {}\n", marker, section.heading()));
        }
        text
    }

    fn state_label(state: &RunState) -> String {
        match state {
            RunState::Done => "done".green().to_string(),
            RunState::Fatal(reason) => format!("{} ({})", "fatal".red(), reason),
            other => other.to_string(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, output: &RunCouncilOutput) -> String {
        Self::format(output)
    }

    fn format_json(&self, output: &RunCouncilOutput) -> String {
        Self::format_json(output)
    }

    fn format_synthesis(&self, output: &SynthesisOutput) -> String {
        Self::format_synthesis(output)
    }
}
