//! Progress reporting for council runs

use colored::Colorize;
use council_application::ports::progress::ProgressNotifier;
use council_domain::RunState;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress during a council run with progress bars
pub struct ProgressReporter {
    multi: MultiProgress,
    agent_bar: Mutex<Option<ProgressBar>>,
    phase_spinner: Mutex<Option<ProgressBar>>,
    chunk_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            agent_bar: Mutex::new(None),
            phase_spinner: Mutex::new(None),
            chunk_bar: Mutex::new(None),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-")
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold} {msg}")
            .unwrap()
    }

    /// Human-readable name of a state, `None` for states without a phase
    pub(crate) fn phase_display_name(state: &RunState) -> Option<&'static str> {
        match state {
            RunState::Running(_) => Some("Agents"),
            RunState::Aggregating => Some("Assembling document"),
            RunState::MetaAnalyzing => Some("Meta-analysis"),
            RunState::FinalReviewing => Some("Final review"),
            _ => None,
        }
    }

    fn start_spinner(&self, label: &str) {
        let spinner = self.multi.add(ProgressBar::new_spinner());
        spinner.set_style(Self::spinner_style());
        spinner.set_prefix(label.to_string());
        spinner.enable_steady_tick(Duration::from_millis(120));
        if let Some(previous) = self.phase_spinner.lock().unwrap().replace(spinner) {
            previous.finish_with_message("done".green().to_string());
        }
    }

    fn finish_spinner(&self) {
        if let Some(spinner) = self.phase_spinner.lock().unwrap().take() {
            spinner.finish_with_message("done".green().to_string());
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_state_change(&self, state: &RunState) {
        match state {
            RunState::Running(_) => {}
            RunState::Aggregating | RunState::MetaAnalyzing | RunState::FinalReviewing => {
                if let Some(bar) = self.agent_bar.lock().unwrap().take() {
                    bar.finish_with_message("all agents finished".green().to_string());
                }
                if let Some(label) = Self::phase_display_name(state) {
                    self.start_spinner(label);
                }
            }
            RunState::Done => self.finish_spinner(),
            RunState::Fatal(reason) => {
                self.finish_spinner();
                let _ = self
                    .multi
                    .println(format!("{} {}", "x".red(), reason));
            }
            RunState::Idle => {}
        }
    }

    fn on_agent_stage(&self, agent_index: usize, roster_size: usize, stage_label: &str) {
        let mut guard = self.agent_bar.lock().unwrap();
        let bar = guard.get_or_insert_with(|| {
            let bar = self.multi.add(ProgressBar::new(roster_size as u64));
            bar.set_style(Self::bar_style());
            bar.set_prefix("Agents");
            bar
        });
        bar.set_message(format!("agent {}: {}", agent_index + 1, stage_label));
    }

    fn on_agent_complete(&self, _agent_index: usize, _roster_size: usize, agent: &str, success: bool) {
        if let Some(bar) = self.agent_bar.lock().unwrap().as_ref() {
            let status = if success {
                format!("{} {}", "v".green(), agent)
            } else {
                format!("{} {}", "x".red(), agent)
            };
            bar.set_message(status);
            bar.inc(1);
        }
    }

    fn on_synthesis_start(&self, total_chunks: usize) {
        let bar = self.multi.add(ProgressBar::new(total_chunks as u64));
        bar.set_style(Self::bar_style());
        bar.set_prefix("Chunks");
        *self.chunk_bar.lock().unwrap() = Some(bar);
    }

    fn on_chunk_complete(&self, chunk_index: usize, success: bool) {
        let all_returned = match self.chunk_bar.lock().unwrap().as_ref() {
            Some(bar) => {
                if !success {
                    bar.set_message(format!("{} chunk {}", "x".red(), chunk_index + 1));
                }
                bar.inc(1);
                bar.position() >= bar.length().unwrap_or(0)
            }
            None => false,
        };

        if all_returned {
            if let Some(bar) = self.chunk_bar.lock().unwrap().take() {
                bar.finish_with_message("all chunks returned".green().to_string());
            }
            self.start_spinner("Final synthesis");
        }
    }

    fn on_synthesis_complete(&self) {
        if let Some(bar) = self.chunk_bar.lock().unwrap().take() {
            bar.finish_and_clear();
        }
        self.finish_spinner();
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_state_change(&self, state: &RunState) {
        match state {
            RunState::Running(0) | RunState::Aggregating | RunState::MetaAnalyzing
            | RunState::FinalReviewing => {
                if let Some(name) = ProgressReporter::phase_display_name(state) {
                    println!("{} {}", "->".cyan(), name.bold());
                }
            }
            RunState::Done => println!("{} {}", "->".cyan(), "Done".green().bold()),
            RunState::Fatal(reason) => println!("{} {}", "x".red(), reason),
            _ => {}
        }
    }

    fn on_agent_stage(&self, _agent_index: usize, _roster_size: usize, _stage_label: &str) {}

    fn on_agent_complete(&self, agent_index: usize, roster_size: usize, agent: &str, success: bool) {
        if success {
            println!("  {} {} ({}/{})", "v".green(), agent, agent_index + 1, roster_size);
        } else {
            println!(
                "  {} {} ({}/{}, failed)",
                "x".red(),
                agent,
                agent_index + 1,
                roster_size
            );
        }
    }

    fn on_synthesis_start(&self, total_chunks: usize) {
        println!("{} {} ({} chunks)", "->".cyan(), "Synthesis".bold(), total_chunks);
    }

    fn on_chunk_complete(&self, chunk_index: usize, success: bool) {
        if !success {
            println!("  {} chunk {} (dropped)", "x".red(), chunk_index + 1);
        }
    }
}
