// Console abstraction: the flow controller talks to the user only through
// this trait, so tests can drive it with a scripted implementation. The
// terminal implementation uses `dialoguer` for prompts and an `indicatif`
// spinner while a remote call is in flight.

use anyhow::Result;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub trait Console {
    /// Show a prompt and read one line of input. Empty input is allowed;
    /// validation belongs to the caller.
    fn prompt(&mut self, msg: &str) -> Result<String>;

    /// Write one line of output.
    fn line(&mut self, text: &str);

    /// Signal that a blocking remote call started.
    fn working(&mut self, _msg: &str) {}

    /// Signal that the remote call finished.
    fn done_working(&mut self) {}
}

/// Console bound to the controlling terminal.
pub struct TermConsole {
    spinner: Option<ProgressBar>,
}

impl TermConsole {
    pub fn new() -> Self {
        TermConsole { spinner: None }
    }
}

impl Default for TermConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for TermConsole {
    fn prompt(&mut self, msg: &str) -> Result<String> {
        let value = Input::<String>::new()
            .with_prompt(msg)
            .allow_empty(true)
            .interact_text()?;
        Ok(value)
    }

    fn line(&mut self, text: &str) {
        println!("{text}");
    }

    fn working(&mut self, msg: &str) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
        spinner.set_message(msg.to_string());
        spinner.enable_steady_tick(Duration::from_millis(120));
        self.spinner = Some(spinner);
    }

    fn done_working(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}
