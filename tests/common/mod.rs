// Shared test helpers: an ApiClient pointed at a mock server and a console
// implementation driven by a pre-recorded input script.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::time::Duration;

use trello_card_cli::api::ApiClient;
use trello_card_cli::config::Settings;
use trello_card_cli::console::Console;

pub const TEST_KEY: &str = "test-key";
pub const TEST_TOKEN: &str = "test-token";

pub fn test_client(base_url: &str) -> ApiClient {
    ApiClient::new(Settings {
        base_url: base_url.to_string(),
        key: TEST_KEY.into(),
        token: TEST_TOKEN.into(),
        timeout: Duration::from_secs(2),
    })
    .expect("client should build")
}

/// Console fed from a fixed input script, recording everything written.
/// Prompts are recorded together with the answer so assertions can count
/// how often a prompt was shown.
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    pub lines: Vec<String>,
}

impl ScriptedConsole {
    pub fn new(inputs: &[&str]) -> Self {
        ScriptedConsole {
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            lines: Vec::new(),
        }
    }

    pub fn output(&self) -> String {
        self.lines.join("\n")
    }

    /// Number of recorded lines containing `needle`.
    pub fn count(&self, needle: &str) -> usize {
        self.lines.iter().filter(|l| l.contains(needle)).count()
    }
}

impl Console for ScriptedConsole {
    fn prompt(&mut self, msg: &str) -> anyhow::Result<String> {
        let answer = self
            .inputs
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("input script exhausted at prompt: {msg}"))?;
        self.lines.push(format!("{msg} {answer}"));
        Ok(answer)
    }

    fn line(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }
}
