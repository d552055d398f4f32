use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::agent::AgentConfig;
use crate::config::ToolProfile;
use crate::error::RunError;

/// Body of `POST /run`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunRequest {
    pub user_input: String,
    pub connected: bool,
    pub tool: Option<String>,
    pub system_prompt: String,
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RunResponse {
    pub success: bool,
    #[serde(default)]
    pub output: String,
}

/// What the output box shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Output {
    #[default]
    Empty,
    Loading(String),
    Success(String),
    Error(String),
}

impl Output {
    pub fn text(&self) -> &str {
        match self {
            Output::Empty => "",
            Output::Loading(text) | Output::Success(text) | Output::Error(text) => text,
        }
    }
}

/// Run-state for the workflow trigger: one request at a time.
#[derive(Debug, Clone, Default)]
pub struct Workflow {
    running: bool,
    output: Output,
}

impl Workflow {
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn output(&self) -> &Output {
        &self.output
    }

    /// Validate the query and build the request. On success the trigger is
    /// locked until `finish_run`.
    pub fn begin_run(
        &mut self,
        input: &str,
        tool: Option<&ToolProfile>,
        agent: &AgentConfig,
    ) -> Result<RunRequest, RunError> {
        if self.running {
            return Err(RunError::Busy);
        }
        let input = input.trim();
        if input.is_empty() {
            self.output = Output::Error(RunError::EmptyInput.to_string());
            return Err(RunError::EmptyInput);
        }

        self.running = true;
        self.output = Output::Loading("Running workflow...".to_string());
        info!(tool = tool.map(|t| t.wire_name.as_str()), model = %agent.model, "running workflow");

        Ok(RunRequest {
            user_input: input.to_string(),
            connected: tool.is_some(),
            tool: tool.map(|t| t.wire_name.clone()),
            system_prompt: agent.system_prompt.clone(),
            model: agent.model.id().to_string(),
        })
    }

    pub fn finish_run(&mut self, result: Result<RunResponse, RunError>) {
        self.running = false;
        self.output = match result {
            Ok(RunResponse { success: true, output }) => Output::Success(output),
            Ok(RunResponse { success: false, output }) => Output::Error(output),
            Err(err) => {
                warn!(%err, "workflow run failed");
                Output::Error(format!("Error: {err}"))
            }
        };
    }
}
