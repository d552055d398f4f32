use std::fmt;

use tracing::info;

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant that provides clear, \
concise summaries. Keep your response under 200 words.";

/// Stored when the user saves a blank prompt.
pub const FALLBACK_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Model {
    #[default]
    Gpt35Turbo,
    Gpt4,
    Gpt4Turbo,
    Gpt4o,
    Gpt4oMini,
}

impl Model {
    pub const ALL: [Model; 5] = [
        Model::Gpt35Turbo,
        Model::Gpt4,
        Model::Gpt4Turbo,
        Model::Gpt4o,
        Model::Gpt4oMini,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Model::Gpt35Turbo => "gpt-3.5-turbo",
            Model::Gpt4 => "gpt-4",
            Model::Gpt4Turbo => "gpt-4-turbo",
            Model::Gpt4o => "gpt-4o",
            Model::Gpt4oMini => "gpt-4o-mini",
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Prompt and model the agent runs with. Lives in memory only.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentConfig {
    pub system_prompt: String,
    pub model: Model,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            model: Model::default(),
        }
    }
}

/// Edits in progress inside the open modal.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentDraft {
    pub prompt: String,
    pub model: Model,
}

#[derive(Debug, Clone)]
pub enum ModalMessage {
    PromptChanged(String),
    ModelSelected(Model),
    Save,
    /// Close button, Cancel, overlay click and Escape all land here.
    Close,
}

/// The agent settings modal. Open exactly while a draft exists.
#[derive(Debug, Clone, Default)]
pub struct AgentModal {
    draft: Option<AgentDraft>,
}

impl AgentModal {
    pub fn open(&mut self, config: &AgentConfig) {
        self.draft = Some(AgentDraft {
            prompt: config.system_prompt.clone(),
            model: config.model,
        });
    }

    pub fn close(&mut self) {
        self.draft = None;
    }

    pub fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    pub fn draft(&self) -> Option<&AgentDraft> {
        self.draft.as_ref()
    }

    pub fn edit_prompt(&mut self, prompt: String) {
        if let Some(draft) = &mut self.draft {
            draft.prompt = prompt;
        }
    }

    pub fn select_model(&mut self, model: Model) {
        if let Some(draft) = &mut self.draft {
            draft.model = model;
        }
    }

    /// Commit the draft into `config` and close. The only mutation path.
    pub fn save(&mut self, config: &mut AgentConfig) {
        let Some(draft) = self.draft.take() else {
            return;
        };
        let prompt = draft.prompt.trim();
        config.system_prompt = if prompt.is_empty() {
            FALLBACK_SYSTEM_PROMPT.to_string()
        } else {
            prompt.to_string()
        };
        config.model = draft.model;
        info!(model = %config.model, "agent settings saved");
    }

    pub fn update(&mut self, message: ModalMessage, config: &mut AgentConfig) {
        match message {
            ModalMessage::PromptChanged(prompt) => self.edit_prompt(prompt),
            ModalMessage::ModelSelected(model) => self.select_model(model),
            ModalMessage::Save => self.save(config),
            ModalMessage::Close => self.close(),
        }
    }
}
