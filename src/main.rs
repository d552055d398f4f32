mod agent;
mod canvas;
mod client;
mod config;
mod drag;
mod editor;
mod error;
mod geometry;
mod gesture;
mod graph;
mod layout;
mod link;
mod panel;
mod scene;
mod store;
mod workflow;

use iced::widget::{canvas as canvas_widget, operation, row};
use iced::{event, keyboard, Element, Length, Subscription, Task, Theme};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use agent::{AgentConfig, AgentModal, ModalMessage};
use client::BackendClient;
use config::Config;
use editor::{Editor, EditorEvent, EditorMessage};
use error::RunError;
use graph::Role;
use workflow::{RunResponse, Workflow};

fn main() -> iced::Result {
    let (config, config_error) = match Config::load() {
        Ok(config) => (config.with_env_overrides(), None),
        Err(err) => (Config::default().with_env_overrides(), Some(err)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with_target(false)
        .init();

    if let Some(err) = config_error {
        warn!(%err, "using default configuration");
    }

    let window = config.window;
    iced::application(move || (Toolwire::new(config.clone()), Task::none()), update, view)
        .title("Toolwire")
        .subscription(subscription)
        .theme(theme)
        .window_size((window.width, window.height))
        .antialiasing(true)
        .run()
}

fn theme(_state: &Toolwire) -> Theme {
    Theme::Dark
}

#[derive(Debug, Clone)]
pub enum Message {
    Editor(EditorMessage),
    SelectTool(Role),
    Disconnect,
    QueryChanged(String),
    Run,
    RunFinished(Result<RunResponse, RunError>),
    Modal(ModalMessage),
}

pub struct Toolwire {
    editor: Editor,
    agent: AgentConfig,
    modal: AgentModal,
    workflow: Workflow,
    query: String,
    client: BackendClient,
    config: Config,
}

impl Toolwire {
    fn new(config: Config) -> Self {
        Self {
            editor: Editor::new(layout::initial_graph(), &config),
            agent: AgentConfig::default(),
            modal: AgentModal::default(),
            workflow: Workflow::default(),
            query: String::new(),
            client: BackendClient::new(config.backend_url.clone()),
            config,
        }
    }
}

fn update(state: &mut Toolwire, message: Message) -> Task<Message> {
    match message {
        Message::Editor(msg) => {
            if let Some(EditorEvent::AgentClicked) = state.editor.update(msg) {
                state.modal.open(&state.agent);
                return operation::focus(panel::AGENT_PROMPT_ID);
            }
        }
        Message::SelectTool(tool) => state.editor.select_tool(tool),
        Message::Disconnect => state.editor.disconnect(),
        Message::QueryChanged(query) => state.query = query,
        Message::Run => {
            let tool = state
                .editor
                .selected_tool()
                .and_then(|role| state.config.tool(role));
            match state.workflow.begin_run(&state.query, tool, &state.agent) {
                Ok(request) => {
                    let client = state.client.clone();
                    return Task::perform(
                        async move { client.run(&request).await },
                        Message::RunFinished,
                    );
                }
                Err(err) => warn!(%err, endpoint = state.client.endpoint(), "run not started"),
            }
        }
        Message::RunFinished(result) => state.workflow.finish_run(result),
        Message::Modal(msg) => state.modal.update(msg, &mut state.agent),
    }
    Task::none()
}

fn view(state: &Toolwire) -> Element<'_, Message> {
    let content: Element<'_, Message> = row![
        panel::sidebar(state),
        canvas_widget(&state.editor)
            .width(Length::Fill)
            .height(Length::Fill),
    ]
    .into();

    match state.modal.draft() {
        Some(draft) => panel::with_agent_modal(content, draft),
        None => content,
    }
}

fn subscription(state: &Toolwire) -> Subscription<Message> {
    if !state.modal.is_open() {
        return Subscription::none();
    }
    event::listen_with(|event, _status, _window| match event {
        iced::Event::Keyboard(keyboard::Event::KeyPressed {
            key: keyboard::Key::Named(keyboard::key::Named::Escape),
            ..
        }) => Some(Message::Modal(ModalMessage::Close)),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::{Point, Size, Vector};

    fn click(state: &mut Toolwire, position: Point) -> Task<Message> {
        let canvas = Size::new(1000.0, 700.0);
        update(state, Message::Editor(EditorMessage::PointerPressed { position, canvas }));
        update(
            state,
            Message::Editor(EditorMessage::PointerReleased {
                position: Some(position),
            }),
        )
    }

    #[test]
    fn agent_click_opens_dialog_with_prompt_focused() {
        let mut state = Toolwire::new(Config::default());
        let agent = state.editor.graph().agent().unwrap().position + Vector::new(60.0, 40.0);

        let task = click(&mut state, agent);
        assert!(state.modal.is_open());
        assert_eq!(task.units(), 1);
    }

    #[test]
    fn tool_click_returns_no_task() {
        let mut state = Toolwire::new(Config::default());
        let tool = state.editor.graph().find_role(Role::ToolA).unwrap().position
            + Vector::new(60.0, 40.0);

        let task = click(&mut state, tool);
        assert!(!state.modal.is_open());
        assert_eq!(task.units(), 0);
    }
}
