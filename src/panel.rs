use iced::widget::{
    button, center, column, container, mouse_area, opaque, pick_list, row, scrollable, stack, text,
    text_input,
};
use iced::{Border, Color, Element, Length, Theme};

use crate::agent::{AgentDraft, ModalMessage, Model};
use crate::graph::Role;
use crate::workflow::Output;
use crate::{Message, Toolwire};

const SIDEBAR_WIDTH: f32 = 320.0;

/// Focused when the agent dialog opens.
pub const AGENT_PROMPT_ID: &str = "agent-prompt";

pub fn sidebar(state: &Toolwire) -> Element<'_, Message> {
    let editor = &state.editor;

    let header = column![text("Tools").size(18)].spacing(8);
    let selector = Role::TOOLS.iter().fold(header, |col, &tool| {
        let style = if editor.scene().is_selected(tool) {
            button::primary
        } else {
            button::secondary
        };
        col.push(
            button(text(editor.label(tool).to_string()))
                .width(Length::Fill)
                .style(style)
                .on_press(Message::SelectTool(tool)),
        )
    });

    let status = editor.status();
    let dot_color = if status.is_connected() {
        Color::from_rgb(0.35, 0.75, 0.45)
    } else {
        Color::from_rgb(0.85, 0.35, 0.35)
    };
    let status_row = row![text("●").color(dot_color), text(status.text().to_string())].spacing(8);

    let disconnect = button(text("Disconnect"))
        .style(button::danger)
        .on_press_maybe(editor.is_connected().then_some(Message::Disconnect));

    let running = state.workflow.is_running();
    let query = text_input("Ask something...", &state.query)
        .on_input(Message::QueryChanged)
        .on_submit(Message::Run);
    let run = button(text(if running { "Running..." } else { "Run Workflow" }))
        .width(Length::Fill)
        .style(button::success)
        .on_press_maybe((!running).then_some(Message::Run));

    column![
        selector,
        status_row,
        disconnect,
        text("Query").size(18),
        query,
        run,
        output_box(state.workflow.output()),
    ]
    .spacing(14)
    .padding(16)
    .width(SIDEBAR_WIDTH)
    .into()
}

fn output_box(output: &Output) -> Element<'_, Message> {
    let accent = match output {
        Output::Empty => Color::from_rgb(0.22, 0.22, 0.26),
        Output::Loading(_) => Color::from_rgb(0.50, 0.70, 0.80),
        Output::Success(_) => Color::from_rgb(0.35, 0.75, 0.45),
        Output::Error(_) => Color::from_rgb(0.85, 0.35, 0.35),
    };

    container(scrollable(text(output.text().to_string()).size(13)))
        .padding(10)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(move |_theme: &Theme| container::Style {
            background: Some(Color::from_rgb(0.09, 0.09, 0.11).into()),
            border: Border {
                color: accent,
                width: 1.0,
                radius: 6.0.into(),
            },
            ..container::Style::default()
        })
        .into()
}

/// Lay the agent settings dialog over `base`. Clicking the dimmed
/// background closes it.
pub fn with_agent_modal<'a>(
    base: Element<'a, Message>,
    draft: &'a AgentDraft,
) -> Element<'a, Message> {
    let dialog = container(
        column![
            row![
                text("Agent Settings").size(20).width(Length::Fill),
                button(text("×"))
                    .style(button::text)
                    .on_press(Message::Modal(ModalMessage::Close)),
            ],
            text("System prompt"),
            text_input("You are a helpful assistant.", &draft.prompt)
                .id(AGENT_PROMPT_ID)
                .on_input(|prompt| Message::Modal(ModalMessage::PromptChanged(prompt))),
            text("Model"),
            pick_list(Model::ALL, Some(draft.model), |model| {
                Message::Modal(ModalMessage::ModelSelected(model))
            })
            .width(Length::Fill),
            row![
                button(text("Cancel"))
                    .style(button::secondary)
                    .on_press(Message::Modal(ModalMessage::Close)),
                button(text("Save"))
                    .style(button::primary)
                    .on_press(Message::Modal(ModalMessage::Save)),
            ]
            .spacing(8),
        ]
        .spacing(10),
    )
    .width(440.0)
    .padding(20)
    .style(container::rounded_box);

    stack![
        base,
        opaque(
            mouse_area(center(opaque(dialog)).style(|_theme: &Theme| container::Style {
                background: Some(Color { a: 0.7, ..Color::BLACK }.into()),
                ..container::Style::default()
            }))
            .on_press(Message::Modal(ModalMessage::Close))
        )
    ]
    .into()
}
