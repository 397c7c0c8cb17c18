//! Plain-text layout of screens, menus and the chat transcript.

use std::fmt::Write;

use chart_viewer_assistant::ModelMode;
use chart_viewer_core::chat::to_ansi;
use chart_viewer_core::{ChatTranscript, MenuEntry, Role, ScreenView, Section};

pub fn render_screen(view: &ScreenView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.title);
    let _ = writeln!(out, "{}", "=".repeat(view.title.len()));
    for section in &view.sections {
        // Single-section screens reuse the title as heading.
        if view.sections.len() > 1 || section.heading != view.title {
            let _ = writeln!(out, "\n{}\n{}", section.heading, "-".repeat(section.heading.len()));
        }
        render_section(&mut out, section);
    }
    out
}

fn render_section(out: &mut String, section: &Section) {
    if let Some(message) = section.empty_message {
        let _ = writeln!(out, "{}", message);
        return;
    }
    for (i, card) in section.cards.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        for field in &card.fields {
            let _ = writeln!(out, "  {}: {}", field.label, field.value);
        }
    }
}

/// Numbered dropdown menu.
pub fn render_menu(menu: &[MenuEntry]) -> String {
    menu.iter()
        .enumerate()
        .map(|(i, entry)| format!("  {}) {}\n", i + 1, entry.label))
        .collect()
}

/// The assistant panel: model selector, messages and pending indicator.
pub fn render_chat(transcript: &ChatTranscript, mode: ModelMode, pending: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "AI Assistant [{} ({})]", mode.label(), mode.model_name());

    for (i, message) in transcript.views().iter().enumerate() {
        let speaker = match message.role {
            Role::User => "You",
            Role::Assistant => "Assistant",
        };
        let _ = writeln!(out, "{:>3}. {}: {}", i + 1, speaker, to_ansi(message.main_text));
        if let Some(label) = message.toggle_label {
            let _ = writeln!(out, "     [think {}] {}", i + 1, label);
        }
        if let Some(reasoning) = message.reasoning {
            for line in reasoning.lines() {
                let _ = writeln!(out, "     | {}", to_ansi(line));
            }
        }
    }

    if pending {
        let _ = writeln!(out, "     Assistant is thinking...");
    }
    out
}
