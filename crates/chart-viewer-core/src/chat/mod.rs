//! Chat message parsing and per-message view state.
//!
//! Assistant answers may carry the model's internal reasoning wrapped in
//! `<think>...</think>`. That segment is split off and only shown when the
//! user opens it for that message.

mod emphasis;

pub use emphasis::*;

use crate::models::{ChatLog, ChatMessage, Role};

pub const THINK_OPEN: &str = "<think>";
pub const THINK_CLOSE: &str = "</think>";

pub const SHOW_REASONING_LABEL: &str = "Show internal chain-of-thought";
pub const HIDE_REASONING_LABEL: &str = "Hide internal chain-of-thought";

/// Message content split into the visible answer and the reasoning aside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMessage {
    /// Content with the reasoning segment removed, trimmed.
    pub main_text: String,
    /// Trimmed reasoning; `None` when absent or empty.
    pub chain_text: Option<String>,
}

/// Split the first `<think>...</think>` segment out of `content`.
///
/// An unterminated `<think>` is left in the main text untouched.
pub fn split_reasoning(content: &str) -> ParsedMessage {
    let segment = content.find(THINK_OPEN).and_then(|start| {
        let inner_start = start + THINK_OPEN.len();
        content[inner_start..]
            .find(THINK_CLOSE)
            .map(|len| (start, inner_start, inner_start + len))
    });

    match segment {
        Some((start, inner_start, inner_end)) => {
            let chain = content[inner_start..inner_end].trim();
            let mut main = String::with_capacity(content.len());
            main.push_str(&content[..start]);
            main.push_str(&content[inner_end + THINK_CLOSE.len()..]);
            ParsedMessage {
                main_text: main.trim().to_string(),
                chain_text: (!chain.is_empty()).then(|| chain.to_string()),
            }
        }
        None => ParsedMessage {
            main_text: content.trim().to_string(),
            chain_text: None,
        },
    }
}

/// What a front end draws for one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView<'a> {
    pub role: Role,
    pub main_text: &'a str,
    /// Label of the reasoning toggle, when the message has reasoning.
    pub toggle_label: Option<&'static str>,
    /// Reasoning text; only `Some` while the toggle is open.
    pub reasoning: Option<&'a str>,
}

#[derive(Debug, Clone)]
struct Rendered {
    role: Role,
    parsed: ParsedMessage,
    show_reasoning: bool,
}

/// Parsed chat transcript with independent reasoning toggles.
#[derive(Debug, Clone, Default)]
pub struct ChatTranscript {
    messages: Vec<Rendered>,
}

impl ChatTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a log snapshot; every toggle starts closed.
    pub fn from_log(log: &ChatLog) -> Self {
        let mut transcript = Self::new();
        transcript.sync(log);
        transcript
    }

    /// Parse messages appended to `log` since the last sync.
    ///
    /// Existing toggle state is kept.
    pub fn sync(&mut self, log: &ChatLog) {
        for message in log.messages().iter().skip(self.messages.len()) {
            self.push(message);
        }
    }

    fn push(&mut self, message: &ChatMessage) {
        self.messages.push(Rendered {
            role: message.role,
            parsed: split_reasoning(&message.content),
            show_reasoning: false,
        });
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Flip the reasoning toggle of one message.
    ///
    /// Returns the new state, or `None` if the message has no reasoning.
    pub fn toggle_reasoning(&mut self, index: usize) -> Option<bool> {
        let message = self.messages.get_mut(index)?;
        message.parsed.chain_text.as_ref()?;
        message.show_reasoning = !message.show_reasoning;
        Some(message.show_reasoning)
    }

    /// View of one message.
    pub fn view(&self, index: usize) -> Option<MessageView<'_>> {
        self.messages.get(index).map(|m| {
            let chain = m.parsed.chain_text.as_deref();
            MessageView {
                role: m.role,
                main_text: &m.parsed.main_text,
                toggle_label: chain.map(|_| {
                    if m.show_reasoning {
                        HIDE_REASONING_LABEL
                    } else {
                        SHOW_REASONING_LABEL
                    }
                }),
                reasoning: chain.filter(|_| m.show_reasoning),
            }
        })
    }

    /// Views of every message, in order.
    pub fn views(&self) -> Vec<MessageView<'_>> {
        (0..self.messages.len()).filter_map(|i| self.view(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_reasoning() {
        let parsed = split_reasoning("<think>considered X</think>Final answer: Y");
        assert_eq!(parsed.main_text, "Final answer: Y");
        assert_eq!(parsed.chain_text.as_deref(), Some("considered X"));
    }

    #[test]
    fn test_split_multiline_and_surrounding_text() {
        let parsed = split_reasoning("Intro\n<think>\n step 1\n step 2\n</think>\n Outro ");
        assert_eq!(parsed.main_text, "Intro\n\n Outro");
        assert_eq!(parsed.chain_text.as_deref(), Some("step 1\n step 2"));
    }

    #[test]
    fn test_only_first_segment_split() {
        let parsed = split_reasoning("<think>a</think>mid<think>b</think>");
        assert_eq!(parsed.chain_text.as_deref(), Some("a"));
        assert_eq!(parsed.main_text, "mid<think>b</think>");
    }

    #[test]
    fn test_no_or_unterminated_reasoning() {
        let parsed = split_reasoning("  plain answer ");
        assert_eq!(parsed.main_text, "plain answer");
        assert!(parsed.chain_text.is_none());

        let parsed = split_reasoning("<think>never closed");
        assert_eq!(parsed.main_text, "<think>never closed");
        assert!(parsed.chain_text.is_none());

        let parsed = split_reasoning("<think>  </think>done");
        assert_eq!(parsed.main_text, "done");
        assert!(parsed.chain_text.is_none());
    }

    #[test]
    fn test_reasoning_hidden_until_toggled() {
        let mut log = ChatLog::new();
        log.push(ChatMessage::user("why?"));
        log.push(ChatMessage::assistant("<think>considered X</think>Final answer: Y"));

        let mut transcript = ChatTranscript::from_log(&log);
        let view = transcript.view(1).unwrap();
        assert_eq!(view.main_text, "Final answer: Y");
        assert_eq!(view.reasoning, None);
        assert_eq!(view.toggle_label, Some(SHOW_REASONING_LABEL));

        assert_eq!(transcript.toggle_reasoning(1), Some(true));
        let view = transcript.view(1).unwrap();
        assert_eq!(view.reasoning, Some("considered X"));
        assert_eq!(view.toggle_label, Some(HIDE_REASONING_LABEL));

        assert_eq!(transcript.toggle_reasoning(1), Some(false));
        assert_eq!(transcript.view(1).unwrap().reasoning, None);
    }

    #[test]
    fn test_toggles_are_independent() {
        let mut log = ChatLog::new();
        log.push(ChatMessage::assistant("<think>one</think>A"));
        log.push(ChatMessage::assistant("<think>two</think>B"));

        let mut transcript = ChatTranscript::from_log(&log);
        transcript.toggle_reasoning(0);

        assert_eq!(transcript.view(0).unwrap().reasoning, Some("one"));
        assert_eq!(transcript.view(1).unwrap().reasoning, None);

        // Messages without reasoning have no toggle.
        assert_eq!(transcript.toggle_reasoning(5), None);
        let mut plain = ChatLog::new();
        plain.push(ChatMessage::user("hi"));
        let mut transcript = ChatTranscript::from_log(&plain);
        assert_eq!(transcript.toggle_reasoning(0), None);
        assert_eq!(transcript.view(0).unwrap().toggle_label, None);
    }

    #[test]
    fn test_sync_keeps_toggle_state() {
        let mut log = ChatLog::new();
        log.push(ChatMessage::assistant("<think>x</think>A"));
        let mut transcript = ChatTranscript::from_log(&log);
        transcript.toggle_reasoning(0);

        log.push(ChatMessage::user("next"));
        transcript.sync(&log);

        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.view(0).unwrap().reasoning, Some("x"));
    }
}
