//! Chat input: Enter sends, Shift+Enter inserts a newline.

use dioxus::prelude::*;

/// The send gate: nothing goes out while a request is in flight or while
/// the draft is blank.
fn ready_to_send(is_sending: bool, draft: &str) -> bool {
    !is_sending && !draft.trim().is_empty()
}

/// Estimate how many rows the textarea needs based on content
fn compute_rows(text: &str) -> usize {
    let newlines = text.chars().filter(|&c| c == '\n').count();
    // Each visual line is roughly 70 chars at this input width
    let wrap_lines: usize = text
        .lines()
        .map(|line| {
            if line.is_empty() {
                0
            } else {
                (line.len().saturating_sub(1)) / 70
            }
        })
        .sum();
    (newlines + wrap_lines + 1).clamp(1, 8)
}

#[component]
pub fn ChatInput(on_send: EventHandler<String>, is_sending: bool) -> Element {
    let mut text = use_signal(String::new);

    let handle_keydown = move |evt: KeyboardEvent| {
        if evt.key() == Key::Enter && !evt.modifiers().contains(Modifiers::SHIFT) {
            evt.prevent_default();
            if ready_to_send(is_sending, &text()) {
                on_send.call(text());
                text.set(String::new());
            }
        }
    };

    let can_send = ready_to_send(is_sending, &text());
    let rows = compute_rows(&text());
    let rows_str = format!("{rows}");

    let send_class = if can_send {
        "send-button"
    } else {
        "send-button send-button-disabled"
    };

    rsx! {
        div { class: "input-area",
            div { class: "input-shell",
                textarea {
                    class: "input-textarea",
                    placeholder: "Send a message...",
                    value: "{text}",
                    oninput: move |evt| text.set(evt.value()),
                    onkeydown: handle_keydown,
                    disabled: is_sending,
                    rows: "{rows_str}",
                }

                button {
                    class: "{send_class}",
                    disabled: !can_send,
                    title: "Send (Enter)",
                    onclick: move |_| {
                        if ready_to_send(is_sending, &text()) {
                            on_send.call(text());
                            text.set(String::new());
                        }
                    },
                    svg {
                        width: "16",
                        height: "16",
                        view_box: "0 0 24 24",
                        fill: "none",
                        stroke: "currentColor",
                        stroke_width: "2",
                        stroke_linecap: "round",
                        stroke_linejoin: "round",
                        line { x1: "12", y1: "19", x2: "12", y2: "5" }
                        polyline { points: "5 12 12 5 19 12" }
                    }
                }
            }

            p { class: "input-hint", "Enter to send, Shift+Enter for a new line" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_drafts_never_send() {
        assert!(!ready_to_send(false, ""));
        assert!(!ready_to_send(false, "   \n\t "));
        assert!(ready_to_send(false, "hello"));
    }

    #[test]
    fn test_in_flight_request_blocks_sending() {
        assert!(!ready_to_send(true, "hello"));
    }

    #[test]
    fn test_row_estimate() {
        assert_eq!(compute_rows(""), 1);
        assert_eq!(compute_rows("one line"), 1);
        assert_eq!(compute_rows("a\nb\nc"), 3);
        // Long runs clamp at 8 rows
        let long = "x\n".repeat(40);
        assert_eq!(compute_rows(&long), 8);
    }
}
