//! Sidebar components: input tabs, style options and instructions.
//!
//! Everything is drawn from the panel state JSON pushed by the native side;
//! controls only send actions and wait for the next push.

use dioxus::prelude::*;
use serde_json::Value;

use crate::bridge;

fn str_at<'a>(state: &'a Value, pointer: &str) -> &'a str {
    state.pointer(pointer).and_then(Value::as_str).unwrap_or("")
}

fn choices(state: &Value, key: &str) -> Vec<(Value, String)> {
    state
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| {
                    let label = item.get("label")?.as_str()?.to_owned();
                    Some((item.get("value")?.clone(), label))
                })
                .collect()
        })
        .unwrap_or_default()
}

/// The whole panel.
#[component]
pub fn Sidebar(state: Value) -> Element {
    let title = str_at(&state, "/title").to_owned();
    let error = state
        .get("error")
        .and_then(Value::as_str)
        .map(str::to_owned);

    rsx! {
        div { class: "side-panel",
            h1 { class: "title", "{title}" }
            InputTabs { state: state.clone() }
            if let Some(message) = error {
                div { class: "error", "{message}" }
            }
            StyleOptions { state: state.clone() }
            Instructions { text: str_at(&state, "/instructions").to_owned() }
        }
    }
}

/// "Upload PDB" / "Enter PDB ID" tabs and the active tab's body.
///
/// Owns the typed identifier so it survives switching tabs.
#[component]
fn InputTabs(state: Value) -> Element {
    let id_text = use_signal(String::new);
    let active = state.get("active_tab").cloned().unwrap_or(Value::Null);
    let tabs: Vec<(Value, String, bool)> = choices(&state, "tabs")
        .into_iter()
        .map(|(value, label)| {
            let is_active = value == active;
            (value, label, is_active)
        })
        .collect();
    let upload_active = active.as_str() == Some("upload");

    rsx! {
        div { class: "tabs",
            for (value, label, is_active) in tabs {
                button {
                    class: if is_active { "tab active" } else { "tab" },
                    onclick: move |_| bridge::send_select_tab(&value),
                    "{label}"
                }
            }
        }
        div { class: "tab-body",
            if upload_active {
                label { class: "field-label", "Upload a PDB file" }
                button {
                    class: "browse",
                    onclick: move |_| bridge::send_open_file(),
                    "Browse files (.pdb)"
                }
            } else {
                IdInput { text: id_text }
            }
        }
    }
}

/// Identifier text box, submitted on Enter.
#[component]
fn IdInput(text: Signal<String>) -> Element {
    let mut text = text;

    rsx! {
        label { class: "field-label", "Enter PDB ID (e.g., 1AKE)" }
        input {
            r#type: "text",
            class: "text-input",
            value: "{text}",
            oninput: move |evt: Event<FormData>| text.set(evt.value()),
            onkeydown: move |evt: Event<KeyboardData>| {
                if evt.key() == Key::Enter {
                    bridge::send_fetch_id(&text.read());
                }
            },
        }
    }
}

/// Style selector, color-mode radio and the custom color picker.
#[component]
fn StyleOptions(state: Value) -> Element {
    let style = str_at(&state, "/controls/style").to_owned();
    let mode = state
        .pointer("/controls/color_mode")
        .cloned()
        .unwrap_or(Value::Null);
    let color = str_at(&state, "/controls/custom_color").to_ascii_lowercase();
    let show_picker = state
        .get("show_color_picker")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let styles = choices(&state, "styles");
    let modes: Vec<(Value, String, bool)> = choices(&state, "color_modes")
        .into_iter()
        .map(|(value, label)| {
            let checked = value == mode;
            (value, label, checked)
        })
        .collect();

    rsx! {
        details { open: true,
            summary { class: "section-header", "Style Options" }
            div { class: "section-body",
                div { class: "field-row",
                    label { class: "field-label", "Select Style" }
                    select {
                        onchange: move |evt: Event<FormData>| {
                            bridge::send_set_style(&evt.value());
                        },
                        for (value, label) in styles {
                            option {
                                value: value.as_str().unwrap_or_default().to_owned(),
                                selected: value.as_str() == Some(style.as_str()),
                                "{label}"
                            }
                        }
                    }
                }
                div { class: "field-row",
                    label { class: "field-label", "Color Option" }
                    div { class: "radio-group",
                        for (value, label, checked) in modes {
                            label { class: "radio",
                                input {
                                    r#type: "radio",
                                    name: "color-mode",
                                    checked,
                                    onchange: move |_| bridge::send_set_color_mode(&value),
                                }
                                "{label}"
                            }
                        }
                    }
                }
                if show_picker {
                    div { class: "field-row",
                        label { class: "field-label", "Select Color" }
                        input {
                            r#type: "color",
                            value: "{color}",
                            oninput: move |evt: Event<FormData>| {
                                bridge::send_set_custom_color(&evt.value());
                            },
                        }
                    }
                }
            }
        }
    }
}

/// Static help text. Headings start with `## `, bullets with `- `.
#[component]
fn Instructions(text: String) -> Element {
    let lines: Vec<(String, &'static str)> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let trimmed = line.trim();
            if let Some(heading) = trimmed.strip_prefix("## ") {
                (heading.to_owned(), "instructions-heading")
            } else if let Some(item) = trimmed.strip_prefix("- ") {
                (item.to_owned(), "instructions-bullet")
            } else {
                (trimmed.to_owned(), "instructions-step")
            }
        })
        .collect();

    rsx! {
        div { class: "instructions",
            for (line, class) in lines {
                div { class: "{class}", "{line}" }
            }
        }
    }
}
