use dioxus::prelude::*;

/// Circular spinner, sized in pixels
#[component]
pub fn Spinner(size: u32) -> Element {
    rsx! {
        svg {
            class: "spinner",
            width: "{size}",
            height: "{size}",
            view_box: "0 0 24 24",
            fill: "none",
            stroke: "currentColor",
            stroke_width: "2.5",
            stroke_linecap: "round",
            circle { cx: "12", cy: "12", r: "9", opacity: "0.2" }
            path { d: "M21 12a9 9 0 0 0-9-9" }
        }
    }
}
