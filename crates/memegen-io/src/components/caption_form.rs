//! Caption inputs and editor buttons.

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::{LdImage, LdMinus, LdPlus};

/// Props for the [`CaptionForm`] component.
#[derive(Props, Clone, PartialEq)]
pub struct CaptionFormProps {
    /// Current top caption.
    top_text: String,
    /// Current bottom caption.
    bottom_text: String,
    /// Current caption font size, shown between the size buttons.
    font_size_px: u32,
    /// Fired with the full new text on every top-caption keystroke.
    on_top_input: EventHandler<String>,
    /// Fired with the full new text on every bottom-caption keystroke.
    on_bottom_input: EventHandler<String>,
    /// "Get a new meme image" clicked.
    on_new_image: EventHandler<()>,
    /// "Increase font size" clicked.
    on_increase_font: EventHandler<()>,
    /// "Decrease font size" clicked.
    on_decrease_font: EventHandler<()>,
}

/// Two caption inputs plus the image and font-size buttons.
#[component]
pub fn CaptionForm(props: CaptionFormProps) -> Element {
    let on_top_input = props.on_top_input;
    let on_bottom_input = props.on_bottom_input;
    let on_new_image = props.on_new_image;
    let on_increase_font = props.on_increase_font;
    let on_decrease_font = props.on_decrease_font;

    rsx! {
        div { class: "form",
            input {
                r#type: "text",
                class: "form--input",
                name: "topText",
                placeholder: "Top text (DRAG AND DROP TO MOVE TEXT)",
                value: "{props.top_text}",
                oninput: move |evt: FormEvent| on_top_input.call(evt.value()),
            }
            input {
                r#type: "text",
                class: "form--input",
                name: "bottomText",
                placeholder: "Bottom text (DRAG AND DROP TO MOVE TEXT)",
                value: "{props.bottom_text}",
                oninput: move |evt: FormEvent| on_bottom_input.call(evt.value()),
            }
            button {
                class: "form--button",
                onclick: move |_| on_new_image.call(()),
                Icon { width: 18, height: 18, icon: LdImage }
                "Get a new meme image"
            }
            div { class: "form--font",
                button {
                    class: "form--button font-size-button",
                    title: "Increase font size",
                    onclick: move |_| on_increase_font.call(()),
                    Icon { width: 18, height: 18, icon: LdPlus }
                    "Increase Font Size"
                }
                span { class: "form--font-size", "{props.font_size_px}px" }
                button {
                    class: "form--button font-size-button",
                    title: "Decrease font size",
                    onclick: move |_| on_decrease_font.call(()),
                    Icon { width: 18, height: 18, icon: LdMinus }
                    "Decrease Font Size"
                }
            }
        }
    }
}
