//! Static branding header.

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdLaugh;

/// Project page opened by the header link.
const PROJECT_URL: &str = "https://github.com/justinhylee135/MemeGenerator";

/// Logo, title, and a link to the project page.
///
/// The link opens in a new tab without leaking the opener or referrer.
#[component]
pub fn Header() -> Element {
    rsx! {
        header { class: "header",
            Icon { class: "header--image", width: 32, height: 32, icon: LdLaugh }
            h2 { class: "header--title", "Meme Generator" }
            a {
                class: "header--project",
                href: PROJECT_URL,
                target: "_blank",
                rel: "noopener noreferrer",
                "justinhylee135"
            }
        }
    }
}
