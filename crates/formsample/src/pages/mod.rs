// File: src/pages/mod.rs
// Purpose: Maud page templates and the shared layout

use crate::routes::PageRoute;
use maud::{html, Markup, PreEscaped, DOCTYPE};

pub mod form_sample;
pub mod suspense;

pub use form_sample::{form_sample_page, manual_form, validated_form};
pub use suspense::{post_partial_url, post_slot, suspense_page};

const HTMX_SRC: &str = "https://unpkg.com/htmx.org@1.9.12";

/// Document shell with navigation between the pages
pub fn layout(current: Option<PageRoute>, title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(HTMX_SRC) {}
                style { (PreEscaped(STYLE)) }
            }
            body {
                nav {
                    @for route in PageRoute::ALL {
                        @if Some(route) == current {
                            strong { (route.title()) }
                        } @else {
                            a href=(route.path()) { (route.title()) }
                        }
                        " "
                    }
                }
                main { (content) }
            }
        }
    }
}

/// 404 page for unknown paths
pub fn not_found_page(path: &str) -> Markup {
    layout(
        None,
        "Page Not Found",
        html! {
            h1 { "404 Page Not Found" }
            p { "Route '" (path) "' not found" }
            a href="/" { "Go Home" }
        },
    )
}

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 2rem; }
nav { margin-bottom: 1.5rem; }
form { padding: 1.25rem; width: 28rem; border: 1px solid #ddd; border-radius: 4px; box-shadow: 0 1px 3px rgba(0,0,0,.1); }
form label { display: block; margin-top: .75rem; }
form input[type=text], form select { width: 100%; padding: .4rem; }
.error { color: #c53030; margin: .25rem 0; }
.buttons { margin-top: 1rem; display: flex; gap: .5rem; }
"#;
