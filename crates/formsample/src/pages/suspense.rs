// File: src/pages/suspense.rs
// Purpose: Fetch page: a post, or a loading placeholder until it resolves

use super::layout;
use crate::fetch::{FetchError, FetchState, Post};
use crate::routes::PageRoute;
use maud::{html, Markup};

/// Partial that waits for the post and replaces the placeholder
pub fn post_partial_url(post_id: u32) -> String {
    format!("/partials/post/{}", post_id)
}

pub fn suspense_page(state: &FetchState<Post>, post_id: u32) -> Markup {
    layout(
        Some(PageRoute::Suspense),
        PageRoute::Suspense.title(),
        post_slot(state, post_id),
    )
}

/// The post area for any fetch state
pub fn post_slot(state: &FetchState<Post>, post_id: u32) -> Markup {
    match state {
        FetchState::Pending => placeholder(post_id),
        FetchState::Ready(post) => post_view(post),
        FetchState::Failed(err) => fetch_failed(err, post_id),
    }
}

fn placeholder(post_id: u32) -> Markup {
    html! {
        div class="post" hx-get=(post_partial_url(post_id)) hx-trigger="load" hx-swap="outerHTML" {
            "loading..."
        }
    }
}

fn post_view(post: &Post) -> Markup {
    html! {
        div class="post" {
            h3 { (post.title) }
            p { (post.body) }
        }
    }
}

fn fetch_failed(err: &FetchError, post_id: u32) -> Markup {
    let retry = format!("{}?refresh=true", post_partial_url(post_id));
    html! {
        div class="post" {
            p class="error" { "Could not load the post: " (err.to_string()) }
            button type="button" hx-get=(retry) hx-target="closest .post" hx-swap="outerHTML" {
                "Retry"
            }
        }
    }
}
