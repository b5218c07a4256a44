//! Landing page markup.
//!
//! Rendered with maud; echoed user input is escaped by the template engine.

use maud::{DOCTYPE, Markup, html};

use crate::types::Resolution;

const TITLE: &str = "Free Money Finder – Search for Unclaimed Cash in Your Name";

const STEPS: &[(&str, &str)] = &[
    (
        "Step 1: Search",
        "Enter your name and ZIP to scan official databases for unclaimed money.",
    ),
    (
        "Step 2: Discover",
        "We point you to the official unclaimed-property program for your state.",
    ),
    (
        "Step 3: Claim",
        "File your claim directly with the state. It's always free.",
    ),
];

/// What the page shows for one request
#[derive(Debug, Default, Clone)]
pub struct PageView {
    pub zip: String,
    pub full_name: String,
    pub result: Option<Resolution>,
    /// "City, ST" for the searched zip, when known
    pub location: Option<String>,
}

/// Render the full landing page.
pub fn render_page(view: &PageView) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (TITLE) }
            }
            body {
                header {
                    h1 { "💸 Free Money Finder" }
                    p {
                        "Most Americans have unclaimed cash waiting for them. Use our search tool to "
                        "find out if you're owed money. It's fast, free, and 100% secure."
                    }
                }
                main {
                    h2 { "Search for Unclaimed Funds" }
                    form method="get" action="/search" {
                        label for="fullName" { "Full Name" }
                        input id="fullName" name="full_name" type="text"
                            placeholder="Enter your full name" value=(view.full_name) required;
                        label for="zipCode" { "ZIP Code" }
                        input id="zipCode" name="zip" type="text"
                            placeholder="Enter your ZIP code" value=(view.zip) required;
                        button type="submit" { "🔍 Search Now" }
                    }
                    @if let Some(result) = &view.result {
                        (render_result(result, view.location.as_deref()))
                    }
                }
                section {
                    h3 { "How It Works" }
                    @for (heading, text) in STEPS {
                        div {
                            h4 { (heading) }
                            p { (text) }
                        }
                    }
                }
            }
        }
    }
}

fn render_result(result: &Resolution, location: Option<&str>) -> Markup {
    html! {
        div class="result" {
            @if result.matched {
                p { "We found a site for your state:" }
            } @else {
                p { "We found a site that can help:" }
            }
            @if let Some(location) = location {
                p class="location" { (location) }
            }
            a href=(result.url) target="_blank" rel="noopener noreferrer" {
                "Click here to check your unclaimed funds"
            }
        }
    }
}
