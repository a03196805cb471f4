// templates/pages/search.rs

use crate::domain::PropertyRecord;
use crate::templates::components::{error_notice, notice};
use crate::templates::{desktop_layout, property_grid};
use maud::{html, Markup};

#[derive(Debug, Default)]
pub enum SearchOutcome {
    #[default]
    NotSearched,
    Found(Vec<PropertyRecord>),
    Failed(String),
}

#[derive(Debug, Default)]
pub struct SearchVm {
    pub query: String,
    pub outcome: SearchOutcome,
}

pub fn search_page(vm: &SearchVm) -> Markup {
    desktop_layout(
        "Search",
        html! {
            header class="text-center my-8" {
                h1 class="text-4xl font-bold text-sky-400" { "Property Inquiry Assistant" }
                p class="text-slate-300 mt-2" { "Enter your query below to find relevant properties." }
            }

            form class="search-form max-w-2xl mx-auto p-6 rounded-lg shadow-xl" method="post" action="/search" {
                label class="sr-only" for="query" { "Query" }
                textarea
                    id="query"
                    name="query"
                    rows="4"
                    placeholder="e.g., 'Show me properties in Seattle with at least 3 bedrooms'"
                    class="w-full p-3 rounded-md"
                { (vm.query) }
                button type="submit" class="w-full bg-sky-600 text-white font-semibold py-3 px-4 rounded-md" {
                    "Send Query"
                }
            }

            @match &vm.outcome {
                SearchOutcome::NotSearched => {}
                SearchOutcome::Failed(message) => {
                    div class="mt-6 max-w-2xl mx-auto" { (error_notice(message)) }
                }
                SearchOutcome::Found(properties) => {
                    @if properties.is_empty() {
                        div class="mt-6 max-w-2xl mx-auto text-center" {
                            (notice("notice-empty", html! {
                                p { "No properties found for your query, or the assistant didn't return any." }
                            }))
                        }
                    } @else {
                        section class="mt-8" {
                            h2 class="text-2xl font-semibold text-sky-400 mb-4 text-center" { "Available Properties:" }
                            (property_grid(properties))
                        }
                    }
                }
            }
        },
    )
}
