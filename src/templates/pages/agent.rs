use crate::agent::{ReconciledState, StatusLine};
use crate::domain::LifecycleSignal;
use crate::templates::components::notice;
use crate::templates::{property_grid, status_banner};
use maud::{html, Markup};

/// Fragment for the chat sidebar: status banner, then cards or the narrative.
pub fn agent_panel(state: &ReconciledState, status: &StatusLine, lifecycle: LifecycleSignal) -> Markup {
    html! {
        div class="agent-panel w-full" data-payload=(state.kind.as_str()) {
            (status_banner(status, lifecycle))

            @if !state.properties.is_empty() {
                div class="mb-6 p-4 rounded-lg shadow w-full" {
                    h2 class="text-xl font-semibold text-sky-700 mb-2" { "Found a few properties:" }
                    (property_grid(&state.properties))
                }
            } @else {
                @if let Some(text) = state.narrative() {
                    (notice("agent-narrative", html! {
                        pre class="whitespace-pre-wrap" { (text) }
                    }))
                }
            }
        }
    }
}
