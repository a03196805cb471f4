use crate::agent::StatusLine;
use crate::domain::LifecycleSignal;
use maud::{html, Markup};

pub fn status_banner(status: &StatusLine, lifecycle: LifecycleSignal) -> Markup {
    html! {
        div class={ "status-banner status-" (lifecycle.as_str()) } role="status" {
            @if lifecycle == LifecycleSignal::Pending {
                span class="spinner" aria-hidden="true" {}
            }
            p class="status-headline" { (status.headline) }
            @if let Some(detail) = &status.detail {
                p class="status-detail text-xs" { (detail) }
            }
        }
    }
}
