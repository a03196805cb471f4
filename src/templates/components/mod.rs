use maud::{html, Markup};

pub mod property_card;
pub mod status_banner;

pub use property_card::property_grid;
pub use status_banner::status_banner;

pub fn notice(class: &str, body: Markup) -> Markup {
    html! {
        div class={ "notice " (class) } {
            (body)
        }
    }
}

pub fn error_notice(message: &str) -> Markup {
    notice(
        "notice-error bg-red-700/80 text-red-100",
        html! {
            p class="font-semibold" { "Error:" }
            p class="error-message" { (message) }
        },
    )
}
