use crate::domain::{HazardKind, PropertyRecord};
use maud::{html, Markup};

/// Badge colours keyed on the free-text severity. Checked from most to least severe.
pub fn risk_badge_class(level: &str) -> &'static str {
    let level = level.to_ascii_lowercase();
    if level.contains("high") || level.contains("extreme") {
        "bg-red-100 text-red-700"
    } else if level.contains("medium") || level.contains("moderate") {
        "bg-yellow-100 text-yellow-700"
    } else if level.contains("low") {
        "bg-green-100 text-green-700"
    } else {
        "bg-gray-100 text-gray-700"
    }
}

pub fn property_card(property: &PropertyRecord) -> Markup {
    let risks = &property.environmental_risks;
    let level = risks.dominant_level();

    html! {
        li class="property-card rounded-lg shadow-lg overflow-hidden" data-address=(property.address) {
            @if let Some(photo) = property.cover_photo() {
                img class="w-full h-40 object-cover" src=(photo) alt={ "Property at " (property.address) };
            }
            div class="p-4" {
                h3 class="property-address text-xl font-semibold mb-1" { (property.address) }
                p class="property-price text-2xl font-bold text-blue-600 mb-2" { (property.formatted_price()) }

                div class="grid grid-cols-3 gap-2 mb-2 text-xs" {
                    div { span class="font-semibold" { "Beds:" } " " (property.bedrooms) }
                    div { span class="font-semibold" { "Baths:" } " " (property.bathrooms) }
                    div { span class="font-semibold" { "Sqft:" } " " (property.sqft) }
                }

                @if !property.agent.is_empty() {
                    div class="property-agent mb-2" {
                        h4 class="text-sm font-semibold" { "Agent:" }
                        p class="text-xs" { (property.agent) }
                        @if !property.agent_phone.is_empty() {
                            p class="text-xs" {
                                a href={ "tel:" (property.agent_phone) } { (property.agent_phone) }
                            }
                        }
                        @if !property.agent_email.is_empty() {
                            p class="text-xs" {
                                a href={ "mailto:" (property.agent_email) } { (property.agent_email) }
                            }
                        }
                    }
                }

                div class="flex items-center justify-between text-xs" {
                    span { "Environmental Risk:" }
                    span class={ "risk-badge px-2 py-0.5 rounded-full font-semibold " (risk_badge_class(level)) } {
                        (level.to_uppercase())
                    }
                }

                @if !risks.summary.is_empty() {
                    p class="risk-summary text-xs mt-2" { (risks.summary) }
                }

                ul class="risk-hazards text-xs mt-1" {
                    @for kind in HazardKind::DOMINANCE_ORDER {
                        @if let Some(detail) = risks.hazard(kind) {
                            li data-hazard=(kind.key()) { (kind.label()) ": " (detail.level) " (" (detail.score) ")" }
                        }
                    }
                }
            }
        }
    }
}

pub fn property_grid(properties: &[PropertyRecord]) -> Markup {
    html! {
        ul class="property-grid grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6" {
            @for property in properties {
                (property_card(property))
            }
        }
    }
}
