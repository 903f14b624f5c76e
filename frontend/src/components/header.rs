use shared::{Screen, TOTAL_SCREENS};
use yew::prelude::*;

/// Renders the application header
pub fn render_header(screen: Screen) -> Html {
    html! {
        <header class="app-header">
            <img class="app-logo" src="/logo.png" alt="Health Aware Logo" />
            <p class="subtitle">
                { format!("Step {} of {}", screen.index() + 1, TOTAL_SCREENS) }
            </p>
        </header>
    }
}
