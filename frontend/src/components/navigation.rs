use super::super::{Model, Msg};
use super::utils::debounce;
use shared::Screen;
use strum::IntoEnumIterator;
use yew::prelude::*;

pub fn render_navigation(model: &Model, ctx: &Context<Model>) -> Html {
    let session = &model.session;
    let current = session.screen();
    let link = ctx.link().clone();

    html! {
        <nav class="wizard-nav">
            <button
                class="nav-btn"
                title="Back"
                disabled={!session.can_go_prev()}
                onclick={link.callback(move |_| Msg::Prev(current))}
            >
                <i class="fa-solid fa-chevron-left"></i>
            </button>

            <div class="progress-dots">
                { for Screen::iter().map(|screen| html! {
                    <span
                        key={screen.to_string()}
                        class={classes!("dot", (screen == current).then_some("active"))}
                    ></span>
                })}
            </div>

            <button
                class="nav-btn"
                title={next_hint(model)}
                disabled={!session.can_go_next()}
                onclick={debounce(150, {
                    let link = link.clone();
                    move || link.send_message(Msg::Next(current))
                })}
            >
                <i class="fa-solid fa-chevron-right"></i>
            </button>
        </nav>
    }
}

fn next_hint(model: &Model) -> String {
    match model.session.profile().first_incomplete() {
        Some(field) if model.session.screen() == Screen::Profile => {
            format!("Complete {} to continue", field)
        }
        _ => "Next".to_string(),
    }
}
