use super::super::{Model, Msg};
use super::preview_area::render_preview_area;
use super::profile_form::render_profile_form;
use super::results::render_results;
use super::upload_section::render_upload_section;
use super::utils::render_error_message;
use shared::Screen;
use yew::prelude::*;

/// Only the current screen is mounted, so inactive screens hold no inputs
/// or timers.
pub fn render_active_screen(model: &Model, ctx: &Context<Model>) -> Html {
    match model.session.screen() {
        Screen::Welcome => render_welcome(),
        Screen::Begin => render_begin(ctx),
        Screen::Profile => render_profile_form(model, ctx),
        Screen::DataInfo => render_data_info(model),
        Screen::PictureInstructions => render_picture_instructions(model, ctx),
        Screen::Loading => render_loading(model),
        Screen::Results => render_results(model),
    }
}

fn render_welcome() -> Html {
    html! {
        <section class="screen screen-welcome">
            <div class="welcome-circle">
                <h1>{"Welcome!"}</h1>
            </div>
        </section>
    }
}

fn render_begin(ctx: &Context<Model>) -> Html {
    html! {
        <section class="screen screen-begin">
            <button class="begin-btn" onclick={ctx.link().callback(|_| Msg::Next(Screen::Begin))}>
                {"Begin"}
            </button>
        </section>
    }
}

fn render_data_info(model: &Model) -> Html {
    let name = model.session.profile().display_name().to_string();
    html! {
        <section class="screen screen-data-info">
            <h2>{"We care about your data,"}</h2>
            <h2>{ format!("{}!", name) }</h2>
            <ul class="data-points">
                <li class="data-point data-point-yes">
                    <i class="fa-solid fa-check"></i>
                    <p>{"We'll use your info to better understand your health concerns and give an accurate suggestion on seeing a doctor."}</p>
                </li>
                <li class="data-point data-point-no">
                    <i class="fa-solid fa-xmark"></i>
                    <p>{"HealthAware will not collect or store any personal data after the test, all your information stays on your device."}</p>
                </li>
            </ul>
        </section>
    }
}

fn render_picture_instructions(model: &Model, ctx: &Context<Model>) -> Html {
    html! {
        <section class="screen screen-picture">
            <h2>{"Time for a picture!"}</h2>
            <ul class="instructions">
                <li><i class="fa-solid fa-chevron-right"></i>{" It must be taken in a bright room."}</li>
                <li><i class="fa-solid fa-chevron-right"></i>{" The image must be clear, showing the area of concern."}</li>
            </ul>
            { render_error_message(model.session.banner()) }
            { render_upload_section(model, ctx) }
            { render_preview_area(model, ctx) }
        </section>
    }
}

fn render_loading(model: &Model) -> Html {
    if !model.session.is_in_flight() {
        return html! {
            <section class="screen screen-loading">
                <h2>{"Nothing to analyze yet."}</h2>
                <p>{"Go back to take or upload a picture, then press Analyze."}</p>
            </section>
        };
    }

    html! {
        <section class="screen screen-loading">
            <h2>{"We are loading and processing your information!"}</h2>
            <div class="spinner">
                <i class="fa-solid fa-spinner fa-spin fa-2x"></i>
            </div>
        </section>
    }
}
