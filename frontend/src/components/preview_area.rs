use super::super::{Model, Msg};
use super::utils::debounce;
use yew::prelude::*;

pub fn render_preview_area(model: &Model, ctx: &Context<Model>) -> Html {
    let Some(url) = model.session.preview() else {
        return html! {};
    };
    let file_name = model
        .session
        .image()
        .map(|picked| picked.0.name())
        .unwrap_or_default();

    let link = ctx.link().clone();

    html! {
        <div id="preview-container">
            <img id="actual-image-preview" src={url.to_string()} alt={file_name.clone()} />
            <div class="button-container">
                <button
                    id="clear-btn"
                    class="analyze-btn"
                    style="background-color: var(--clear-color);"
                    onclick={debounce(300, {
                        let link = link.clone();
                        move || link.send_message(Msg::ResetUpload)
                    })}
                >
                    <i class="fa-solid fa-trash"></i>{" Remove"}
                </button>
                <button
                    class="analyze-btn"
                    onclick={debounce(300, {
                        let link = link.clone();
                        move || link.send_message(Msg::Analyze)
                    })}
                    disabled={!model.session.can_submit()}
                >
                    { render_analyze_button_content(model, &file_name) }
                </button>
            </div>
        </div>
    }
}

fn render_analyze_button_content(model: &Model, filename: &str) -> Html {
    if model.session.is_in_flight() {
        return html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Analyzing..."}</> };
    }

    let display_name = if filename.chars().count() > 20 {
        format!("{}...", filename.chars().take(17).collect::<String>())
    } else {
        filename.to_string()
    };

    html! { <><i class="fa-solid fa-magnifying-glass"></i>{ format!(" Analyze \"{}\"", display_name) }</> }
}
