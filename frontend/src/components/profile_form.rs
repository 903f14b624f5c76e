use super::super::{Model, Msg};
use shared::ProfileField;
use strum::IntoEnumIterator;
use web_sys::HtmlInputElement;
use yew::prelude::*;

pub fn render_profile_form(model: &Model, ctx: &Context<Model>) -> Html {
    html! {
        <section class="screen screen-profile">
            <h2>{"Let's get your profile"}</h2>
            <form class="profile-form" onsubmit={Callback::from(|e: SubmitEvent| e.prevent_default())}>
                { for ProfileField::iter().map(|field| render_field(model, ctx, field)) }
            </form>
        </section>
    }
}

fn render_field(model: &Model, ctx: &Context<Model>, field: ProfileField) -> Html {
    let profile = model.session.profile();
    let error = profile.error(field);
    let oninput = ctx.link().callback(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::FieldChanged(field, input.value())
    });

    html! {
        <div class={classes!("form-field", error.is_some().then_some("has-error"))} key={field.input_id()}>
            <label for={field.input_id()}>{ field.to_string() }</label>
            <input
                id={field.input_id()}
                type="text"
                placeholder={field.placeholder()}
                value={profile.value(field).to_string()}
                {oninput}
            />
            if let Some(message) = error {
                <p class="field-error">{ message }</p>
            }
        </div>
    }
}
