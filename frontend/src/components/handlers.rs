use super::super::{Model, Msg, PickedFile};
use super::utils::extract_files;
use crate::api;
use gloo_file::{File as GlooFile, ObjectUrl};
use shared::{AutoAdvanceToken, ClassifyResponse, ProfileField, RequestTicket, Screen};
use wasm_bindgen_futures::spawn_local;
use web_sys::{ClipboardEvent, DragEvent, FileList};
use yew::prelude::*;

/// Clicks that arrive after the screen already changed, e.g. because the
/// welcome timer fired first, are dropped.
pub fn handle_next(model: &mut Model, origin: Screen) -> bool {
    match model.session.next_from(origin) {
        Ok(screen) => {
            log::info!("Moved to {}", screen);
            true
        }
        Err(e) => {
            log::debug!("Next blocked on {}: {}", model.session.screen(), e);
            false
        }
    }
}

pub fn handle_prev(model: &mut Model, origin: Screen) -> bool {
    match model.session.prev_from(origin) {
        Ok(screen) => {
            log::info!("Moved back to {}", screen);
            true
        }
        Err(e) => {
            log::debug!("Prev blocked: {}", e);
            false
        }
    }
}

pub fn handle_auto_advance(model: &mut Model, token: AutoAdvanceToken) -> bool {
    model.session.fire_auto_advance(token)
}

pub fn handle_field_changed(model: &mut Model, field: ProfileField, value: String) -> bool {
    model.session.set_field(field, value)
}

pub fn handle_files_picked(model: &mut Model, files: Vec<GlooFile>) -> bool {
    let mut files = files.into_iter();
    let Some(file) = files.next() else {
        return false;
    };
    if files.next().is_some() {
        log::warn!("Several files picked; only {} is used", file.name());
    }

    let picked = PickedFile(file);
    match model
        .session
        .accept_image(picked, |picked| ObjectUrl::from(picked.0.clone()))
    {
        Ok(()) => log::info!("Accepted image for analysis"),
        Err(e) => log::warn!("Rejected image: {}", e),
    }
    true
}

pub fn handle_reset_upload(model: &mut Model) -> bool {
    model.session.reset_upload();
    true
}

pub fn handle_analyze(model: &mut Model, ctx: &Context<Model>) -> bool {
    let ticket = match model.session.begin_classification() {
        Ok(ticket) => ticket,
        Err(e) => {
            gloo_console::warn!(format!("Analyze ignored: {}", e));
            return false;
        }
    };
    let Some(file) = model.session.image().map(|picked| picked.0.clone()) else {
        return true;
    };

    let link = ctx.link().clone();
    spawn_local(async move {
        let outcome = api::classify_image(file).await;
        if let Err(message) = &outcome {
            gloo_console::error!(format!("Classification failed: {}", message));
        }
        link.send_message(Msg::ClassificationDone(ticket, outcome));
    });
    true
}

pub fn handle_classification_done(
    model: &mut Model,
    ticket: RequestTicket,
    outcome: Result<ClassifyResponse, String>,
) -> bool {
    model.session.complete_classification(ticket, outcome)
}

pub fn handle_drop(model: &mut Model, ctx: &Context<Model>, event: DragEvent) -> bool {
    event.prevent_default();
    model.is_dragging = false;

    if let Some(data_transfer) = event.data_transfer() {
        if let Some(file_list) = data_transfer.files() {
            process_file_list(ctx, file_list);
        }
    }

    true
}

/// Pasted images only count while the picture screen is showing.
pub fn handle_paste(model: &mut Model, ctx: &Context<Model>, event: ClipboardEvent) -> bool {
    if model.session.screen() != Screen::PictureInstructions || model.session.is_in_flight() {
        return false;
    }
    if let Some(data_transfer) = event.clipboard_data() {
        if let Some(file_list) = data_transfer.files() {
            if file_list.length() > 0 {
                event.prevent_default();
                process_file_list(ctx, file_list);
                return true;
            }
        }
    }
    false
}

fn process_file_list(ctx: &Context<Model>, file_list: FileList) {
    let files = extract_files(&file_list);
    if !files.is_empty() {
        ctx.link().send_message(Msg::FilesPicked(files));
    }
}
