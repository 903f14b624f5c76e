mod api;
mod components;

use components::handlers;
use components::header::render_header;
use components::navigation::render_navigation;
use components::screens::render_active_screen;
use gloo_events::EventListener;
use gloo_file::{File as GlooFile, ObjectUrl};
use gloo_timers::callback::Timeout;
use shared::{
    AutoAdvanceToken, ClassifyResponse, ImageSource, IntakeSession, ProfileField, RequestTicket,
    Screen, AUTO_ADVANCE_DELAY_MS,
};
use wasm_bindgen::JsCast;
use web_sys::{ClipboardEvent, DragEvent};
use yew::prelude::*;

// Models
#[derive(Clone)]
struct PickedFile(GlooFile);

impl ImageSource for PickedFile {
    fn file_name(&self) -> String {
        self.0.name()
    }

    fn mime_type(&self) -> String {
        self.0.raw_mime_type()
    }

    fn byte_len(&self) -> u64 {
        self.0.size()
    }
}

// Yew msg components
enum Msg {
    // Navigation, tagged with the screen the click happened on
    Next(Screen),
    Prev(Screen),
    AutoAdvance(AutoAdvanceToken),

    // Profile
    FieldChanged(ProfileField, String),

    // Upload and analysis
    FilesPicked(Vec<GlooFile>),
    ResetUpload,
    Analyze,
    ClassificationDone(RequestTicket, Result<ClassifyResponse, String>),

    // Input events
    SetDragging(bool),
    HandleDrop(DragEvent),
    HandlePaste(ClipboardEvent),
}

// Main component
struct Model {
    session: IntakeSession<PickedFile, ObjectUrl>,
    welcome_timer: Option<(AutoAdvanceToken, Timeout)>,
    paste_listener: Option<EventListener>,
    is_dragging: bool,
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let mut model = Self {
            session: IntakeSession::new(),
            welcome_timer: None,
            paste_listener: None,
            is_dragging: false,
        };

        if let Some(window) = web_sys::window() {
            let link = ctx.link().clone();
            let listener = EventListener::new(&window, "paste", move |event| {
                if let Some(clipboard_event) = event.dyn_ref::<ClipboardEvent>() {
                    link.send_message(Msg::HandlePaste(clipboard_event.clone()));
                }
            });
            model.paste_listener = Some(listener);
        }

        model.sync_welcome_timer(ctx);
        model
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let changed = match msg {
            Msg::Next(origin) => handlers::handle_next(self, origin),
            Msg::Prev(origin) => handlers::handle_prev(self, origin),
            Msg::AutoAdvance(token) => handlers::handle_auto_advance(self, token),

            Msg::FieldChanged(field, value) => handlers::handle_field_changed(self, field, value),

            Msg::FilesPicked(files) => handlers::handle_files_picked(self, files),
            Msg::ResetUpload => handlers::handle_reset_upload(self),
            Msg::Analyze => handlers::handle_analyze(self, ctx),
            Msg::ClassificationDone(ticket, outcome) => {
                handlers::handle_classification_done(self, ticket, outcome)
            }

            Msg::SetDragging(is_dragging) => {
                self.is_dragging = is_dragging;
                true
            }
            Msg::HandleDrop(event) => handlers::handle_drop(self, ctx, event),
            Msg::HandlePaste(event) => handlers::handle_paste(self, ctx, event),
        };

        self.sync_welcome_timer(ctx);
        changed
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="container">
                { render_header(self.session.screen()) }

                <main class="main-content">
                    { render_active_screen(self, ctx) }
                </main>

                { render_navigation(self, ctx) }

                <footer class="app-footer">
                    <p>{"HealthAware | For educational purposes only"}</p>
                </footer>
            </div>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        if let Some((_, timeout)) = self.welcome_timer.take() {
            timeout.cancel();
        }
        self.paste_listener = None;
        self.session.shutdown();
    }
}

impl Model {
    /// Keeps exactly one welcome timer running while the session has one
    /// armed, and none otherwise. Dropping a `Timeout` cancels it.
    fn sync_welcome_timer(&mut self, ctx: &Context<Self>) {
        let wanted = self.session.auto_advance_token();
        let running = self.welcome_timer.as_ref().map(|(token, _)| *token);
        if wanted == running {
            return;
        }

        if let Some((_, timeout)) = self.welcome_timer.take() {
            timeout.cancel();
        }

        if let Some(token) = wanted {
            let link = ctx.link().clone();
            let timeout = Timeout::new(AUTO_ADVANCE_DELAY_MS, move || {
                link.send_message(Msg::AutoAdvance(token));
            });
            self.welcome_timer = Some((token, timeout));
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<Model>::new().render();
}
