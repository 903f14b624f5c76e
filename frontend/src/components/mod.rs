pub mod handlers;
pub mod header;
pub mod navigation;
pub mod preview_area;
pub mod profile_form;
pub mod results;
pub mod screens;
pub mod upload_section;
pub mod utils;
