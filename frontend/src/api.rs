use gloo_file::File as GlooFile;
use gloo_net::http::Request;
use shared::api::{CLASSIFY_ENDPOINT, UPLOAD_FIELD};
use shared::{ClassifyResponse, ErrorBody};
use web_sys::FormData;

/// Posts the picked image and turns every failure into one banner line.
pub async fn classify_image(file: GlooFile) -> Result<ClassifyResponse, String> {
    let form_data =
        FormData::new().map_err(|e| format!("Could not build upload form: {:?}", e))?;
    form_data
        .append_with_blob_and_filename(UPLOAD_FIELD, file.as_ref(), &file.name())
        .map_err(|e| format!("Could not attach image: {:?}", e))?;

    let request = Request::post(CLASSIFY_ENDPOINT)
        .body(form_data)
        .map_err(|e| format!("Could not build request: {}", e))?;

    let response = request
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.ok() {
        response
            .json::<ClassifyResponse>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        let status = response.status();
        match response.json::<ErrorBody>().await {
            Ok(body) => Err(body.summary()),
            Err(_) => Err(format!("Server error: {}", status)),
        }
    }
}
