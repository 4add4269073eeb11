use notes_shared::{ApiError, ApiRequest, ClientConfig, RawResponse};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestCredentials, RequestInit, Response};

/// Performs `request` with the session cookie attached. Any HTTP status is a
/// successful transport; classification happens in `parse_response`.
pub async fn send(config: &ClientConfig, request: &ApiRequest) -> Result<RawResponse, ApiError> {
    let body = request.body()?;

    let opts = RequestInit::new();
    opts.set_method(request.method().as_str());
    opts.set_credentials(RequestCredentials::SameOrigin);
    if let Some(text) = body.text() {
        opts.set_body(&JsValue::from_str(text));
    }

    let url = config.url(&request.path());
    let fetch_request = Request::new_with_str_and_init(&url, &opts).map_err(js_error)?;

    if let Some(content_type) = body.content_type() {
        fetch_request
            .headers()
            .set("Content-Type", content_type)
            .map_err(js_error)?;
    }

    let window = web_sys::window().ok_or_else(|| ApiError::Network("no window".to_string()))?;
    let response: Response = JsFuture::from(window.fetch_with_request(&fetch_request))
        .await
        .map_err(js_error)?
        .into();

    let text = JsFuture::from(response.text().map_err(js_error)?)
        .await
        .map_err(js_error)?
        .as_string()
        .unwrap_or_default();

    tracing::debug!(
        method = request.method().as_str(),
        path = %request.path(),
        status = response.status(),
        "request finished"
    );

    Ok(RawResponse {
        status: response.status(),
        body: text,
    })
}

fn js_error(value: JsValue) -> ApiError {
    ApiError::Network(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}
