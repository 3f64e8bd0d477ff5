/// Backend origin, baked in at build time. Falls back to the page's own
/// origin when the site is served by the backend itself.
pub fn get_backend_url() -> String {
    if let Some(url) = option_env!("BACKEND_URL") {
        return url.trim_end_matches('/').to_string();
    }
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMode {
    /// Waits and reports success without any network traffic.
    Simulated,
    /// Posts to the backend's `/api/contact`.
    Http,
}

pub fn submit_mode() -> SubmitMode {
    match option_env!("CONTACT_SUBMIT_MODE") {
        Some("http") => SubmitMode::Http,
        _ => SubmitMode::Simulated,
    }
}
