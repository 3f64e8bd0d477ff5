use gloo_net::http::{Request, Response};
use gloo_net::Error as GlooError;
use web_sys::RequestCredentials;
use crate::config;
use serde::Serialize;

/// Small API client that prefixes the backend URL and logs each call
pub struct Api;

pub struct RequestWrapper {
    request: Request,
    path: String,
    method: &'static str,
}

impl RequestWrapper {
    fn new(path: &str, method: &'static str) -> Self {
        let full_url = format!("{}{}", config::get_backend_url(), path);
        let request = match method {
            "POST" => Request::post(&full_url),
            _ => Request::get(&full_url),
        }
        .credentials(RequestCredentials::SameOrigin);

        Self {
            request,
            path: path.to_string(),
            method,
        }
    }

    /// Add a header to the request
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.request = self.request.header(name, value);
        self
    }

    /// Set the request body as JSON
    pub fn json<T: Serialize>(mut self, data: &T) -> Result<Self, serde_json::Error> {
        let body_string = serde_json::to_string(data)?;
        self.request = self.request.header("Content-Type", "application/json");
        self.request = self.request.body(body_string);
        Ok(self)
    }

    pub async fn send(self) -> Result<Response, GlooError> {
        let response = self.request.send().await;
        match &response {
            Ok(r) => gloo_console::log!(format!("{} {} -> {}", self.method, self.path, r.status())),
            Err(e) => gloo_console::error!(format!("{} {} failed: {}", self.method, self.path, e)),
        }
        response
    }
}

impl Api {
    pub fn post(path: &str) -> RequestWrapper {
        RequestWrapper::new(path, "POST")
    }
}
