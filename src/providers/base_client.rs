use crate::core::error::StepError;
use reqwest::{Client, Response};
use serde::Serialize;
use std::collections::HashMap;

/// Thin JSON POST client shared by providers. Holds a reusable connection
/// pool; authentication goes through headers or query parameters depending
/// on the provider.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    endpoint: String,
    query_params: Vec<(String, String)>,
    extra_headers: HashMap<String, String>,
}

impl HttpClient {
    pub fn new(endpoint: String, extra_headers: Option<HashMap<String, String>>) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            query_params: Vec::new(),
            extra_headers: extra_headers.unwrap_or_default(),
        }
    }

    pub fn add_query_param(&mut self, key: &str, value: String) {
        self.query_params.push((key.to_string(), value));
    }

    pub async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &T,
    ) -> Result<Response, StepError> {
        let url = format!("{}/{}", self.endpoint.trim_end_matches('/'), path);

        let mut request = self
            .client
            .post(&url)
            .header("Content-Type", "application/json");

        for (key, value) in &self.extra_headers {
            request = request.header(key, value);
        }

        let response = request
            .query(&self.query_params)
            .json(payload)
            .send()
            .await?;
        Ok(response)
    }
}
