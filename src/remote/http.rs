//! reqwest-backed implementation of the collection seams.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::domain::mutation::{MultipartPayload, MutationBody, MutationIntent};
use crate::domain::page::{FilterValue, PageRequest};
use crate::domain::resource::{Method, ResourceSpec};
use crate::dto::api::{ListEnvelope, MutationEnvelope};
use crate::remote::credentials::CredentialStore;
use crate::remote::errors::{RemoteError, RemoteResult};
use crate::remote::{CollectionReader, CollectionWriter};

fn filter_to_query(value: &FilterValue) -> String {
    match value {
        FilterValue::Flag(flag) => flag.to_string(),
        FilterValue::Integer(n) => n.to_string(),
        FilterValue::Number(n) => n.to_string(),
        FilterValue::Text(text) => text.clone(),
    }
}

/// `page=<n>&limit=<n>&<filter>=<value>...`
pub fn list_query(request: &PageRequest) -> RemoteResult<String> {
    let mut pairs = vec![
        ("page".to_string(), request.page.to_string()),
        ("limit".to_string(), request.limit.to_string()),
    ];
    pairs.extend(
        request
            .filters
            .iter()
            .filter(|(key, _)| key.as_str() != "page" && key.as_str() != "limit")
            .map(|(key, value)| (key.clone(), filter_to_query(value))),
    );
    serde_html_form::to_string(&pairs).map_err(|e| RemoteError::Decode(e.to_string()))
}

fn multipart_form(payload: &MultipartPayload) -> RemoteResult<Form> {
    let mut form = Form::new();
    for (name, value) in &payload.fields {
        form = form.text(name.clone(), value.clone());
    }
    for file in &payload.files {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.mime)
            .map_err(|e| RemoteError::Decode(format!("invalid mime type {}: {e}", file.mime)))?;
        form = form.part(file.field.clone(), part);
    }
    Ok(form)
}

fn with_body(request: RequestBuilder, body: &MutationBody) -> RemoteResult<RequestBuilder> {
    Ok(match body {
        MutationBody::Empty => request,
        MutationBody::Json(value) => request.json(value),
        MutationBody::Multipart(payload) => request.multipart(multipart_form(payload)?),
    })
}

#[derive(Clone, Debug)]
pub struct HttpCollection {
    client: Client,
    base_url: String,
    credentials: CredentialStore,
}

impl HttpCollection {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        credentials: CredentialStore,
    ) -> RemoteResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteError::Network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// The token is read per request so logins/logouts apply immediately.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.credentials.current() {
            Some(token) => request.header(reqwest::header::AUTHORIZATION, token.header_value()),
            None => request,
        }
    }

    async fn send<E: DeserializeOwned + Send>(&self, request: RequestBuilder) -> RemoteResult<E> {
        let response = self.authorize(request).send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(RemoteError::Unauthorized);
        }

        let body = response.bytes().await?;
        match serde_json::from_slice::<E>(&body) {
            Ok(envelope) => Ok(envelope),
            // Error pages without an envelope are reported by status.
            Err(_) if !status.is_success() => Err(RemoteError::Network(format!("HTTP {status}"))),
            Err(e) => Err(RemoteError::from(e)),
        }
    }
}

#[async_trait]
impl CollectionReader for HttpCollection {
    async fn list(
        &self,
        resource: &ResourceSpec,
        request: &PageRequest,
    ) -> RemoteResult<ListEnvelope> {
        let url = format!("{}?{}", self.url(&resource.endpoints.list), list_query(request)?);
        log::debug!("GET {url}");
        self.send(self.client.get(url)).await
    }
}

#[async_trait]
impl CollectionWriter for HttpCollection {
    async fn mutate(
        &self,
        resource: &ResourceSpec,
        intent: &MutationIntent,
    ) -> RemoteResult<MutationEnvelope> {
        let route = resource.endpoints.route_for(intent);
        let url = self.url(&route.resolve(intent.target()));
        log::debug!("{:?} {url}", route.method);

        let request = match route.method {
            Method::Post => self.client.post(url),
            Method::Put => self.client.put(url),
            Method::Patch => self.client.patch(url),
            Method::Delete => self.client.delete(url),
        };

        let request = match intent {
            MutationIntent::Create(body) | MutationIntent::Update(_, body) => {
                with_body(request, body)?
            }
            MutationIntent::Delete(_) | MutationIntent::ToggleStatus(_) => request,
        };

        self.send(request).await
    }
}
