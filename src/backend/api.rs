use super::types::{
    AgentCreated, CreateAgentRequest, CreateSandboxRequest, CreateSecretRequest,
    ProviderDescriptor, ProvidersResponse, SandboxCreated, SecretSummary, SecretsResponse,
};
use super::BackendError;
use crate::config::Settings;
use serde::{Deserialize, Serialize};

/// Blocking JSON client for the agent platform backend. The bearer token is
/// an opaque value from settings; requests without one are sent anonymously
/// (useful against local development backends).
#[derive(Debug, Clone)]
pub struct ApiClient {
    api_base: String,
    api_token: Option<String>,
}

impl ApiClient {
    pub fn new(settings: &Settings) -> Self {
        let api_base = std::env::var("AGENTFORGE_API_BASE")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| settings.api_base_url.clone());
        Self {
            api_base,
            api_token: settings.api_token.clone(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base.trim_end_matches('/'), path)
    }

    fn apply_auth(&self, request: ureq::Request) -> ureq::Request {
        match &self.api_token {
            Some(token) => request.set("Authorization", &format!("Bearer {token}")),
            None => request,
        }
    }

    fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, BackendError> {
        let mut url = self.endpoint(path);
        if !query.is_empty() {
            let encoded = query
                .iter()
                .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
                .collect::<Vec<_>>()
                .join("&");
            url = format!("{url}?{encoded}");
        }
        let response = self
            .apply_auth(ureq::get(&url))
            .call()
            .map_err(|err| classify_error(path, err))?;
        response.into_json::<T>().map_err(|err| BackendError::Decode {
            endpoint: path.to_string(),
            message: err.to_string(),
        })
    }

    fn post_json<B: Serialize, T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, BackendError> {
        let url = self.endpoint(path);
        let value = serde_json::to_value(body).map_err(|source| BackendError::Encode {
            endpoint: path.to_string(),
            source,
        })?;
        let response = self
            .apply_auth(ureq::post(&url))
            .send_json(value)
            .map_err(|err| classify_error(path, err))?;
        response.into_json::<T>().map_err(|err| BackendError::Decode {
            endpoint: path.to_string(),
            message: err.to_string(),
        })
    }

    pub fn create_agent(&self, request: &CreateAgentRequest) -> Result<AgentCreated, BackendError> {
        self.post_json("v1/agents", request)
    }

    pub fn create_sandbox(
        &self,
        request: &CreateSandboxRequest,
    ) -> Result<SandboxCreated, BackendError> {
        self.post_json("v1/sandboxes", request)
    }

    pub fn list_providers(&self) -> Result<Vec<ProviderDescriptor>, BackendError> {
        let response: ProvidersResponse = self.get_json("v1/providers", &[])?;
        Ok(response.providers)
    }

    pub fn list_secrets(&self) -> Result<Vec<SecretSummary>, BackendError> {
        let response: SecretsResponse = self.get_json("v1/secrets", &[])?;
        Ok(response.secrets)
    }

    pub fn create_secret(&self, name: &str, value: &str) -> Result<SecretSummary, BackendError> {
        self.post_json(
            "v1/secrets",
            &CreateSecretRequest {
                name: name.to_string(),
                value: value.to_string(),
            },
        )
    }
}

fn classify_error(path: &str, err: ureq::Error) -> BackendError {
    match err {
        ureq::Error::Status(status, response) => {
            let message = response
                .into_string()
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            BackendError::Status {
                endpoint: path.to_string(),
                status,
                message,
            }
        }
        other => BackendError::Request {
            endpoint: path.to_string(),
            message: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_and_path_without_double_slash() {
        let settings = Settings {
            api_base_url: "https://backend.example.com/".to_string(),
            ..Settings::default()
        };
        let client = ApiClient {
            api_base: settings.api_base_url.clone(),
            api_token: None,
        };
        assert_eq!(
            client.endpoint("v1/agents"),
            "https://backend.example.com/v1/agents"
        );
    }
}
