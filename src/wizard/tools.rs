use crate::shared::ids::generate_client_token;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const TOKEN_MAX_GENERATION_ATTEMPTS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

pub const HTTP_METHOD_OPTIONS: [HttpMethod; 4] = [
    HttpMethod::Get,
    HttpMethod::Post,
    HttpMethod::Put,
    HttpMethod::Delete,
];

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// Which of a tool's three parameter lists an editor operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Header,
    Query,
    Path,
}

impl ParamKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ParamKind::Header => "header",
            ParamKind::Query => "query",
            ParamKind::Path => "path",
        }
    }
}

/// Editing representation of one key/value entry. The synthetic id keeps
/// list rendering stable while the operator retypes keys; it is stripped by
/// flattening before submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamPair {
    pub id: String,
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub api_url: String,
    pub api_method: HttpMethod,
    pub api_headers: Vec<ParamPair>,
    pub api_query_params: Vec<ParamPair>,
    pub api_path_params: Vec<ParamPair>,
    pub dynamic_substitution: bool,
    pub request_payload: String,
}

impl ToolDefinition {
    pub fn params(&self, kind: ParamKind) -> &[ParamPair] {
        match kind {
            ParamKind::Header => &self.api_headers,
            ParamKind::Query => &self.api_query_params,
            ParamKind::Path => &self.api_path_params,
        }
    }

    pub(crate) fn params_mut(&mut self, kind: ParamKind) -> &mut Vec<ParamPair> {
        match kind {
            ParamKind::Header => &mut self.api_headers,
            ParamKind::Query => &mut self.api_query_params,
            ParamKind::Path => &mut self.api_path_params,
        }
    }
}

/// Targeted single-field update applied to one tool by id.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolField {
    Name(String),
    Description(String),
    ApiUrl(String),
    ApiMethod(HttpMethod),
    DynamicSubstitution(bool),
    RequestPayload(String),
}

pub(crate) fn new_tool(existing: &[ToolDefinition]) -> Result<ToolDefinition, String> {
    let id = unique_token("tool", |candidate| {
        existing.iter().any(|tool| tool.id == candidate)
    })?;
    Ok(ToolDefinition {
        id,
        name: String::new(),
        description: String::new(),
        api_url: String::new(),
        api_method: HttpMethod::Get,
        api_headers: Vec::new(),
        api_query_params: Vec::new(),
        api_path_params: Vec::new(),
        dynamic_substitution: false,
        request_payload: String::new(),
    })
}

pub(crate) fn new_param(existing: &[ParamPair]) -> Result<ParamPair, String> {
    let id = unique_token("param", |candidate| {
        existing.iter().any(|pair| pair.id == candidate)
    })?;
    Ok(ParamPair {
        id,
        key: String::new(),
        value: String::new(),
    })
}

fn unique_token(prefix: &str, taken: impl Fn(&str) -> bool) -> Result<String, String> {
    for _ in 0..TOKEN_MAX_GENERATION_ATTEMPTS {
        let candidate = generate_client_token(prefix)?;
        if !taken(&candidate) {
            return Ok(candidate);
        }
    }
    Err(format!(
        "failed to allocate unique {prefix} token after {TOKEN_MAX_GENERATION_ATTEMPTS} attempts"
    ))
}

/// Flattens the ordered editing pairs into the backend's key/value map.
/// Entries with a blank key or blank value are dropped; duplicate keys
/// collapse with the later entry winning.
pub fn flatten_params(pairs: &[ParamPair]) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    for pair in pairs {
        let key = pair.key.trim();
        let value = pair.value.trim();
        if key.is_empty() || value.is_empty() {
            continue;
        }
        map.insert(key.to_string(), value.to_string());
    }
    map
}

/// Collects `{{placeholder}}` names across a tool's url, parameter values,
/// and payload, in order of first appearance. The backend substitutes these
/// with the LLM's tool-call arguments at invocation time.
pub fn extract_placeholders(tool: &ToolDefinition) -> Vec<String> {
    let mut names = Vec::new();
    let mut scan = |text: &str| {
        let mut rest = text;
        while let Some(start) = rest.find("{{") {
            let after = &rest[start + 2..];
            let Some(end) = after.find("}}") else {
                break;
            };
            let name = after[..end].trim();
            if !name.is_empty() && !names.iter().any(|known| known == name) {
                names.push(name.to_string());
            }
            rest = &after[end + 2..];
        }
    };
    scan(&tool.api_url);
    for kind in [ParamKind::Header, ParamKind::Query, ParamKind::Path] {
        for pair in tool.params(kind) {
            scan(&pair.key);
            scan(&pair.value);
        }
    }
    scan(&tool.request_payload);
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(key: &str, value: &str) -> ParamPair {
        ParamPair {
            id: format!("param-{key}-{value}"),
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn flatten_params_maps_ordered_pairs_to_key_values() {
        let map = flatten_params(&[pair("a", "1"), pair("b", "2")]);
        assert_eq!(map.get("a").map(String::as_str), Some("1"));
        assert_eq!(map.get("b").map(String::as_str), Some("2"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn flatten_params_skips_blank_keys_and_values() {
        let map = flatten_params(&[pair("", "1"), pair("b", "  "), pair("c", "3")]);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("c").map(String::as_str), Some("3"));
    }

    #[test]
    fn flatten_params_collapses_duplicate_keys_last_write_wins() {
        let map = flatten_params(&[pair("k", "first"), pair("k", "second")]);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("k").map(String::as_str), Some("second"));
    }

    #[test]
    fn extract_placeholders_orders_by_first_appearance_and_dedups() {
        let mut tool = new_tool(&[]).expect("new tool");
        tool.api_url = "https://api.example.com/{{region}}/weather".to_string();
        tool.api_query_params = vec![pair("city", "{{city}}"), pair("units", "{{ region }}")];
        tool.request_payload = r#"{"q": "{{city}}"}"#.to_string();
        assert_eq!(
            extract_placeholders(&tool),
            vec!["region".to_string(), "city".to_string()]
        );
    }

    #[test]
    fn extract_placeholders_ignores_unterminated_braces() {
        let mut tool = new_tool(&[]).expect("new tool");
        tool.api_url = "https://api.example.com/{{broken".to_string();
        assert!(extract_placeholders(&tool).is_empty());
    }
}
