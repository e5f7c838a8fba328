use reqwest::Method;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// How a multi-valued query parameter is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionFormat {
    /// `key=a,b,c`
    Csv,
    /// `key=a&key=b&key=c`
    Multi,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionParam {
    pub name: String,
    pub values: Vec<String>,
    pub format: CollectionFormat,
}

impl CollectionParam {
    /// Render into plain query pairs
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        match self.format {
            CollectionFormat::Csv => vec![(self.name.clone(), self.values.join(","))],
            CollectionFormat::Multi => self
                .values
                .iter()
                .map(|v| (self.name.clone(), v.clone()))
                .collect(),
        }
    }
}

/// Receives download progress while a response body is read
pub trait ProgressListener: Send + Sync {
    fn update(&self, bytes_read: u64, content_length: Option<u64>, done: bool);
}

/// Description of one outbound call, before authentication is applied
#[derive(Clone)]
pub struct ApiCall {
    pub path: String,
    pub method: Method,
    pub query: Vec<(String, String)>,
    pub collection_query: Vec<CollectionParam>,
    pub body: Option<Value>,
    pub headers: BTreeMap<String, String>,
    pub form: BTreeMap<String, String>,
    pub progress: Option<Arc<dyn ProgressListener>>,
}

impl ApiCall {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            query: Vec::new(),
            collection_query: Vec::new(),
            body: None,
            headers: BTreeMap::new(),
            form: BTreeMap::new(),
            progress: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Append a query pair; `None` and blank values are left out
    pub fn param<V: fmt::Display>(mut self, name: &str, value: Option<V>) -> Self {
        if let Some(value) = value {
            let value = value.to_string();
            if !value.trim().is_empty() {
                self.query.push((name.to_string(), value));
            }
        }
        self
    }

    /// Append a multi-valued parameter; empty collections are left out
    pub fn collection<I, V>(mut self, name: &str, values: I, format: CollectionFormat) -> Self
    where
        I: IntoIterator<Item = V>,
        V: fmt::Display,
    {
        let values: Vec<String> = values.into_iter().map(|v| v.to_string()).collect();
        if !values.is_empty() {
            self.collection_query.push(CollectionParam {
                name: name.to_string(),
                values,
                format,
            });
        }
        self
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_string(), value.into());
        self
    }

    pub fn json_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn form_param(mut self, name: &str, value: impl Into<String>) -> Self {
        self.form.insert(name.to_string(), value.into());
        self
    }

    pub fn with_progress(mut self, listener: Arc<dyn ProgressListener>) -> Self {
        self.progress = Some(listener);
        self
    }

    /// Every query pair in send order: plain params first, then collections
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = self.query.clone();
        pairs.extend(self.collection_query.iter().flat_map(CollectionParam::to_pairs));
        pairs
    }

    /// First value sent for `name`, if any
    pub fn query_value(&self, name: &str) -> Option<String> {
        self.query_pairs()
            .into_iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }
}

impl fmt::Debug for ApiCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCall")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("query", &self.query)
            .field("collection_query", &self.collection_query)
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .field("has_body", &self.body.is_some())
            .field("has_progress", &self.progress.is_some())
            .finish()
    }
}
