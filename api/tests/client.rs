use reqwest::{Method, RequestBuilder};

/// A reqwest client bound to a base URL, optionally sending an API key with every request.
#[derive(Clone)]
pub struct TestClient {
    pub base: String,
    pub client: reqwest::Client,
    pub api_key: Option<String>,
}

impl TestClient {
    pub fn new(base: String, client: reqwest::Client) -> TestClient {
        TestClient {
            base,
            client,
            api_key: None,
        }
    }

    pub fn clone_with_api_key(&self, api_key: String) -> TestClient {
        TestClient {
            base: self.base.clone(),
            client: self.client.clone(),
            api_key: Some(api_key),
        }
    }

    pub fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base, url.trim_start_matches('/'));
        let builder = self.client.request(method, url);
        match &self.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }

    pub fn get(&self, url: &str) -> RequestBuilder {
        self.request(Method::GET, url)
    }

    pub fn post(&self, url: &str) -> RequestBuilder {
        self.request(Method::POST, url)
    }

    pub fn put(&self, url: &str) -> RequestBuilder {
        self.request(Method::PUT, url)
    }

    pub fn delete(&self, url: &str) -> RequestBuilder {
        self.request(Method::DELETE, url)
    }
}
