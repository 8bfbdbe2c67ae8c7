use reqwest::Client;

const APP_USER_AGENT: &str = concat!("Emberlight/", env!("CARGO_PKG_VERSION"));

pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder().user_agent(APP_USER_AGENT).build()
}
