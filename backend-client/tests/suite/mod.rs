use illustra_backend_client::Client;
use illustra_backend_client::ClientConfig;
use illustra_backend_client::Session;
use wiremock::MockServer;

mod auth;
mod cache;
mod resources;

pub(crate) fn client_for(server: &MockServer, session: Session) -> Client {
    let config = ClientConfig::with_base_url(format!("{}/api/", server.uri()));
    Client::new(&config, session).expect("build client")
}
