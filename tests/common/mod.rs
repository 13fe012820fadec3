use testcontainers::runners::AsyncRunner;
use testcontainers::ContainerAsync;
use testcontainers_modules::mongo::Mongo;

use addonvault::DbClient;

/// Holds the running MongoDB container and a connected client.
///
/// The container lives as long as this struct; dropping it stops and cleans
/// up the container.
pub struct TestEnv {
    _mongo: ContainerAsync<Mongo>,
    pub client: DbClient,
}

impl TestEnv {
    /// Spin up a MongoDB container and connect a client to a fresh database.
    pub async fn start() -> Self {
        let mongo = Mongo::default()
            .start()
            .await
            .expect("Failed to start MongoDB container");

        let port = mongo
            .get_host_port_ipv4(27017)
            .await
            .expect("Failed to get MongoDB port");
        let uri = format!("mongodb://127.0.0.1:{}", port);

        let client = DbClient::connect_with_uri(&uri, "addonvault_test")
            .await
            .expect("Failed to connect to MongoDB");

        Self {
            _mongo: mongo,
            client,
        }
    }
}
