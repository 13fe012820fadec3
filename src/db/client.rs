use std::sync::Arc;

use mongodb::bson::doc;
use mongodb::options::{ClientOptions, Credential, ServerAddress};
use mongodb::Client;

use crate::config::DbConfig;
use crate::db::entities::EntityRepository;
use crate::db::metrics::MongoMetricsRepository;
use crate::db::status::MongoStatusRepository;
use crate::db::update_requests::MongoUpdateRequestRepository;
use crate::db::webhooks::MongoWebhookRepository;
use crate::error::DbError;
use crate::models::{Author, Category, Resource, ResourceReview, ResourceUpdate, ResourceVersion};
use crate::serial::Profile;

/// Owned handle to the catalog database.
///
/// Connecting is explicit and happens once, in the constructor of whatever
/// owns this client; repositories handed out afterwards share the underlying
/// connection pool. There is no lazily-initialized global.
#[derive(Clone)]
pub struct DbClient {
    database: mongodb::Database,
    storage_profile: Arc<Profile>,
}

impl DbClient {
    /// Establish a connection and verify the server is reachable within the
    /// configured timeout. Fails outright on timeout; retry policy belongs
    /// to the caller.
    pub async fn connect(config: &DbConfig) -> Result<Self, DbError> {
        let mut options = ClientOptions::default();
        options.hosts = vec![ServerAddress::Tcp {
            host: config.host.clone(),
            port: Some(config.port),
        }];
        options.connect_timeout = Some(config.connect_timeout);
        options.server_selection_timeout = Some(config.connect_timeout);
        options.app_name = Some("addonvault".to_string());

        if let Some(db_credential) = &config.credential {
            let mut credential = Credential::default();
            credential.username = Some(db_credential.username.clone());
            credential.password = Some(db_credential.password.clone());
            credential.source = Some(db_credential.auth_database.clone());
            options.credential = Some(credential);
        }

        tracing::info!(host = %config.host, port = config.port, "connecting to MongoDB");
        let client =
            Client::with_options(options).map_err(|e| DbError::Connection(e.to_string()))?;

        Self::initialize(client, &config.database).await
    }

    /// Connect via a full connection string. Mostly useful for tests and
    /// tooling where the URI is handed over as-is.
    pub async fn connect_with_uri(uri: &str, database: &str) -> Result<Self, DbError> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| DbError::Connection(e.to_string()))?;
        Self::initialize(client, database).await
    }

    async fn initialize(client: Client, database: &str) -> Result<Self, DbError> {
        let database = client.database(database);

        // The driver connects lazily; ping now so a dead server fails the
        // constructor instead of the first operation.
        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| DbError::Connection(e.to_string()))?;
        tracing::info!(database = database.name(), "database reachable");

        Ok(Self {
            database,
            storage_profile: Arc::new(Profile::storage()),
        })
    }

    /// Raw handle to the underlying database, for diagnostics and tests.
    pub fn database(&self) -> &mongodb::Database {
        &self.database
    }

    /// Number of collections currently present.
    pub async fn collection_count(&self) -> Result<usize, DbError> {
        Ok(self.database.list_collection_names().await?.len())
    }

    pub fn resources(&self) -> EntityRepository<Resource> {
        EntityRepository::new(&self.database, Arc::clone(&self.storage_profile))
    }

    pub fn authors(&self) -> EntityRepository<Author> {
        EntityRepository::new(&self.database, Arc::clone(&self.storage_profile))
    }

    pub fn categories(&self) -> EntityRepository<Category> {
        EntityRepository::new(&self.database, Arc::clone(&self.storage_profile))
    }

    pub fn versions(&self) -> EntityRepository<ResourceVersion> {
        EntityRepository::new(&self.database, Arc::clone(&self.storage_profile))
    }

    pub fn updates(&self) -> EntityRepository<ResourceUpdate> {
        EntityRepository::new(&self.database, Arc::clone(&self.storage_profile))
    }

    pub fn reviews(&self) -> EntityRepository<ResourceReview> {
        EntityRepository::new(&self.database, Arc::clone(&self.storage_profile))
    }

    pub fn status(&self) -> MongoStatusRepository {
        MongoStatusRepository::new(&self.database)
    }

    pub fn webhooks(&self) -> MongoWebhookRepository {
        MongoWebhookRepository::new(&self.database)
    }

    pub fn metrics(&self) -> MongoMetricsRepository {
        MongoMetricsRepository::new(&self.database)
    }

    pub fn update_requests(&self) -> MongoUpdateRequestRepository {
        MongoUpdateRequestRepository::new(&self.database)
    }
}
