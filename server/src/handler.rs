use std::ops::Deref;
use std::sync::Arc;

use axum::extract::FromRef;

use driver::database::PostgresDatabase;
use kernel::KernelError;

use crate::config::{AppConfig, AuthConfig};

pub struct AppModule<DB = PostgresDatabase>(Arc<Handler<DB>>);

impl AppModule<PostgresDatabase> {
    pub async fn new(config: &AppConfig) -> error_stack::Result<Self, KernelError> {
        let database = PostgresDatabase::new().await?;
        Ok(Self::with_database(database, config.auth().clone()))
    }
}

impl<DB> AppModule<DB> {
    pub fn with_database(database: DB, auth: AuthConfig) -> Self {
        Self(Arc::new(Handler { database, auth }))
    }
}

impl<DB> Clone for AppModule<DB> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<DB> Deref for AppModule<DB> {
    type Target = Handler<DB>;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

impl<DB> FromRef<AppModule<DB>> for AuthConfig {
    fn from_ref(module: &AppModule<DB>) -> Self {
        module.auth().clone()
    }
}

pub struct Handler<DB> {
    database: DB,
    auth: AuthConfig,
}

impl<DB> Handler<DB> {
    pub fn database(&self) -> &DB {
        &self.database
    }

    pub fn auth(&self) -> &AuthConfig {
        &self.auth
    }
}
