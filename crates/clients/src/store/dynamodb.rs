//! Amazon DynamoDB client table.
//!
//! One item per client, partitioned on `userSub`. Update and delete carry an
//! `attribute_exists` condition, so a missing item surfaces as a failed
//! condition instead of the store silently creating or ignoring it.

mod attributes;

use std::collections::HashMap;

use async_trait::async_trait;
use aws_config::Region;
use aws_credential_types::Credentials;
use aws_sdk_dynamodb::{
    Client,
    error::ProvideErrorMetadata,
    types::{AttributeValue, ReturnValue},
};
use aws_smithy_runtime_api::client::result::SdkError;
use config::DynamoDbConfig;
use secrecy::ExposeSecret;

use super::{ClientStore, Operation, StoreError, StoreOutcome, StoreResult};
use crate::model::{CLIENT_NAME, Item, NewClient, USER_SUB};

const ITEM_EXISTS: &str = "attribute_exists(#key)";

type Attributes = HashMap<String, AttributeValue>;

pub struct DynamoDbStore {
    client: Client,
    table_name: String,
}

impl DynamoDbStore {
    pub async fn new(config: &DynamoDbConfig) -> Self {
        let sdk_config = create_aws_config(config).await;

        Self {
            client: Client::new(&sdk_config),
            table_name: config.table_name.clone(),
        }
    }

    fn key(user_sub: &str) -> AttributeValue {
        AttributeValue::S(user_sub.to_owned())
    }
}

#[async_trait]
impl ClientStore for DynamoDbStore {
    async fn put(&self, client: &NewClient) -> StoreResult<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(attributes::to_item(client.item())))
            .send()
            .await
            .map_err(|e| handle_dynamodb_error(Operation::Put, client.user_sub(), e))?;

        Ok(())
    }

    async fn get(&self, user_sub: &str) -> StoreResult<StoreOutcome<Item>> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(USER_SUB, Self::key(user_sub))
            .send()
            .await
            .map_err(|e| handle_dynamodb_error(Operation::Get, user_sub, e))?;

        Ok(match output.item {
            Some(item) => StoreOutcome::Found(attributes::from_item(item)),
            None => StoreOutcome::Absent,
        })
    }

    async fn update_client_name(&self, user_sub: &str, client_name: &str) -> StoreResult<StoreOutcome<Item>> {
        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(USER_SUB, Self::key(user_sub))
            .update_expression("SET #name = :name")
            .condition_expression(ITEM_EXISTS)
            .expression_attribute_names("#key", USER_SUB)
            .expression_attribute_names("#name", CLIENT_NAME)
            .expression_attribute_values(":name", AttributeValue::S(client_name.to_owned()))
            .return_values(ReturnValue::AllNew)
            .send()
            .await
            .map(|output| output.attributes);

        conditional_outcome(Operation::Update, user_sub, result, |e| {
            e.is_conditional_check_failed_exception()
        })
    }

    async fn delete(&self, user_sub: &str) -> StoreResult<StoreOutcome<Item>> {
        let result = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .key(USER_SUB, Self::key(user_sub))
            .condition_expression(ITEM_EXISTS)
            .expression_attribute_names("#key", USER_SUB)
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map(|output| output.attributes);

        conditional_outcome(Operation::Delete, user_sub, result, |e| {
            e.is_conditional_check_failed_exception()
        })
    }
}

/// Maps the result of a conditional write to an outcome.
///
/// Missing attributes mean there was no item, a failed condition is a conflict, and
/// every other SDK error is a storage failure.
fn conditional_outcome<E, R>(
    operation: Operation,
    user_sub: &str,
    result: Result<Option<Attributes>, SdkError<E, R>>,
    is_conditional_check_failed: impl Fn(&E) -> bool,
) -> StoreResult<StoreOutcome<Item>>
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug + Send + Sync + 'static,
{
    match result {
        Ok(Some(item)) => Ok(StoreOutcome::Found(attributes::from_item(item))),
        Ok(None) => Ok(StoreOutcome::Absent),
        Err(error) if is_condition_failure(&error, is_conditional_check_failed) => {
            log::debug!("DynamoDB {operation} of client {user_sub} failed its existence condition");
            Ok(StoreOutcome::Conflict)
        }
        Err(error) => Err(handle_dynamodb_error(operation, user_sub, error)),
    }
}

fn is_condition_failure<E, R>(error: &SdkError<E, R>, is_conditional_check_failed: impl Fn(&E) -> bool) -> bool {
    error.as_service_error().is_some_and(is_conditional_check_failed)
}

/// Logs a DynamoDB SDK error and wraps it for the caller.
fn handle_dynamodb_error<E, R>(operation: Operation, user_sub: &str, error: SdkError<E, R>) -> StoreError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug + Send + Sync + 'static,
{
    match &error {
        SdkError::ServiceError(service_error) => {
            let err = service_error.err();

            log::error!(
                "DynamoDB {operation} for client {user_sub} failed with {}: {}",
                err.code().unwrap_or("unknown error code"),
                err.message().unwrap_or("Unknown error"),
            );
        }
        _ => log::error!("DynamoDB {operation} for client {user_sub} failed: {error:?}"),
    }

    StoreError::new(operation, error)
}

/// Create AWS SDK configuration from the storage config.
async fn create_aws_config(config: &DynamoDbConfig) -> aws_config::SdkConfig {
    let mut config_loader = aws_config::from_env();

    if let Some(region) = &config.region {
        config_loader = config_loader.region(Region::new(region.clone()));
    }

    // Use explicit credentials if provided
    if let (Some(access_key), Some(secret_key)) = (&config.access_key_id, &config.secret_access_key) {
        config_loader = config_loader.credentials_provider(Credentials::new(
            access_key.expose_secret(),
            secret_key.expose_secret(),
            config.session_token.as_ref().map(|t| t.expose_secret().to_string()),
            None,
            "client_store",
        ));
    }

    if let Some(profile) = &config.profile {
        config_loader = config_loader.profile_name(profile);
    }

    let mut sdk_config = config_loader.load().await;

    // Local DynamoDB, VPC endpoints
    if let Some(endpoint_url) = &config.endpoint_url {
        log::debug!("Using custom DynamoDB endpoint: {endpoint_url}");
        sdk_config = sdk_config.into_builder().endpoint_url(endpoint_url).build();
    }

    sdk_config
}
