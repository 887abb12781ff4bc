// # Route 53 DNS Provider
//
// This crate provides an AWS Route 53 implementation of `DnsProvider`.
//
// ## Behavior
//
// - One `ChangeResourceRecordSets` call per submission, with a single
//   UPSERT change. Route 53 creates the record if it is missing and
//   replaces it otherwise, so repeated runs converge.
// - The call returns as soon as Route 53 accepts the batch, normally with
//   status `PENDING`. Propagation is not polled.
// - No retry logic. The SDK's own retry policy is disabled on every client,
//   whatever the injected configuration says, and a rejection is returned
//   to the caller after a single attempt.
//
// ## Error Mapping
//
// - Service errors (access denied, `NoSuchHostedZone`, `InvalidChangeBatch`,
//   `InvalidInput`, throttling, ...) → `Error::Provider` with the AWS error
//   code and message
// - Everything else (dispatch/network failure, timeout, unparseable
//   response, request construction) → `Error::Unexpected`
//
// ## API Reference
//
// - ChangeResourceRecordSets:
//   https://docs.aws.amazon.com/Route53/latest/APIReference/API_ChangeResourceRecordSets.html

pub mod credentials;

pub use credentials::{CredentialProvider, EnvironmentCredentials};

use async_trait::async_trait;
use aws_sdk_route53::config::retry::RetryConfig;
use aws_sdk_route53::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_route53::primitives::DateTime as AwsDateTime;
use aws_sdk_route53::types::{
    Change, ChangeAction as Route53ChangeAction, ChangeBatch, ChangeInfo,
    ChangeStatus as Route53ChangeStatus, ResourceRecord, ResourceRecordSet, RrType,
};
use chrono::{DateTime, Utc};
use ddns_core::config::RecordType;
use ddns_core::traits::{ChangeAction, ChangeRequest, ChangeResult, ChangeStatus, DnsProvider};
use ddns_core::{Error, Result};

/// Provider name used in logs and errors
const PROVIDER_NAME: &str = "route53";

/// Comment attached to every change batch
const CHANGE_COMMENT: &str = "Dynamic DNS update";

/// Route 53 DNS provider
///
/// Credentials are loaded through the injected [`CredentialProvider`] on
/// each submission.
#[derive(Debug)]
pub struct Route53Provider {
    credentials: Box<dyn CredentialProvider>,
}

impl Route53Provider {
    /// Create a new Route 53 provider
    pub fn new(credentials: Box<dyn CredentialProvider>) -> Self {
        Self { credentials }
    }

    /// Create a provider using the host's credential chain, optionally
    /// pinned to a named profile
    pub fn from_profile(profile: Option<String>) -> Self {
        let credentials = match profile {
            Some(profile) => EnvironmentCredentials::with_profile(profile),
            None => EnvironmentCredentials::new(),
        };
        Self::new(Box::new(credentials))
    }

    /// Build a client that makes exactly one attempt per operation
    async fn client(&self) -> aws_sdk_route53::Client {
        let sdk_config = self.credentials.load().await;
        let config = aws_sdk_route53::config::Builder::from(&sdk_config)
            .retry_config(RetryConfig::disabled())
            .build();
        aws_sdk_route53::Client::from_conf(config)
    }
}

#[async_trait]
impl DnsProvider for Route53Provider {
    async fn submit(&self, request: &ChangeRequest) -> Result<ChangeResult> {
        let batch = change_batch(request)?;

        tracing::info!(
            "Submitting Route 53 change: {} {} -> {} (TTL {}) in zone {}",
            request.record_type(),
            request.record_name(),
            request.value(),
            request.ttl(),
            request.zone_id()
        );

        let output = self
            .client()
            .await
            .change_resource_record_sets()
            .hosted_zone_id(request.zone_id())
            .change_batch(batch)
            .send()
            .await
            .map_err(classify_sdk_error)?;

        let info: Option<ChangeInfo> = output.change_info.into();
        let info = info
            .ok_or_else(|| Error::unexpected("Route 53 response is missing ChangeInfo"))?;

        change_result(info)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}

/// Build the single-change Route 53 batch for a request
pub fn change_batch(request: &ChangeRequest) -> Result<ChangeBatch> {
    let record = ResourceRecord::builder()
        .value(request.value())
        .build()
        .map_err(build_error)?;

    let record_set = ResourceRecordSet::builder()
        .name(request.record_name())
        .r#type(rr_type(request.record_type()))
        .ttl(i64::from(request.ttl()))
        .resource_records(record)
        .build()
        .map_err(build_error)?;

    let change = Change::builder()
        .action(change_action(request.action()))
        .resource_record_set(record_set)
        .build()
        .map_err(build_error)?;

    ChangeBatch::builder()
        .changes(change)
        .comment(CHANGE_COMMENT)
        .build()
        .map_err(build_error)
}

fn rr_type(record_type: RecordType) -> RrType {
    match record_type {
        RecordType::A => RrType::A,
    }
}

fn change_action(action: ChangeAction) -> Route53ChangeAction {
    match action {
        ChangeAction::Upsert => Route53ChangeAction::Upsert,
    }
}

fn build_error(err: aws_sdk_route53::error::BuildError) -> Error {
    Error::unexpected(format!("Failed to build Route 53 change batch: {}", err))
}

fn change_result(info: ChangeInfo) -> Result<ChangeResult> {
    let change_id: Option<String> = info.id.into();
    let change_id = change_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| Error::unexpected("Route 53 response is missing the change ID"))?;

    let submitted_at: Option<AwsDateTime> = info.submitted_at.into();

    Ok(ChangeResult {
        change_id,
        status: change_status(&info.status),
        submitted_at: submitted_at.and_then(to_chrono),
    })
}

/// Map a Route 53 change status onto the core status
pub fn change_status(status: &Route53ChangeStatus) -> ChangeStatus {
    match status {
        Route53ChangeStatus::Pending => ChangeStatus::Pending,
        Route53ChangeStatus::Insync => ChangeStatus::InSync,
        other => ChangeStatus::Unknown(other.as_str().to_string()),
    }
}

fn to_chrono(value: AwsDateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(value.secs(), value.subsec_nanos())
}

/// Split SDK failures into provider rejections and everything else
fn classify_sdk_error<E, R>(err: SdkError<E, R>) -> Error
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug,
{
    match err {
        SdkError::ServiceError(context) => {
            let service_error = context.into_err();
            let code = service_error.code().unwrap_or("Unknown").to_string();
            let message = service_error
                .message()
                .map(str::to_string)
                .unwrap_or_else(|| service_error.to_string());

            Error::provider(PROVIDER_NAME, format!("{}: {}", code, message))
        }
        other => Error::unexpected(format!(
            "Route 53 request failed: {}",
            DisplayErrorContext(&other)
        )),
    }
}
