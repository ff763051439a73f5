//! # dtool Docker State Querying
//!
//! File: cli/src/common/docker/state.rs
//!
//! ## Overview
//!
//! Read-only queries against the daemon, returning `ContainerRecord`s:
//!
//! - **`list_containers`**: the list API plus one image inspection per
//!   distinct image (cached for the duration of the call) to resolve tags.
//! - **`get_container`**: inspect a single container by name or ID, mapping
//!   404 to `DtoolError::ContainerNotFound`.
//!
//! Nothing here retries. A transport failure after the daemon health check
//! surfaces as `DtoolError::RuntimeUnavailable`.
//!
use super::connect::RuntimeClient;
use super::record::{ContainerRecord, ImageInfo};
use crate::core::error::{DtoolError, Result};
use anyhow::anyhow;
use bollard::container::{InspectContainerOptions, ListContainersOptions};
use std::collections::HashMap;
use tracing::{debug, error, info, instrument, warn};

impl RuntimeClient {
    /// Lists containers in the daemon's order.
    ///
    /// # Arguments
    ///
    /// * `include_stopped` - If `true`, stopped and exited containers are included;
    ///   otherwise only running ones.
    ///
    /// # Errors
    ///
    /// * `DtoolError::RuntimeUnavailable` - the daemon could not be reached.
    /// * `DtoolError::DockerApi` - the daemon rejected the list or an image inspection.
    #[instrument(skip(self))]
    pub async fn list_containers(&self, include_stopped: bool) -> Result<Vec<ContainerRecord>> {
        let options = Some(ListContainersOptions::<String> {
            all: include_stopped,
            ..Default::default()
        });
        info!("Listing containers (All: {})...", include_stopped);

        let summaries = self.docker.list_containers(options).await.map_err(|e| {
            error!("Failed to list containers: {:?}", e);
            anyhow!(DtoolError::from_bollard(e)).context("Failed to list containers")
        })?;
        debug!("Daemon reported {} container(s).", summaries.len());

        let mut images: HashMap<String, ImageInfo> = HashMap::new();
        let mut records = Vec::with_capacity(summaries.len());
        for summary in summaries {
            let image_id = summary.image_id.clone().unwrap_or_default();
            let image = match images.get(&image_id) {
                Some(image) => image.clone(),
                None => {
                    let image = self.resolve_image(&image_id).await?;
                    images.insert(image_id, image.clone());
                    image
                }
            };
            records.push(ContainerRecord::from_summary(summary, image));
        }
        Ok(records)
    }

    /// Fetches a single container by name or ID.
    ///
    /// # Errors
    ///
    /// * `DtoolError::ContainerNotFound` - the daemon answered 404.
    /// * `DtoolError::RuntimeUnavailable` / `DtoolError::DockerApi` - any other failure.
    #[instrument(skip(self, name_or_id), fields(container = %name_or_id))]
    pub async fn get_container(&self, name_or_id: &str) -> Result<ContainerRecord> {
        debug!("Inspecting container: {}", name_or_id);
        let details = self
            .docker
            .inspect_container(name_or_id, None::<InspectContainerOptions>)
            .await
            .map_err(|e| match e {
                bollard::errors::Error::DockerResponseServerError {
                    status_code: 404, ..
                } => {
                    warn!("Container '{}' was not found.", name_or_id);
                    anyhow!(DtoolError::ContainerNotFound {
                        name: name_or_id.to_string()
                    })
                }
                _ => {
                    error!("Failed to inspect container '{}': {:?}", name_or_id, e);
                    anyhow!(DtoolError::from_bollard(e))
                        .context(format!("Failed to inspect container '{}'", name_or_id))
                }
            })?;

        let image_id = details.image.clone().unwrap_or_default();
        let image = self.resolve_image(&image_id).await?;
        Ok(ContainerRecord::from_inspect(details, image))
    }

    /// Looks up the tags of an image. An image that disappeared since the
    /// container was created resolves to its ID with no tags.
    async fn resolve_image(&self, image_id: &str) -> Result<ImageInfo> {
        if image_id.is_empty() {
            return Ok(ImageInfo::default());
        }
        match self.docker.inspect_image(image_id).await {
            Ok(inspect) => Ok(ImageInfo::new(
                inspect.id.unwrap_or_else(|| image_id.to_string()),
                inspect.repo_tags.unwrap_or_default(),
            )),
            Err(bollard::errors::Error::DockerResponseServerError {
                status_code: 404, ..
            }) => {
                debug!("Image '{}' no longer exists; showing its ID.", image_id);
                Ok(ImageInfo::new(image_id, Vec::new()))
            }
            Err(e) => Err(anyhow!(DtoolError::from_bollard(e))
                .context(format!("Failed to inspect image '{}'", image_id))),
        }
    }
}
