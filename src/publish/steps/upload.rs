//! Direct bundle upload to the pre-signed destination.

use crate::error::Result;
use crate::publish::client::{PlatformClient, check_status};
use crate::publish::steps::UploadTarget;
use reqwest::Method;
use reqwest::header::{ACCEPT, CONTENT_TYPE};

/// Storage ACL header required by the signed upload
pub const ACL_HEADER: &str = "x-amz-acl";

/// PUTs the bundle to the signed URL. No session headers are sent; the URL
/// carries its own authorization.
pub async fn upload_bundle(client: &PlatformClient, target: &UploadTarget, bundle: &str) -> Result<()> {
    log::debug!("PUT {} ({} bytes)", target.code_upload_url.path(), bundle.len());

    let response = client
        .http()
        .put(target.code_upload_url.clone())
        .header(ACCEPT, "*/*")
        .header(CONTENT_TYPE, "text/javascript")
        .header(ACL_HEADER, "bucket-owner-full-control")
        .body(bundle.to_owned())
        .send()
        .await?;
    check_status(&Method::PUT, response).await?;

    log::info!("Uploaded code bundle");
    Ok(())
}
