//! Authorization URL construction for the authorization code flow.

// self
use crate::{_prelude::*, flows::common};

/// Builds the URL that sends a user agent to the provider's authorization endpoint.
///
/// The query carries `client_id`, `redirect_uri`, and `response_type=code`, in that order,
/// followed by `extra_params`; an extra parameter with a default's name replaces that default
/// in place. Values are percent-encoded except for characters a URI query may carry literally,
/// so a redirect URI such as `https://app.example/cb` stays readable. The endpoint string is
/// used as-is; when it already has a query the parameters are appended with `&`.
pub fn authorization_url(
	authorization_endpoint: &str,
	redirect_uri: &str,
	client_id: &str,
	extra_params: Option<&IndexMap<String, String>>,
) -> String {
	let mut params = IndexMap::<&str, &str>::new();

	params.insert("client_id", client_id);
	params.insert("redirect_uri", redirect_uri);
	params.insert("response_type", "code");

	if let Some(extra) = extra_params {
		for (key, value) in extra {
			params.insert(key, value);
		}
	}

	common::append_query(authorization_endpoint, &common::encode_query(params))
}
