//! Shared helpers for flow implementations (query-string encoding, URL assembly).

// crates.io
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
// self
use crate::_prelude::*;

/// Characters escaped inside a query component.
///
/// Everything a URI query may carry literally (`:`, `/`, `?`, `@`, `!`, `$`, `'`, `(`, `)`, `*`,
/// `,`, `;`) stays readable; pair delimiters (`&`, `=`), `+`, `#`, `%`, and characters that are
/// never valid in a URI are escaped so the result always re-parses to the original values.
const QUERY_COMPONENT: &AsciiSet = &CONTROLS
	.add(b' ')
	.add(b'"')
	.add(b'#')
	.add(b'%')
	.add(b'&')
	.add(b'+')
	.add(b'<')
	.add(b'=')
	.add(b'>')
	.add(b'[')
	.add(b'\\')
	.add(b']')
	.add(b'^')
	.add(b'`')
	.add(b'{')
	.add(b'|')
	.add(b'}');

/// Encodes `key=value` pairs into a query string, preserving their order.
pub fn encode_query<'a, I>(pairs: I) -> String
where
	I: IntoIterator<Item = (&'a str, &'a str)>,
{
	let mut buf = String::new();

	for (idx, (key, value)) in pairs.into_iter().enumerate() {
		if idx > 0 {
			buf.push('&');
		}

		buf.extend(utf8_percent_encode(key, QUERY_COMPONENT));
		buf.push('=');
		buf.extend(utf8_percent_encode(value, QUERY_COMPONENT));
	}

	buf
}

/// Appends an encoded query string to `base`, ahead of any fragment.
pub fn append_query(base: &str, query: &str) -> String {
	if query.is_empty() {
		return base.to_owned();
	}

	let (head, fragment) = match base.split_once('#') {
		Some((head, fragment)) => (head, Some(fragment)),
		None => (base, None),
	};
	let separator = match head.find('?') {
		None => "?",
		Some(_) if head.ends_with(['?', '&']) => "",
		Some(_) => "&",
	};
	let mut url = format!("{head}{separator}{query}");

	if let Some(fragment) = fragment {
		url.push('#');
		url.push_str(fragment);
	}

	url
}

/// Builds the access-token request URL with the optional configured query parameters.
pub(crate) fn token_request_url(
	endpoint: &Url,
	query_params: Option<&IndexMap<String, String>>,
) -> String {
	match query_params {
		Some(params) => append_query(
			endpoint.as_str(),
			&encode_query(params.iter().map(|(key, value)| (key.as_str(), value.as_str()))),
		),
		None => endpoint.to_string(),
	}
}
