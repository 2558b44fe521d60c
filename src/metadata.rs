//! Request construction: binding values to an operation's parameters and
//! rendering the final request URL.

use std::fmt;

use url::form_urlencoded;

use crate::catalog::Operation;
use crate::{Error, Result};

/// A single query parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Text(String),
    Integer(i64),
    Flag(bool),
}

impl fmt::Display for ParamValue {
    /// Query-string rendering: text verbatim, integers in decimal, flags as
    /// lowercase `true`/`false`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Text(text) => f.write_str(text),
            ParamValue::Integer(n) => write!(f, "{n}"),
            ParamValue::Flag(flag) => write!(f, "{flag}"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        ParamValue::Text(value.clone())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Integer(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Integer(i64::from(value))
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Flag(value)
    }
}

/// A fully bound request: the endpoint to call and its query parameters.
///
/// Parameters keep the order the operation's descriptor declares, so the
/// same inputs always render the same URL.
///
/// # Examples
///
/// ```
/// use bigdatacloud::{Operation, RequestMetadata};
///
/// let metadata = RequestMetadata::build(
///     Operation::TimezoneInfo,
///     vec!["Australia/Sydney".into(), 1000i64.into()],
///     "my-key",
/// )
/// .unwrap();
///
/// assert_eq!(metadata.endpoint, "timezone-info");
/// assert_eq!(
///     metadata.url("https://api.bigdatacloud.net/data"),
///     "https://api.bigdatacloud.net/data/timezone-info\
///      ?timeZoneId=Australia%2FSydney&utcReference=1000&key=my-key"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RequestMetadata {
    /// The operation this request was built for.
    pub operation: Operation,

    /// The endpoint path (relative to the base URL).
    pub endpoint: &'static str,

    /// Query parameters, paired by wire name.
    pub params: Vec<(&'static str, ParamValue)>,
}

impl RequestMetadata {
    /// Binds caller values to the operation's parameter names.
    ///
    /// `values` holds one entry per declared parameter, minus the key slot
    /// for operations that authenticate. For those, `api_key` is appended as
    /// the final value; an empty key is still sent, as `key=`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArgumentMismatch`] if the number of values does not
    /// match the descriptor.
    pub fn build(operation: Operation, values: Vec<ParamValue>, api_key: &str) -> Result<Self> {
        let descriptor = operation.descriptor();

        let mut values = values;
        if descriptor.requires_key() {
            values.push(ParamValue::from(api_key));
        }

        if values.len() != descriptor.params.len() {
            return Err(Error::ArgumentMismatch {
                operation,
                expected: descriptor.params.len(),
                actual: values.len(),
            });
        }

        let params = descriptor.params.iter().copied().zip(values).collect();

        Ok(Self {
            operation,
            endpoint: descriptor.endpoint,
            params,
        })
    }

    /// Returns the value bound to a wire parameter name.
    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.params
            .iter()
            .find(|(param, _)| *param == name)
            .map(|(_, value)| value)
    }

    /// Renders the full request URL against `base_url`.
    pub fn url(&self, base_url: &str) -> String {
        format_url(base_url, self.endpoint, &self.params)
    }
}

/// Builds `{base}/{endpoint}` plus a form-encoded query string.
///
/// No `?` is emitted when there are no parameters. Spaces encode as `+` and
/// reserved characters are percent-escaped.
///
/// ```
/// use bigdatacloud::metadata::{format_url, ParamValue};
///
/// assert_eq!(
///     format_url("https://api.bigdatacloud.net/data", "client-ip", &[]),
///     "https://api.bigdatacloud.net/data/client-ip"
/// );
///
/// let params = [("bogonsOnly", ParamValue::Flag(true)), ("batchSize", ParamValue::Integer(10))];
/// assert_eq!(
///     format_url("https://api.bigdatacloud.net/data/", "prefixes-list", &params),
///     "https://api.bigdatacloud.net/data/prefixes-list?bogonsOnly=true&batchSize=10"
/// );
/// ```
pub fn format_url(base_url: &str, endpoint: &str, params: &[(&str, ParamValue)]) -> String {
    let base = base_url.trim_end_matches('/');
    if params.is_empty() {
        return format!("{base}/{endpoint}");
    }

    let mut query = form_urlencoded::Serializer::new(String::new());
    for (name, value) in params {
        query.append_pair(name, &value.to_string());
    }

    format!("{base}/{endpoint}?{}", query.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://api.bigdatacloud.net/data";

    #[test]
    fn test_build_binds_values_in_descriptor_order() {
        let metadata = RequestMetadata::build(
            Operation::TimezoneInfo,
            vec!["Australia/Sydney".into(), 1000i64.into()],
            "secret",
        )
        .unwrap();

        let descriptor = Operation::TimezoneInfo.descriptor();
        assert_eq!(metadata.endpoint, descriptor.endpoint);

        let names: Vec<_> = metadata.params.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, descriptor.params);

        assert_eq!(
            metadata.param(descriptor.params[0]),
            Some(&ParamValue::Text("Australia/Sydney".to_string()))
        );
        assert_eq!(
            metadata.param(descriptor.params[1]),
            Some(&ParamValue::Integer(1000))
        );
        assert_eq!(
            metadata.param("key"),
            Some(&ParamValue::Text("secret".to_string()))
        );
    }

    #[test]
    fn test_build_skips_key_for_open_operations() {
        let metadata = RequestMetadata::build(
            Operation::AmIRoaming,
            vec!["-34.93".into(), "138.6".into()],
            "secret",
        )
        .unwrap();

        assert_eq!(metadata.params.len(), 2);
        assert!(metadata.param("key").is_none());
    }

    #[test]
    fn test_empty_key_is_still_bound() {
        let metadata =
            RequestMetadata::build(Operation::EmailVerify, vec!["a@b.co".into()], "").unwrap();

        assert_eq!(metadata.param("key"), Some(&ParamValue::Text(String::new())));
        assert_eq!(
            metadata.url(BASE),
            format!("{BASE}/email-verify?emailAddress=a%40b.co&key=")
        );
    }

    #[test]
    fn test_build_rejects_wrong_arity() {
        let result = RequestMetadata::build(Operation::TimezoneInfo, vec!["UTC".into()], "k");
        match result {
            Err(Error::ArgumentMismatch {
                operation,
                expected,
                actual,
            }) => {
                assert_eq!(operation, Operation::TimezoneInfo);
                assert_eq!(expected, 3);
                assert_eq!(actual, 2);
            }
            other => panic!("Expected ArgumentMismatch, got {:?}", other),
        }

        let result = RequestMetadata::build(Operation::ClientIp, vec!["extra".into()], "");
        assert!(matches!(result, Err(Error::ArgumentMismatch { .. })));
    }

    #[test]
    fn test_format_url_without_params_has_no_query() {
        let url = format_url(BASE, "client-info", &[]);
        assert_eq!(url, format!("{BASE}/client-info"));
        assert!(!url.contains('?'));
    }

    #[test]
    fn test_format_url_is_deterministic() {
        let params = vec![
            ("userAgentRaw", ParamValue::from("Mozilla/5.0 (X11; Linux x86_64)")),
            ("key", ParamValue::from("k")),
        ];
        let first = format_url(BASE, "user-agent-info", &params);
        let second = format_url(BASE, "user-agent-info", &params);
        assert_eq!(first, second);
        let expected = "user-agent-info?userAgentRaw=Mozilla%2F5.0+%28X11%3B+Linux+x86_64%29&key=k";
        assert_eq!(first, format!("{BASE}/{expected}"));
    }

    #[test]
    fn test_param_value_rendering() {
        assert_eq!(ParamValue::Flag(false).to_string(), "false");
        assert_eq!(ParamValue::Flag(true).to_string(), "true");
        assert_eq!(ParamValue::Integer(-42).to_string(), "-42");
        assert_eq!(ParamValue::from(7u32), ParamValue::Integer(7));
        assert_eq!(ParamValue::from("AS13335").to_string(), "AS13335");
    }
}
