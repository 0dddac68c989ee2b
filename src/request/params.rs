use http::Request;
use std::collections::HashMap;
use std::iter::FromIterator;

/// Form body parameters, inserted as a request extension by the host.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormParams(HashMap<String, String>);

impl FormParams {
    pub fn from_urlencoded(body: &[u8]) -> Self {
        form_urlencoded::parse(body).into_owned().collect()
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

impl FromIterator<(String, String)> for FormParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

pub(crate) fn lookup<B>(req: &Request<B>, name: &str) -> Option<String> {
    let form = req
        .extensions()
        .get::<FormParams>()
        .and_then(|form| form.get(name));
    if let Some(value) = form {
        return Some(value.to_owned());
    }

    req.uri().query().and_then(|query| query_value(query, name))
}

fn query_value(query: &str, name: &str) -> Option<String> {
    form_urlencoded::parse(query.as_bytes())
        .filter(|(key, _)| key == name)
        .last()
        .map(|(_, value)| value.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_is_percent_decoded() {
        assert_eq!(
            query_value("a=1&api_token=abc%2B%2F%3D&b=2", "api_token").as_deref(),
            Some("abc+/=")
        );
        assert_eq!(query_value("a=1", "api_token"), None);
    }

    #[test]
    fn last_query_occurrence_wins() {
        assert_eq!(query_value("t=1&t=2", "t").as_deref(), Some("2"));
    }

    #[test]
    fn form_params_shadow_query() {
        let mut req = Request::builder()
            .uri("http://example.com/test?api_token=from-query")
            .body(())
            .unwrap();
        assert_eq!(lookup(&req, "api_token").as_deref(), Some("from-query"));

        req.extensions_mut()
            .insert(FormParams::from_urlencoded(b"api_token=from+form"));
        assert_eq!(lookup(&req, "api_token").as_deref(), Some("from form"));
        assert_eq!(lookup(&req, "missing"), None);
    }
}
