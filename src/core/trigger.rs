use std::collections::HashMap;
use subtle::ConstantTimeEq;

/// 排程平台呼叫時帶的標頭
pub const SCHEDULER_HEADER: &str = "x-vercel-event-type";
pub const SCHEDULER_EVENT: &str = "scheduled";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerSource {
    Scheduler,
    Bearer,
}

/// 觸發端鑑權：排程標頭或 `Authorization: Bearer <secret>`
#[derive(Debug, Clone)]
pub struct TriggerAuth {
    secret: Option<String>,
}

impl TriggerAuth {
    pub fn new(secret: Option<String>) -> Self {
        Self {
            secret: secret.filter(|s| !s.is_empty()),
        }
    }

    pub fn authorize(&self, headers: &HashMap<String, String>) -> Option<TriggerSource> {
        if header(headers, SCHEDULER_HEADER) == Some(SCHEDULER_EVENT) {
            return Some(TriggerSource::Scheduler);
        }

        let secret = self.secret.as_deref()?;
        let token = header(headers, "authorization")?.strip_prefix("Bearer ")?;
        bool::from(token.as_bytes().ct_eq(secret.as_bytes())).then_some(TriggerSource::Bearer)
    }
}

fn header<'a>(headers: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_scheduler_header_is_accepted() {
        let auth = TriggerAuth::new(None);
        assert_eq!(
            auth.authorize(&headers(&[("X-Vercel-Event-Type", "scheduled")])),
            Some(TriggerSource::Scheduler)
        );
    }

    #[test]
    fn test_bearer_token_must_match() {
        let auth = TriggerAuth::new(Some("s3cret".to_string()));
        assert_eq!(
            auth.authorize(&headers(&[("Authorization", "Bearer s3cret")])),
            Some(TriggerSource::Bearer)
        );
        assert_eq!(auth.authorize(&headers(&[("authorization", "Bearer wrong")])), None);
        assert_eq!(auth.authorize(&headers(&[("authorization", "s3cret")])), None);
        assert_eq!(auth.authorize(&headers(&[])), None);
    }

    #[test]
    fn test_empty_secret_never_matches() {
        let auth = TriggerAuth::new(Some(String::new()));
        assert_eq!(auth.authorize(&headers(&[("authorization", "Bearer ")])), None);
    }
}
