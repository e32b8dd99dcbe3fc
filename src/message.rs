use bytes::Bytes;
use std::collections::HashMap;

/// A message to be produced to the broker.
///
/// Built once at the ingress boundary and read-only afterwards; the
/// pipeline only ever borrows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    key: Option<String>,
    headers: HashMap<String, String>,
    content: Bytes,
}

impl Message {
    pub fn new(
        key: Option<String>,
        headers: HashMap<String, String>,
        content: impl Into<Bytes>,
    ) -> Self {
        Self {
            key,
            headers,
            content: content.into(),
        }
    }

    /// Message with a payload only (no key, no headers)
    pub fn from_content(content: impl Into<Bytes>) -> Self {
        Self::new(None, HashMap::new(), content)
    }

    /// Partition / routing affinity key. May be empty.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_accessors() {
        let headers = HashMap::from([("h".to_string(), "v".to_string())]);
        let message = Message::new(Some("k1".to_string()), headers.clone(), b"test".to_vec());

        assert_eq!(message.key(), Some("k1"));
        assert_eq!(message.headers(), &headers);
        assert_eq!(message.content().as_ref(), b"test");
    }

    #[test]
    fn test_empty_content_is_allowed() {
        let message = Message::from_content(Bytes::new());

        assert!(message.key().is_none());
        assert!(message.headers().is_empty());
        assert!(message.content().is_empty());
    }
}
