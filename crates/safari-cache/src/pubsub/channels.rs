//! Pub/Sub channel definitions.

/// Channel the site renderer listens on for stale page paths
pub const REVALIDATE_CHANNEL: &str = "site:revalidate";

/// Pub/Sub channel types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PubSubChannel {
    /// On-demand page revalidation
    Revalidate,
    /// Custom channel name
    Custom(String),
}

impl PubSubChannel {
    #[must_use]
    pub fn custom(name: impl Into<String>) -> Self {
        Self::Custom(name.into())
    }

    /// Redis channel name
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Revalidate => REVALIDATE_CHANNEL.to_string(),
            Self::Custom(name) => name.clone(),
        }
    }
}

impl std::fmt::Display for PubSubChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_names() {
        assert_eq!(PubSubChannel::Revalidate.name(), "site:revalidate");
        assert_eq!(PubSubChannel::custom("preview:flush").name(), "preview:flush");
    }
}
