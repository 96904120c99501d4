use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Integration {
    pub id: String,
    pub client_id: String,
    pub provider: String,
    pub account_id: Option<String>,
    pub status: String,
    pub last_sync_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Integration {
    /// A connection without a selected account (property, ad account...) is only partial.
    pub fn connect(client_id: String, provider: Provider, account_id: Option<String>) -> Self {
        let now = Utc::now();
        let status = if account_id.is_some() { "CONNECTED" } else { "PARTIAL" };
        Self {
            id: Uuid::new_v4().to_string(),
            client_id,
            provider: provider.key.to_string(),
            account_id,
            status: status.to_string(),
            last_sync_at: Some(now),
            created_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == "CONNECTED" || self.status == "PARTIAL"
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Provider {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub available: bool,
}

pub const PROVIDERS: &[Provider] = &[
    Provider {
        key: "GOOGLE_ANALYTICS",
        name: "Google Analytics 4",
        description: "Connect to Google Analytics 4 to pull website traffic and user behavior data.",
        available: true,
    },
    Provider {
        key: "SEARCH_CONSOLE",
        name: "Google Search Console",
        description: "Connect to Search Console for SEO performance and keyword rankings.",
        available: true,
    },
    Provider {
        key: "GOOGLE_ADS",
        name: "Google Ads",
        description: "Connect to Google Ads for advertising performance metrics.",
        available: true,
    },
    Provider {
        key: "FACEBOOK_ADS",
        name: "Facebook Ads",
        description: "Connect to Meta Ads Manager for social advertising data.",
        available: false,
    },
    Provider {
        key: "LINKEDIN_ADS",
        name: "LinkedIn Ads",
        description: "Connect to LinkedIn Campaign Manager for B2B advertising.",
        available: false,
    },
];

pub fn find_provider(key: &str) -> Option<Provider> {
    PROVIDERS.iter().copied().find(|p| p.key == key)
}

#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum ProviderStatus {
    Connected,
    Partial,
    Disconnected,
    ComingSoon,
}

#[derive(Debug, Serialize)]
pub struct ProviderSummary {
    #[serde(flatten)]
    pub provider: Provider,
    pub connected: usize,
    pub total: usize,
    pub status: ProviderStatus,
    pub last_sync: Option<DateTime<Utc>>,
}

/// Roll a team's integrations up into one line per provider.
pub fn summarize_providers(integrations: &[Integration], total_clients: usize) -> Vec<ProviderSummary> {
    PROVIDERS
        .iter()
        .map(|provider| {
            if !provider.available {
                return ProviderSummary {
                    provider: *provider,
                    connected: 0,
                    total: 0,
                    status: ProviderStatus::ComingSoon,
                    last_sync: None,
                };
            }

            let active: Vec<&Integration> = integrations
                .iter()
                .filter(|i| i.provider == provider.key && i.is_active())
                .collect();

            let status = if active.is_empty() {
                ProviderStatus::Disconnected
            } else if active.iter().any(|i| i.status == "PARTIAL") {
                ProviderStatus::Partial
            } else {
                ProviderStatus::Connected
            };

            ProviderSummary {
                provider: *provider,
                connected: active.len(),
                total: total_clients,
                status,
                last_sync: active.iter().filter_map(|i| i.last_sync_at).max(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn integration(provider: &str, status: &str) -> Integration {
        Integration {
            id: Uuid::new_v4().to_string(),
            client_id: "c1".to_string(),
            provider: provider.to_string(),
            account_id: None,
            status: status.to_string(),
            last_sync_at: Some(Utc::now()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn summary_reports_each_provider_once() {
        let summaries = summarize_providers(&[], 3);
        assert_eq!(summaries.len(), PROVIDERS.len());
        assert!(summaries.iter().all(|s| s.connected == 0));
    }

    #[test]
    fn unavailable_providers_are_coming_soon() {
        let summaries = summarize_providers(&[integration("FACEBOOK_ADS", "CONNECTED")], 1);
        let fb = summaries.iter().find(|s| s.provider.key == "FACEBOOK_ADS").unwrap();
        assert_eq!(fb.status, ProviderStatus::ComingSoon);
        assert_eq!(fb.connected, 0);
    }

    #[test]
    fn partial_connection_marks_provider_partial() {
        let list = vec![
            integration("GOOGLE_ADS", "CONNECTED"),
            integration("GOOGLE_ADS", "PARTIAL"),
            integration("GOOGLE_ANALYTICS", "CONNECTED"),
            integration("SEARCH_CONSOLE", "DISCONNECTED"),
        ];
        let summaries = summarize_providers(&list, 4);

        let ads = summaries.iter().find(|s| s.provider.key == "GOOGLE_ADS").unwrap();
        assert_eq!(ads.status, ProviderStatus::Partial);
        assert_eq!(ads.connected, 2);
        assert_eq!(ads.total, 4);

        let ga = summaries.iter().find(|s| s.provider.key == "GOOGLE_ANALYTICS").unwrap();
        assert_eq!(ga.status, ProviderStatus::Connected);
        assert!(ga.last_sync.is_some());

        let gsc = summaries.iter().find(|s| s.provider.key == "SEARCH_CONSOLE").unwrap();
        assert_eq!(gsc.status, ProviderStatus::Disconnected);
    }

    #[test]
    fn connect_without_account_is_partial() {
        let provider = find_provider("GOOGLE_ANALYTICS").unwrap();
        assert_eq!(Integration::connect("c".into(), provider, None).status, "PARTIAL");
        assert_eq!(Integration::connect("c".into(), provider, Some("ga-1".into())).status, "CONNECTED");
    }
}
