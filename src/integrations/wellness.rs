//! 励志名言与健康小贴士
//!
//! 名言优先从外部接口获取，失败时使用内置列表；小贴士为纯内置列表。

use rand::seq::IndexedRandom;
use serde::Deserialize;
use tracing::debug;

use crate::config::config::ExternalApiConfig;
use crate::integrations::build_http_client;

/// 接口不可用时的内置名言
const FALLBACK_QUOTES: [&str; 10] = [
    "'The only bad workout is the one that didn't happen.'",
    "'Take care of your body. It's the only place you have to live.' - Jim Rohn",
    "'Your health is an investment, not an expense.'",
    "'Progress over perfection. Every small step counts!'",
    "'Physical fitness is the first requisite of happiness.' - Joseph Pilates",
    "'Health is wealth.'",
    "'The groundwork for all happiness is good health.' - Leigh Hunt",
    "'A healthy outside starts from the inside.'",
    "'You don't have to be extreme, just consistent.'",
    "'The body achieves what the mind believes.'",
];

/// 内置健康小贴士
const WELLNESS_TIPS: [&str; 15] = [
    "Stay hydrated! Aim for 8 glasses of water daily.",
    "Get 7-9 hours of sleep for optimal health and recovery.",
    "Fill half your plate with vegetables at each meal.",
    "Take a 10-minute walk after meals to aid digestion.",
    "Practice deep breathing for 5 minutes to reduce stress.",
    "Take regular breaks from screens to rest your eyes.",
    "Get 15-30 minutes of sunlight daily for vitamin D.",
    "Include protein in every meal to stay satiated.",
    "Listen to music you enjoy - it's good for mental health!",
    "Connect with friends and family regularly for emotional wellbeing.",
    "Learn something new every day to keep your mind sharp.",
    "Wash your hands regularly to prevent illness.",
    "Stand up and stretch every hour if you sit a lot.",
    "Limit sugary drinks - choose water or unsweetened tea.",
    "Add herbs and spices to meals for extra nutrients and flavor.",
];

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(default)]
    text: String,
    #[serde(default)]
    author: Option<String>,
}

/// 名言与小贴士提供者
#[derive(Debug, Clone)]
pub struct WellnessProvider {
    http: reqwest::Client,
    quotes_url: String,
}

impl WellnessProvider {
    /// 按外部 API 配置创建提供者
    pub fn new(config: &ExternalApiConfig) -> Self {
        Self {
            http: build_http_client(config.request_timeout),
            quotes_url: config.quotes_api_url.clone(),
        }
    }

    /// 获取一条励志名言，接口失败时使用内置列表
    pub async fn motivational_quote(&self) -> String {
        match self.fetch_quote().await {
            Some(quote) => quote,
            None => {
                let mut rng = rand::rng();
                FALLBACK_QUOTES
                    .choose(&mut rng)
                    .map(|q| q.to_string())
                    .unwrap_or_else(|| FALLBACK_QUOTES[0].to_string())
            }
        }
    }

    /// 获取一条健康小贴士（纯内置，不依赖网络）
    pub fn wellness_tip(&self) -> String {
        let mut rng = rand::rng();
        WELLNESS_TIPS
            .choose(&mut rng)
            .map(|t| t.to_string())
            .unwrap_or_else(|| WELLNESS_TIPS[0].to_string())
    }

    async fn fetch_quote(&self) -> Option<String> {
        let response = match self.http.get(&self.quotes_url).send().await {
            Ok(r) if r.status().is_success() => r,
            Ok(r) => {
                debug!("Quotes API returned status {}", r.status());
                return None;
            }
            Err(e) => {
                debug!("Quotes API request failed: {}", e);
                return None;
            }
        };

        let quotes: Vec<Quote> = response.json().await.ok()?;
        let mut rng = rand::rng();
        let quote = quotes.choose(&mut rng)?;

        if quote.text.is_empty() {
            return None;
        }

        match quote.author.as_deref() {
            Some(author) if !author.is_empty() && author != "type.fit" => {
                Some(format!("\"{}\" - {}", quote.text, author))
            }
            _ => Some(format!("\"{}\"", quote.text)),
        }
    }
}
