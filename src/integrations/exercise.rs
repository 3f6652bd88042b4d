//! 运动建议查询
//!
//! 调用 ExerciseDB（RapidAPI）按身体部位获取锻炼动作，随机抽取
//! 若干条格式化返回。

use rand::seq::IndexedRandom;
use serde::Deserialize;
use tracing::warn;

use crate::config::config::ExternalApiConfig;
use crate::integrations::build_http_client;

const RAPIDAPI_HOST: &str = "exercisedb.p.rapidapi.com";

/// 用户口语到 ExerciseDB 身体部位的映射
const BODY_PART_MAPPING: [(&str, &str); 13] = [
    ("chest", "chest"),
    ("back", "back"),
    ("legs", "upper legs"),
    ("leg", "upper legs"),
    ("shoulders", "shoulders"),
    ("shoulder", "shoulders"),
    ("arms", "upper arms"),
    ("arm", "upper arms"),
    ("biceps", "upper arms"),
    ("triceps", "upper arms"),
    ("abs", "waist"),
    ("core", "waist"),
    ("cardio", "cardio"),
];

#[derive(Debug, Clone, Deserialize)]
struct Exercise {
    #[serde(default)]
    name: String,
    #[serde(default)]
    equipment: String,
    #[serde(default)]
    target: String,
}

/// ExerciseDB 客户端
#[derive(Debug, Clone)]
pub struct ExerciseClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl ExerciseClient {
    /// 按外部 API 配置创建客户端
    pub fn new(config: &ExternalApiConfig) -> Self {
        Self {
            http: build_http_client(config.request_timeout),
            api_key: config.rapid_api_key.clone(),
            base_url: config.exercise_api_url.clone(),
        }
    }

    /// 查询某身体部位的锻炼建议，总是返回用户可读文本
    pub async fn suggest(&self, body_part: &str, limit: usize) -> String {
        let Some(api_key) = &self.api_key else {
            return "Exercise suggestions are currently unavailable (no API key configured)."
                .to_string();
        };

        let target = map_body_part(body_part);
        let url = format!("{}/bodyPart/{}", self.base_url, urlencoding::encode(target));

        let response = self
            .http
            .get(&url)
            .header("X-RapidAPI-Key", api_key)
            .header("X-RapidAPI-Host", RAPIDAPI_HOST)
            // Over-fetch so the random sample has some variety.
            .query(&[("limit", (limit * 2).to_string())])
            .send()
            .await;

        let response = match response {
            Ok(r) => r,
            Err(e) if e.is_timeout() => {
                return "The exercise service timed out. Please try again.".to_string();
            }
            Err(e) => {
                warn!("ExerciseDB request failed: {}", e);
                return "Network error: unable to reach the exercise service right now."
                    .to_string();
            }
        };

        if !response.status().is_success() {
            warn!("ExerciseDB returned status {}", response.status());
            return "Unable to fetch exercises right now. Please try again later.".to_string();
        }

        let exercises: Vec<Exercise> = match response.json().await {
            Ok(list) => list,
            Err(e) => {
                warn!("ExerciseDB returned invalid body: {}", e);
                return "Unable to fetch exercises right now. Please try again later.".to_string();
            }
        };

        if exercises.is_empty() {
            return format!(
                "No exercises found for '{}'. Try: chest, back, legs, shoulders, arms, or abs.",
                body_part
            );
        }

        let mut rng = rand::rng();
        let selected: Vec<&Exercise> = exercises.choose_multiple(&mut rng, limit).collect();

        format_exercises(body_part, &selected)
    }
}

fn map_body_part(body_part: &str) -> &str {
    let lower = body_part.trim().to_lowercase();
    BODY_PART_MAPPING
        .iter()
        .find(|(from, _)| *from == lower)
        .map(|(_, to)| *to)
        .unwrap_or_else(|| {
            BODY_PART_MAPPING
                .iter()
                .find(|(from, _)| lower.contains(from))
                .map(|(_, to)| *to)
                .unwrap_or("chest")
        })
}

fn format_exercises(body_part: &str, exercises: &[&Exercise]) -> String {
    let mut result = format!("Top {} exercises for {}:\n\n", exercises.len(), body_part);

    for (i, exercise) in exercises.iter().enumerate() {
        result.push_str(&format!(
            "{}. {}\n   Equipment: {}\n   Target: {}\n\n",
            i + 1,
            exercise.name,
            if exercise.equipment.is_empty() {
                "bodyweight"
            } else {
                &exercise.equipment
            },
            exercise.target
        ));
    }

    result.push_str(
        "Tips: warm up before exercising, focus on proper form over speed, start with \
lighter weights and progress gradually, and rest 48 hours between training the same \
muscle group.",
    );

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, api_key: Option<&str>) -> ExerciseClient {
        let config = ExternalApiConfig {
            rapid_api_key: api_key.map(String::from),
            exercise_api_url: format!("{}/exercises", server.uri()),
            request_timeout: 5,
            ..ExternalApiConfig::default()
        };
        ExerciseClient::new(&config)
    }

    #[test]
    fn test_body_part_mapping() {
        assert_eq!(map_body_part("legs"), "upper legs");
        assert_eq!(map_body_part("BICEPS"), "upper arms");
        assert_eq!(map_body_part("core"), "waist");
        // Unknown parts fall back to chest.
        assert_eq!(map_body_part("wings"), "chest");
    }

    #[tokio::test]
    async fn test_suggest_formats_exercises() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/exercises/bodyPart/chest"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"name": "push up", "equipment": "body weight", "target": "pectorals"},
                {"name": "bench press", "equipment": "barbell", "target": "pectorals"}
            ])))
            .mount(&server)
            .await;

        let reply = client_for(&server, Some("test-key")).suggest("chest", 2).await;
        assert!(reply.contains("exercises for chest"));
        assert!(reply.contains("Equipment:"));
        assert!(reply.contains("Tips:"));
    }

    #[tokio::test]
    async fn test_suggest_without_api_key() {
        let server = MockServer::start().await;
        let reply = client_for(&server, None).suggest("chest", 5).await;
        assert!(reply.contains("unavailable"));
    }

    #[tokio::test]
    async fn test_suggest_handles_empty_result() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let reply = client_for(&server, Some("test-key")).suggest("wings", 5).await;
        assert!(reply.contains("No exercises found"));
    }

    #[tokio::test]
    async fn test_suggest_handles_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let reply = client_for(&server, Some("test-key")).suggest("back", 5).await;
        assert!(reply.contains("Unable to fetch exercises"));
    }
}
