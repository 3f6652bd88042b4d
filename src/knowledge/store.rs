use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::error::{AppError, Result};
use crate::knowledge::records::{
    DiseaseFile, DiseaseRecord, FitnessFile, IntentFile, IntentRecord, NutritionFile, NutritionTip,
    QaRecord,
};

/// 知识库分类对应的文件名
const INTENTS_FILE: &str = "intents.json";
const DISEASES_FILE: &str = "diseases.json";
const MENTAL_HEALTH_FILE: &str = "mental_health_qa.json";
const FITNESS_FILE: &str = "fitness_qa.json";
const NUTRITION_FILE: &str = "nutrition_tips.json";

/// 知识库
///
/// 进程级只读数据，启动时加载一次。记录顺序与源文件一致，
/// 匹配引擎依赖该顺序实现稳定的平局裁决。
#[derive(Debug, Clone, Default)]
pub struct KnowledgeStore {
    /// 通用意图
    pub intents: Vec<IntentRecord>,
    /// 疾病信息
    pub diseases: Vec<DiseaseRecord>,
    /// 心理健康问答（与意图同构：patterns + responses）
    pub mental_health: Vec<IntentRecord>,
    /// 健身问答
    pub fitness_qa: Vec<QaRecord>,
    /// 营养建议
    pub nutrition_tips: Vec<NutritionTip>,
}

impl KnowledgeStore {
    /// 从数据目录加载全部分类
    ///
    /// 任一分类加载失败时记录警告并降级为空集，不让整个进程启动失败。
    /// 重复调用结果一致（幂等）。
    pub fn load(data_dir: &Path) -> Self {
        let intents = Self::load_or_empty(data_dir.join(INTENTS_FILE), |f: IntentFile| f.intents);
        let diseases =
            Self::load_or_empty(data_dir.join(DISEASES_FILE), |f: DiseaseFile| f.diseases);
        let mental_health =
            Self::load_or_empty(data_dir.join(MENTAL_HEALTH_FILE), |f: IntentFile| f.intents);
        let fitness_qa =
            Self::load_or_empty(data_dir.join(FITNESS_FILE), |f: FitnessFile| f.fitness_qa);
        let nutrition_tips = Self::load_or_empty(data_dir.join(NUTRITION_FILE), |f: NutritionFile| {
            f.nutrition_tips
        });

        info!(
            intents = intents.len(),
            diseases = diseases.len(),
            mental_health = mental_health.len(),
            fitness_qa = fitness_qa.len(),
            nutrition_tips = nutrition_tips.len(),
            "Knowledge store loaded"
        );

        Self {
            intents,
            diseases,
            mental_health,
            fitness_qa,
            nutrition_tips,
        }
    }

    /// 加载单个分类文件
    ///
    /// 文件缺失或 JSON 非法时返回 `AppError::DataLoad`，由调用方决定降级策略。
    pub fn load_category<F: DeserializeOwned>(path: &Path) -> Result<F> {
        let raw = fs::read_to_string(path).map_err(|e| {
            AppError::DataLoad(format!("cannot read {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&raw)
            .map_err(|e| AppError::DataLoad(format!("invalid JSON in {}: {}", path.display(), e)))
    }

    fn load_or_empty<F, T, E>(path: PathBuf, extract: E) -> Vec<T>
    where
        F: DeserializeOwned,
        E: FnOnce(F) -> Vec<T>,
    {
        match Self::load_category::<F>(&path) {
            Ok(file) => extract(file),
            Err(e) => {
                warn!("Knowledge category degraded to empty: {}", e);
                Vec::new()
            }
        }
    }

    /// 知识库是否完全为空（所有分类都加载失败或无数据）
    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
            && self.diseases.is_empty()
            && self.mental_health.is_empty()
            && self.fitness_qa.is_empty()
            && self.nutrition_tips.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_data_load_error() {
        let result =
            KnowledgeStore::load_category::<IntentFile>(Path::new("/nonexistent/intents.json"));
        assert!(matches!(result, Err(AppError::DataLoad(_))));
    }

    #[test]
    fn test_malformed_file_is_data_load_error() {
        let path = std::env::temp_dir().join(format!("panacea-{}.json", uuid::Uuid::new_v4()));
        fs::write(&path, "{ not valid json").unwrap();

        let result = KnowledgeStore::load_category::<IntentFile>(&path);
        assert!(matches!(result, Err(AppError::DataLoad(_))));

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_dir_degrades_to_empty_store() {
        let store = KnowledgeStore::load(Path::new("/nonexistent"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_ships_with_bundled_data() {
        let store = KnowledgeStore::load(Path::new("data"));
        assert!(!store.intents.is_empty());
        assert!(!store.diseases.is_empty());
        assert!(store.diseases.iter().any(|d| d.name.eq_ignore_ascii_case("diabetes")));
    }

    #[test]
    fn test_load_is_idempotent() {
        let first = KnowledgeStore::load(Path::new("data"));
        let second = KnowledgeStore::load(Path::new("data"));
        assert_eq!(first.intents.len(), second.intents.len());
        assert_eq!(first.diseases.len(), second.diseases.len());
    }
}
