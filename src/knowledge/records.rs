use serde::{Deserialize, Serialize};

/// 意图记录
///
/// 一个意图对应一组用户表达方式（patterns）和一组候选回复（responses），
/// 命中后从候选回复中随机选取一条。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentRecord {
    /// 意图标签（分类内唯一）
    pub tag: String,
    /// 用户表达方式列表（按文件顺序匹配）
    pub patterns: Vec<String>,
    /// 候选回复列表
    pub responses: Vec<String>,
}

/// 疾病记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiseaseRecord {
    /// 疾病名称（唯一）
    pub name: String,
    /// 疾病描述
    pub description: String,
    /// 常见症状
    #[serde(default)]
    pub symptoms: Vec<String>,
    /// 常见治疗方式
    #[serde(default)]
    pub treatments: Vec<String>,
}

/// 健身问答记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaRecord {
    /// 分类关键词（下划线分隔）
    pub category: String,
    /// 问题
    pub question: String,
    /// 回答
    pub answer: String,
}

/// 营养建议记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutritionTip {
    /// 分类关键词（下划线分隔）
    pub category: String,
    /// 主题
    pub topic: String,
    /// 建议内容
    pub guidance: String,
}

/// intents.json / mental_health_qa.json 文件格式
#[derive(Debug, Clone, Deserialize)]
pub struct IntentFile {
    pub intents: Vec<IntentRecord>,
}

/// diseases.json 文件格式
#[derive(Debug, Clone, Deserialize)]
pub struct DiseaseFile {
    pub diseases: Vec<DiseaseRecord>,
}

/// fitness_qa.json 文件格式
#[derive(Debug, Clone, Deserialize)]
pub struct FitnessFile {
    pub fitness_qa: Vec<QaRecord>,
}

/// nutrition_tips.json 文件格式
#[derive(Debug, Clone, Deserialize)]
pub struct NutritionFile {
    pub nutrition_tips: Vec<NutritionTip>,
}
