//! 应答解析器
//!
//! 按固定优先级依次查询各知识分类，首个命中者短路返回：
//! 疾病 → 通用意图 → 心理健康 → 健身问答 → 营养建议 → 兜底回复。
//! 该顺序是产品决策，调整会改变可观察行为（同时命中疾病名和
//! 心理健康表达时必须返回疾病信息）。

use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engine::matcher::{Matcher, normalize, similarity};
use crate::knowledge::records::{DiseaseRecord, IntentRecord, NutritionTip, QaRecord};
use crate::knowledge::store::KnowledgeStore;

/// 兜底回复（链条的最后一环，保证 resolve 永不失败）
pub const FALLBACK_MESSAGE: &str = "I'm not sure I understood that. I can help with disease \
information (try 'tell me about diabetes'), nutrition facts, fitness advice, mental health \
support, and health calculators (BMI, water intake, calories). Could you rephrase your question?";

/// 空输入的提示
pub const EMPTY_INPUT_MESSAGE: &str = "I didn't catch that. Could you please say something?";

/// 问答分类关键词出现在输入中时的保底得分
const CATEGORY_BOOST: f64 = 0.7;

/// 触发紧急求助资源提示的表达
const CRISIS_KEYWORDS: [&str; 4] = ["suicide", "kill myself", "end my life", "want to die"];

const CRISIS_RESOURCES: &str = "\n\nMental Health Resources:\n\
- National Suicide Prevention Lifeline: 988 (US)\n\
- Crisis Text Line: Text HOME to 741741\n\
- If this is an emergency, please call emergency services immediately.";

/// 应答解析器
///
/// 纯函数式：除内部随机数源外不产生副作用，聊天记录的持久化
/// 由调用方负责。随机数源可注入种子以便测试确定性。
pub struct ResponseResolver {
    store: Arc<KnowledgeStore>,
    matcher: Matcher,
    rng: Mutex<StdRng>,
}

impl ResponseResolver {
    /// 创建解析器，随机数源来自操作系统熵
    pub fn new(store: Arc<KnowledgeStore>, matcher: Matcher) -> Self {
        Self {
            store,
            matcher,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// 创建带固定随机种子的解析器（用于确定性测试）
    pub fn with_seed(store: Arc<KnowledgeStore>, matcher: Matcher, seed: u64) -> Self {
        Self {
            store,
            matcher,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// 解析用户输入，总是返回一条回复
    pub fn resolve(&self, input: &str) -> String {
        let query = normalize(input);
        if query.is_empty() {
            return EMPTY_INPUT_MESSAGE.to_string();
        }

        self.check_disease(&query)
            .or_else(|| self.match_intent(&query))
            .or_else(|| self.match_mental_health(&query))
            .or_else(|| self.match_fitness(&query))
            .or_else(|| self.match_nutrition(&query))
            .unwrap_or_else(|| FALLBACK_MESSAGE.to_string())
    }

    /// 疾病信息查询
    ///
    /// 触发条件是疾病名整体作为子串出现在输入中（大小写不敏感），
    /// 不经过模糊阈值。
    fn check_disease(&self, query: &str) -> Option<String> {
        self.store
            .diseases
            .iter()
            .find(|d| !d.name.is_empty() && query.contains(&d.name.to_lowercase()))
            .map(format_disease)
    }

    /// 通用意图匹配，命中后从候选回复中随机选取一条
    fn match_intent(&self, query: &str) -> Option<String> {
        let record = self.match_intent_records(query, &self.store.intents)?;
        self.pick_response(&record.responses)
    }

    /// 心理健康问答，与通用意图同构；紧急表达附加求助资源
    fn match_mental_health(&self, query: &str) -> Option<String> {
        let record = self.match_intent_records(query, &self.store.mental_health)?;
        let mut response = self.pick_response(&record.responses)?;

        if CRISIS_KEYWORDS.iter().any(|k| query.contains(k)) {
            response.push_str(CRISIS_RESOURCES);
        }

        Some(response)
    }

    /// 健身问答：对问题文本做相似度匹配，分类关键词命中时有保底得分
    fn match_fitness(&self, query: &str) -> Option<String> {
        best_qa(query, self.matcher.threshold(), self.store.fitness_qa.iter(), |r: &QaRecord| {
            (r.question.as_str(), r.category.as_str())
        })
        .map(|r| r.answer.clone())
    }

    /// 营养建议：对主题文本做相似度匹配，分类关键词命中时有保底得分
    fn match_nutrition(&self, query: &str) -> Option<String> {
        best_qa(
            query,
            self.matcher.threshold(),
            self.store.nutrition_tips.iter(),
            |r: &NutritionTip| (r.topic.as_str(), r.category.as_str()),
        )
        .map(|r| r.guidance.clone())
    }

    fn match_intent_records<'a>(
        &self,
        query: &str,
        records: &'a [IntentRecord],
    ) -> Option<&'a IntentRecord> {
        let candidates = records.iter().flat_map(|record| {
            record
                .patterns
                .iter()
                .map(move |pattern| (record.tag.as_str(), pattern.as_str()))
        });

        let hit = self.matcher.best_match(query, candidates)?;
        records.iter().find(|r| r.tag == hit.key)
    }

    fn pick_response(&self, responses: &[String]) -> Option<String> {
        if responses.is_empty() {
            return None;
        }
        let mut rng = self.rng.lock().expect("resolver rng lock poisoned");
        let idx = rng.random_range(0..responses.len());
        Some(responses[idx].clone())
    }
}

/// 在问答类记录中选取最佳匹配
///
/// 记录按源文件顺序扫描，严格更高得分才替换，保证平局时先出现者胜。
fn best_qa<'a, T, I, F>(query: &str, threshold: f64, records: I, project: F) -> Option<&'a T>
where
    I: Iterator<Item = &'a T>,
    F: Fn(&'a T) -> (&'a str, &'a str),
{
    let mut best: Option<(&'a T, f64)> = None;

    for record in records {
        let (text, category) = project(record);
        let mut score = similarity(&normalize(text), query);

        let category_phrase = category.to_lowercase().replace('_', " ");
        if !category_phrase.is_empty() && query.contains(&category_phrase) {
            score = score.max(CATEGORY_BOOST);
        }

        if best.map_or(true, |(_, s)| score > s) {
            best = Some((record, score));
        }
    }

    best.filter(|(_, score)| *score >= threshold).map(|(r, _)| r)
}

/// 疾病应答文本：描述、至多 5 条症状、至多 5 条治疗方式
fn format_disease(disease: &DiseaseRecord) -> String {
    let mut response = format!("{}\n\nDescription: {}\n", disease.name, disease.description);

    if !disease.symptoms.is_empty() {
        response.push_str("\nCommon Symptoms:\n");
        for symptom in disease.symptoms.iter().take(5) {
            response.push_str(&format!("- {}\n", symptom));
        }
    }

    if !disease.treatments.is_empty() {
        response.push_str("\nTreatments:\n");
        for treatment in disease.treatments.iter().take(5) {
            response.push_str(&format!("- {}\n", treatment));
        }
    }

    response.push_str(
        "\nNote: This information is for educational purposes only. Please consult a \
healthcare professional for proper diagnosis and treatment.",
    );

    response
}
