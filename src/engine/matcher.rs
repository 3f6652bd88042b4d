//! 模糊匹配器
//!
//! 对用户输入和候选表达方式计算归一化相似度，取得分最高且不低于
//! 阈值的候选。相似度采用 difflib 风格的序列比值（字符级），
//! 对称，相同串为 1.0，字符集完全不相交为 0.0。

use similar::TextDiff;

/// 意图匹配的默认相似度阈值
///
/// 行为兼容保留的经验值，无权威出处，不建议调优。
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.6;

/// 候选表达方式作为子串完整出现在输入中时的保底得分
const SUBSTRING_BOOST: f64 = 0.8;

/// 规范化输入：小写化并压缩空白
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// 计算两个字符串的相似度，范围 [0, 1]
///
/// ratio = 2 * 公共字符数 / 总字符数，与参数顺序无关。
pub fn similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    TextDiff::from_chars(a, b).ratio() as f64
}

/// 匹配结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match<'a> {
    /// 命中候选的键
    pub key: &'a str,
    /// 相似度得分
    pub score: f64,
}

/// 模糊匹配器
#[derive(Debug, Clone, Copy)]
pub struct Matcher {
    threshold: f64,
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Matcher {
    /// 使用默认阈值创建匹配器
    pub fn new() -> Self {
        Self {
            threshold: DEFAULT_FUZZY_THRESHOLD,
        }
    }

    /// 使用指定阈值创建匹配器
    pub fn with_threshold(threshold: f64) -> Self {
        Self { threshold }
    }

    /// 当前阈值
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// 单个候选表达方式的得分
    ///
    /// 除相似度外，候选完整出现在输入中时得分至少为 0.8。
    /// 两个参数都应已经过 [`normalize`] 处理。
    pub fn score_pattern(&self, query: &str, pattern: &str) -> f64 {
        let mut score = similarity(pattern, query);
        if !pattern.is_empty() && query.contains(pattern) {
            score = score.max(SUBSTRING_BOOST);
        }
        score
    }

    /// 在候选集合中查找最佳匹配
    ///
    /// 候选按迭代顺序扫描，得分严格更高才替换当前最佳，
    /// 因此平局时保留先出现的候选（稳定、确定）。
    /// 最佳得分低于阈值、输入为空或候选集为空时返回 `None`。
    pub fn best_match<'a, I>(&self, query: &str, candidates: I) -> Option<Match<'a>>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let query = normalize(query);
        if query.is_empty() {
            return None;
        }

        let mut best: Option<Match<'a>> = None;

        for (key, pattern) in candidates {
            let score = self.score_pattern(&query, &normalize(pattern));
            if best.map_or(true, |b| score > b.score) {
                best = Some(Match { key, score });
            }
        }

        best.filter(|m| m.score >= self.threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_similarity_identity() {
        for s in ["", "a", "hello", "how do i lose weight"] {
            assert_eq!(similarity(s, s), 1.0);
        }
    }

    #[test]
    fn test_similarity_disjoint_charsets() {
        assert_eq!(similarity("abc", "xyz"), 0.0);
        assert_eq!(similarity("hello", "qz"), 0.0);
    }

    #[test]
    fn test_similarity_symmetric() {
        let pairs = [("hello", "help"), ("workout", "work out"), ("abc", "abd")];
        for (a, b) in pairs {
            assert!((similarity(a, b) - similarity(b, a)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_similarity_empty_vs_nonempty() {
        assert_eq!(similarity("", "hello"), 0.0);
        assert_eq!(similarity("hello", ""), 0.0);
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("  Hello   World "), "hello world");
        assert_eq!(normalize("\tHOW\nare  you"), "how are you");
    }

    #[test]
    fn test_best_match_returns_candidate_from_set() {
        let matcher = Matcher::new();
        let candidates = vec![("greeting", "hello"), ("farewell", "goodbye")];

        let m = matcher.best_match("hello", candidates.clone()).unwrap();
        assert!(candidates.iter().any(|(k, _)| *k == m.key));
        assert_eq!(m.key, "greeting");
        assert_eq!(m.score, 1.0);
    }

    #[test]
    fn test_best_match_below_threshold_is_none() {
        let matcher = Matcher::new();
        let candidates = vec![("greeting", "hello"), ("farewell", "goodbye")];
        assert!(matcher.best_match("qqqq", candidates).is_none());
    }

    #[test]
    fn test_best_match_empty_query_is_none() {
        let matcher = Matcher::new();
        assert!(matcher.best_match("", vec![("greeting", "hello")]).is_none());
        assert!(matcher.best_match("   ", vec![("greeting", "hello")]).is_none());
    }

    #[test]
    fn test_best_match_empty_candidates_is_none() {
        let matcher = Matcher::new();
        assert!(matcher.best_match("hello", Vec::new()).is_none());
    }

    #[test]
    fn test_best_match_tie_keeps_first() {
        let matcher = Matcher::new();
        // Identical patterns under two keys: the first in iteration order wins.
        let candidates = vec![("first", "hello"), ("second", "hello")];
        let m = matcher.best_match("hello", candidates).unwrap();
        assert_eq!(m.key, "first");
    }

    #[test]
    fn test_substring_boost() {
        let matcher = Matcher::new();
        // Pattern far shorter than the query: raw ratio is low, containment lifts it.
        let query = "could you please tell me how to do a proper warm up before running";
        let candidates = vec![("warmup", "warm up")];
        let m = matcher.best_match(query, candidates).unwrap();
        assert!(m.score >= 0.8);
    }

    #[test]
    fn test_case_insensitive() {
        let matcher = Matcher::new();
        let m = matcher
            .best_match("HELLO", vec![("greeting", "hello")])
            .unwrap();
        assert_eq!(m.score, 1.0);
    }
}
