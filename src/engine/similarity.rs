// ==========================================
// 车队燃油调拨系统 - 字符串相似度
// ==========================================
// 职责: 为路线/装货点模糊匹配提供唯一、确定性的相似度函数
// 规则: 归一化编辑距离比率 = 1 - levenshtein(a, b) / max(len(a), len(b))
// 红线: 阈值固定且有测试背书, 不允许临场启发式
// ==========================================

/// 模糊匹配命中阈值
///
/// 相似度 ≥ 0.75 视为命中 (如 "KOLWEZI DEPOT" vs "KOLWEZI" = 0.54 不命中,
/// "KOLWESI" vs "KOLWEZI" = 0.86 命中)
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.75;

/// 建议列表收录阈值
///
/// 未命中时, 相似度 ≥ 0.40 的路线进入人工复核建议
pub const SUGGESTION_THRESHOLD: f64 = 0.40;

/// 建议列表最大条数
pub const MAX_SUGGESTIONS: usize = 3;

/// 计算两个字符串的归一化相似度
///
/// # 规则
/// - 双空 → 1.0 (完全相同)
/// - 单空 → 0.0
/// - 其他 → 1 - levenshtein / max_len, 值域 [0, 1]
///
/// 按字符 (char) 计数, 调用方负责大小写归一化
pub fn similarity(a: &str, b: &str) -> f64 {
    let a_len = a.chars().count();
    let b_len = b.chars().count();

    if a_len == 0 && b_len == 0 {
        return 1.0;
    }
    if a_len == 0 || b_len == 0 {
        return 0.0;
    }

    let dist = levenshtein(a, b);
    1.0 - dist as f64 / a_len.max(b_len) as f64
}

/// 经典 Levenshtein 编辑距离 (插入/删除/替换均记 1)
///
/// 滚动单行 DP, 空间 O(min(m, n))
fn levenshtein(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    // 保证内层循环走较短的串
    let (short, long) = if a_chars.len() <= b_chars.len() {
        (&a_chars, &b_chars)
    } else {
        (&b_chars, &a_chars)
    };

    let mut prev_row: Vec<usize> = (0..=short.len()).collect();

    for (i, lc) in long.iter().enumerate() {
        let mut prev_diag = prev_row[0];
        prev_row[0] = i + 1;

        for (j, sc) in short.iter().enumerate() {
            let cost = if lc == sc { 0 } else { 1 };
            let val = (prev_diag + cost)
                .min(prev_row[j] + 1)
                .min(prev_row[j + 1] + 1);
            prev_diag = prev_row[j + 1];
            prev_row[j + 1] = val;
        }
    }

    prev_row[short.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_basics() {
        assert_eq!(levenshtein("KOLWEZI", "KOLWEZI"), 0);
        assert_eq!(levenshtein("KOLWEZI", "KOLWESI"), 1);
        assert_eq!(levenshtein("", "ABC"), 3);
        assert_eq!(levenshtein("KITWE", ""), 5);
    }

    #[test]
    fn test_similarity_identical_and_empty() {
        assert_eq!(similarity("LUSAKA", "LUSAKA"), 1.0);
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(similarity("", "LUSAKA"), 0.0);
    }

    #[test]
    fn test_similarity_single_edit_above_threshold() {
        // 7 字符串 1 处替换: 1 - 1/7 ≈ 0.857
        let s = similarity("KOLWESI", "KOLWEZI");
        assert!(s > FUZZY_MATCH_THRESHOLD, "score = {}", s);
    }

    #[test]
    fn test_similarity_unrelated_below_suggestion_threshold() {
        let s = similarity("NOWHERESVILLE", "LUSAKA");
        assert!(s < SUGGESTION_THRESHOLD, "score = {}", s);
    }

    #[test]
    fn test_similarity_symmetric() {
        let ab = similarity("FUNGURUME", "FISENGE");
        let ba = similarity("FISENGE", "FUNGURUME");
        assert_eq!(ab, ba);
    }
}
