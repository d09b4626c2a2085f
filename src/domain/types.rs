// ==========================================
// 员工画像看板 - 领域类型定义
// ==========================================
// 等级标签: 高/中/低 与 1-5 数值是同一有序等级的两种编码
// 数值评分: 1-5 整数分
// ==========================================

use serde::{Serialize, Serializer};
use std::fmt;

/// 待补充占位文本（文本字段缺失时的默认值）
pub const PLACEHOLDER_TEXT: &str = "待补充";

// ==========================================
// 等级 (Level)
// ==========================================
// 有序: Low < Mid < High
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Low,  // 低
    Mid,  // 中
    High, // 高
}

impl Level {
    /// 从等级文本解析（高/中/低，或 "1"-"5" 数字文本）
    ///
    /// 两端空白会被忽略；其他文本返回 None
    pub fn from_text(text: &str) -> Option<Self> {
        match text.trim() {
            "高" | "5" => Some(Level::High),
            "中" | "4" => Some(Level::Mid),
            "低" | "3" | "2" | "1" => Some(Level::Low),
            _ => None,
        }
    }

    /// 从 1-5 整数解析
    ///
    /// - 5 → 高
    /// - 4 → 中
    /// - 1..=3 → 低
    pub fn from_score(score: i64) -> Option<Self> {
        match score {
            5 => Some(Level::High),
            4 => Some(Level::Mid),
            1..=3 => Some(Level::Low),
            _ => None,
        }
    }

    /// 等级文本
    pub fn as_text(&self) -> &'static str {
        match self {
            Level::Low => "低",
            Level::Mid => "中",
            Level::High => "高",
        }
    }

    /// 等级对应的 1-5 整数分（高=5, 中=4, 低=3）
    pub fn to_score(&self) -> u8 {
        match self {
            Level::Low => 3,
            Level::Mid => 4,
            Level::High => 5,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_text())
    }
}

// ==========================================
// 等级标签 (LevelLabel)
// ==========================================
// 定性维度的取值：可识别的等级，或原样保留的文本（如 "技术弱，中"、"待补充"）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelLabel {
    Rated(Level),
    Unrated(String),
}

impl LevelLabel {
    /// 从文本构造；可识别的等级文本归一为 Rated
    pub fn from_text(text: &str) -> Self {
        match Level::from_text(text) {
            Some(level) => LevelLabel::Rated(level),
            None => LevelLabel::Unrated(text.to_string()),
        }
    }

    /// 从数值构造；仅 1-5 的整数视为等级，其余按文本保留
    pub fn from_number(value: f64) -> Self {
        if value.fract() == 0.0 {
            if let Some(level) = Level::from_score(value as i64) {
                return LevelLabel::Rated(level);
            }
        }
        LevelLabel::Unrated(format_number(value))
    }

    pub fn level(&self) -> Option<Level> {
        match self {
            LevelLabel::Rated(level) => Some(*level),
            LevelLabel::Unrated(_) => None,
        }
    }

    pub fn as_text(&self) -> &str {
        match self {
            LevelLabel::Rated(level) => level.as_text(),
            LevelLabel::Unrated(text) => text,
        }
    }
}

impl Default for LevelLabel {
    fn default() -> Self {
        LevelLabel::Rated(Level::Mid)
    }
}

impl fmt::Display for LevelLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_text())
    }
}

impl Serialize for LevelLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_text())
    }
}

// ==========================================
// 数值评分 (Score)
// ==========================================
// 取值范围 1..=5，缺失/非法时为 3
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Score(u8);

impl Score {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;
    pub const DEFAULT: Score = Score(3);

    /// 构造评分，超出 1-5 返回 None
    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Score(value))
    }

    /// 从任意数值构造：四舍五入后落在 1-5 才有效
    pub fn from_number(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let rounded = value.round();
        if rounded < Self::MIN as f64 || rounded > Self::MAX as f64 {
            return None;
        }
        Some(Score(rounded as u8))
    }

    /// 从文本构造：数字文本按数值处理，否则按等级文本（高=5, 中=4, 低=3）
    pub fn from_text(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        match trimmed.parse::<f64>() {
            Ok(number) => Self::from_number(number),
            Err(_) => Level::from_text(trimmed).map(Score::from),
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for Score {
    fn default() -> Self {
        Score::DEFAULT
    }
}

impl From<Level> for Score {
    fn from(level: Level) -> Self {
        Score(level.to_score())
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 数值格式化：整数不带小数点（4.0 → "4"）
pub(crate) fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_text_roundtrip() {
        for level in [Level::Low, Level::Mid, Level::High] {
            assert_eq!(Level::from_text(level.as_text()), Some(level));
        }
        assert_eq!(Level::from_text(" 高 "), Some(Level::High));
        assert_eq!(Level::from_text("5"), Some(Level::High));
        assert_eq!(Level::from_text("2"), Some(Level::Low));
        assert_eq!(Level::from_text("技术弱，中"), None);
        assert_eq!(Level::from_text("5.0"), None);
    }

    #[test]
    fn test_level_ordering() {
        assert!(Level::Low < Level::Mid);
        assert!(Level::Mid < Level::High);
    }

    #[test]
    fn test_label_from_number() {
        assert_eq!(LevelLabel::from_number(5.0), LevelLabel::Rated(Level::High));
        assert_eq!(LevelLabel::from_number(1.0), LevelLabel::Rated(Level::Low));
        assert_eq!(
            LevelLabel::from_number(4.5),
            LevelLabel::Unrated("4.5".to_string())
        );
        assert_eq!(
            LevelLabel::from_number(0.0),
            LevelLabel::Unrated("0".to_string())
        );
    }

    #[test]
    fn test_label_serializes_as_text() {
        let json = serde_json::to_string(&LevelLabel::Rated(Level::High)).unwrap();
        assert_eq!(json, "\"高\"");
        let json = serde_json::to_string(&LevelLabel::Unrated(PLACEHOLDER_TEXT.into())).unwrap();
        assert_eq!(json, "\"待补充\"");
    }

    #[test]
    fn test_score_parsing() {
        assert_eq!(Score::from_text("高"), Score::new(5));
        assert_eq!(Score::from_text("中"), Score::new(4));
        assert_eq!(Score::from_text("低"), Score::new(3));
        assert_eq!(Score::from_text(" 2 "), Score::new(2));
        // 数字文本不经过等级映射（"2" 仍是 2 分，不是 "低"=3 分）
        assert_eq!(Score::from_text("1"), Score::new(1));
        assert_eq!(Score::from_text(" 高 "), Some(Score::from(Level::High)));
        assert_eq!(Score::from_text("优秀"), None);
        assert_eq!(Score::from_text(""), None);
        assert_eq!(Score::from_number(0.0), None);
        assert_eq!(Score::from_number(7.0), None);
        assert_eq!(Score::from_number(f64::NAN), None);
        assert_eq!(Score::from_number(4.0), Score::new(4));
        assert_eq!(Score::default().value(), 3);
    }
}
