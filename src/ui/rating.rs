use crate::core::ClassList;
use std::sync::Arc;

pub const MAX_RATING: usize = 5;
pub const ACTIVE: &str = "active";
pub const STAR_GLYPH: &str = "★";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarKind {
    Filled,
    Empty,
}

impl StarKind {
    pub fn class_name(&self) -> &'static str {
        match self {
            StarKind::Filled => "star filled",
            StarKind::Empty => "star empty",
        }
    }
}

/// `.rating-display` 的內容：五顆星加上一位小數的分數
#[derive(Debug, Clone, PartialEq)]
pub struct RatingDisplay {
    pub value: f64,
    pub stars: Vec<StarKind>,
    pub text: String,
}

/// Renders the `data-rating` attribute of a `.rating-display` element.
pub fn render_rating_display(raw: &str) -> RatingDisplay {
    let value = parse_float_prefix(raw);
    let stars = (1..=MAX_RATING)
        .map(|i| {
            if (i as f64) <= value {
                StarKind::Filled
            } else {
                StarKind::Empty
            }
        })
        .collect();

    RatingDisplay {
        value,
        stars,
        text: format!(" {}", format_one_decimal(value)),
    }
}

/// `.rating-display` element
pub trait RatingDisplayElement: Send + Sync {
    /// The `data-rating` attribute, if present.
    fn data_rating(&self) -> Option<String>;
    fn render(&self, display: &RatingDisplay);
}

/// 頁面載入時繪製所有評分
pub fn render_rating_displays(elements: &[Arc<dyn RatingDisplayElement>]) -> usize {
    for element in elements {
        let raw = element.data_rating().unwrap_or_default();
        element.render(&render_rating_display(&raw));
    }
    elements.len()
}

/// Syncs the stars of `[data-rating=<name>]` with a `.rating-input` value:
/// star `k` (0-based) is active iff `k < value`.
pub fn sync_rating_input(value: &str, stars: &[Arc<dyn ClassList>]) -> usize {
    let value = value.trim().parse::<f64>().unwrap_or(f64::NAN);
    let mut active = 0;
    for (index, star) in stars.iter().enumerate() {
        if (index as f64) < value {
            star.add_class(ACTIVE);
            active += 1;
        } else {
            star.remove_class(ACTIVE);
        }
    }
    active
}

/// 解析字串開頭的數字，其餘忽略；無法解析時回傳 NaN
fn parse_float_prefix(raw: &str) -> f64 {
    let trimmed = raw.trim_start();
    let candidate_len = trimmed
        .char_indices()
        .take_while(|(_, c)| c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E'))
        .map(|(i, c)| i + c.len_utf8())
        .last()
        .unwrap_or(0);

    (1..=candidate_len)
        .rev()
        .find_map(|len| trimmed[..len].parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

/// One decimal of the exact stored value. Exact ties round away from zero.
fn format_one_decimal(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0.0".to_string();
    }

    // 只有 x.25 / x.75 會剛好落在兩位數中間
    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        let tenths = (value.abs() * 10.0).ceil() as u64;
        let sign = if value < 0.0 { "-" } else { "" };
        return format!("{}{}.{}", sign, tenths / 10, tenths % 10);
    }
    format!("{:.1}", value)
}
