//! Korean prose summaries of a ranked dataset.

use goldkey_shared::{BLUE_OCEAN_MAX, Grade, KeywordRecord};

const GRADE_LIST_LIMIT: usize = 3;
const BLUE_OCEAN_LIST_LIMIT: usize = 5;

/// `1234567` → `"1,234,567"`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Shortest float text, keeping one decimal on whole values (`6.0`, `0.04`).
fn format_efficiency(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

fn is_blue_ocean(record: &KeywordRecord) -> bool {
    record.efficiency < BLUE_OCEAN_MAX
}

/// One-paragraph overview led by the top-ranked keyword.
///
/// `date` is the already formatted run date (e.g. `2026년 10월 16일`).
pub fn seo_summary(records: &[KeywordRecord], date: &str) -> String {
    let Some(top) = records.first() else {
        return format!("{date} 기준 분석된 키워드가 없습니다.");
    };

    let diamond = records.iter().filter(|r| r.grade == Grade::Diamond).count();
    let blue_ocean = records.iter().filter(|r| is_blue_ocean(r)).count();
    let verdict = if is_blue_ocean(top) {
        "블루오션 시장입니다."
    } else {
        "주목할 만한 키워드입니다."
    };

    format!(
        "{date} 기준, 네이버와 쿠팡의 실시간 트렌드를 분석한 결과 \
         총 {total}개의 키워드 중 다이아몬드 등급 {diamond}개, \
         블루오션 키워드 {blue_ocean}개를 발굴했습니다. \
         오늘의 1위 황금 키워드는 '{keyword}'로, \
         월간 검색량 {volume}건에 경쟁강도 {efficiency}으로 {verdict}",
        total = records.len(),
        keyword = top.keyword,
        volume = group_thousands(top.search_volume),
        efficiency = format_efficiency(top.efficiency),
    )
}

/// Names joined by `", "`, with an `외 N개` suffix past `limit`.
fn name_list(names: &[&str], limit: usize) -> String {
    let shown = names[..names.len().min(limit)].join(", ");
    if names.len() > limit {
        format!("{shown} 외 {}개", names.len() - limit)
    } else {
        shown
    }
}

/// Per-grade highlights plus a closing strategy line, as blank-line separated paragraphs.
pub fn keyword_review(records: &[KeywordRecord]) -> String {
    if records.is_empty() {
        return "분석된 키워드가 없습니다.".to_string();
    }

    let by_grade = |grade: Grade| -> Vec<&str> {
        records
            .iter()
            .filter(|r| r.grade == grade)
            .map(|r| r.keyword.as_str())
            .collect()
    };
    let diamond = by_grade(Grade::Diamond);
    let gold = by_grade(Grade::Gold);
    let blue_ocean: Vec<&str> = records
        .iter()
        .filter(|r| is_blue_ocean(r))
        .map(|r| r.keyword.as_str())
        .collect();

    let mut parts = Vec::new();
    if !diamond.is_empty() {
        parts.push(format!(
            "다이아몬드 등급 키워드: {}",
            name_list(&diamond, GRADE_LIST_LIMIT)
        ));
    }
    if !gold.is_empty() {
        parts.push(format!("골드 등급 키워드: {}", name_list(&gold, GRADE_LIST_LIMIT)));
    }
    if !blue_ocean.is_empty() {
        let shown = &blue_ocean[..blue_ocean.len().min(BLUE_OCEAN_LIST_LIMIT)];
        parts.push(format!(
            "블루오션 키워드(경쟁강도 1.0 미만): {}",
            shown.join(", ")
        ));
    }
    parts.push(
        "추천 전략: 다이아몬드/골드 등급 키워드 중 블루오션인 키워드를 우선적으로 \
         콘텐츠 제작에 활용하면 검색 노출 효과를 극대화할 수 있습니다."
            .to_string(),
    );

    parts.join("\n\n")
}
