// weekshare-core/src/application/messages.rs
//
// Outbound texts (Slack mrkdwn). Multi-line ones are minijinja templates
// rendered through the TemplateEngine port.

use serde_json::json;

use crate::application::ports::TemplateEngine;
use crate::domain::cohort::Cohort;
use crate::domain::settings::ShareThresholds;
use crate::domain::share::{ShareOutcome, ShareResult};
use crate::error::WeekShareError;

pub const SUMMARY_TEMPLATE: &str = "\
{%- if previous %}*🎥 이전 기수 {{ previous_week }}주차 영상 자료*
과제 이해도를 높이는 데 도움이 될 만한 역대 기수들의 {{ previous_week }}주차 관련 영상들을 참고해 보세요.
{% for f in previous %}
📁 {{ f.cohort }} {{ f.resolved_week | week_label }} 영상 폴더 → <{{ f.link }}|링크>
{%- endfor %}
{% if current %}
───
{% endif %}{% endif -%}
{%- if current %}*🎥 {{ current_cohort }}기 이번주차 영상 자료*
📁 {{ current.cohort }} {{ current.resolved_week | week_label }} 영상 폴더 → <{{ current.link }}|링크>
{% endif -%}
💡 총 {{ total }}개 기수 영상이 공유되었습니다.";

pub const ACK_TEMPLATE: &str = "\
⏳ 영상 공유 처리 중...
• {{ current_cohort }}기: {{ week }}주차{% if final_week %} (마지막){% else %}
• 이전 기수: {{ week + 1 }}주차{% endif %}
완료되면 알려드릴게요!";

pub const OPS_ERROR_TEMPLATE: &str = "\
⚠️ *오류 발생*

```{{ error }}```
{%- if context %}

*컨텍스트:*
{%- for item in context %}
- {{ item.key }}: {{ item.value }}
{%- endfor %}
{%- endif %}";

/// Event context attached to operations error messages is cut to this many chars.
pub const MAX_CONTEXT_CHARS: usize = 500;

pub fn summary_message(
    engine: &dyn TemplateEngine,
    result: &ShareResult,
    current_cohort: u32,
) -> Result<String, WeekShareError> {
    let cohort_number = |o: &ShareOutcome| Cohort::parse(&o.cohort).map(|c| c.number).ok();

    let previous: Vec<&ShareOutcome> = result
        .outcomes
        .iter()
        .filter(|o| cohort_number(o).is_some_and(|n| n < current_cohort))
        .collect();
    let current = result
        .outcomes
        .iter()
        .find(|o| cohort_number(o) == Some(current_cohort));

    let context = json!({
        "previous": previous,
        "previous_week": result.week.saturating_add(1),
        "current": current,
        "current_cohort": current_cohort,
        "total": result.outcomes.len(),
    });
    engine.render(SUMMARY_TEMPLATE, &context)
}

pub fn processing_ack(
    engine: &dyn TemplateEngine,
    thresholds: &ShareThresholds,
    week: u32,
) -> Result<String, WeekShareError> {
    let context = json!({
        "current_cohort": thresholds.current_cohort,
        "week": week,
        "final_week": thresholds.is_final_week(week),
    });
    engine.render(ACK_TEMPLATE, &context)
}

pub fn ops_error_message(
    engine: &dyn TemplateEngine,
    error: &str,
    context: &[(&str, String)],
) -> Result<String, WeekShareError> {
    let items: Vec<serde_json::Value> = context
        .iter()
        .map(|(k, v)| json!({ "key": k, "value": truncate_chars(v, MAX_CONTEXT_CHARS) }))
        .collect();
    engine.render(OPS_ERROR_TEMPLATE, &json!({ "error": error, "context": items }))
}

pub fn processing_fallback_ack(week: u32) -> String {
    format!("⏳ {}주차 영상 공유 처리 중...\n완료되면 알려드릴게요!", week)
}

pub fn completed_message(result: &ShareResult) -> String {
    let mut msg = format!(
        "✅ {}주차 영상 공유 완료! ({}개 기수)\n관리 채널에 메시지가 발송되었습니다.",
        result.week,
        result.shared_count()
    );
    if result.has_errors() {
        msg.push_str(&format!("\n⚠️ 일부 오류 {}건 (관리 채널 로그 확인)", result.errors.len()));
    }
    msg
}

pub fn not_found_message(result: &ShareResult) -> String {
    let mut msg = format!("❌ {}주차 폴더를 찾을 수 없습니다.", result.week);
    if result.has_errors() {
        let details: Vec<String> = result
            .errors
            .iter()
            .map(|e| match &e.email {
                Some(email) => format!("{} ({}): {}", e.cohort, email, e.message),
                None => format!("{}: {}", e.cohort, e.message),
            })
            .collect();
        msg.push_str(&format!("\n오류: {}", details.join("; ")));
    }
    msg
}

/// Front door reply when the command could not be handed off.
pub fn error_ack(error: &str) -> String {
    format!("❌ 오류가 발생했습니다: {}", error)
}

pub fn failure_message(error: &str) -> String {
    format!("❌ 처리 중 오류가 발생했습니다: {}", error)
}

pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
