use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::store::domain::Job;

/// How many skill chips a summary card shows at most.
const MAX_SKILL_CHIPS: usize = 3;

/// View-ready summary of a job listing. Optional source fields degrade to
/// omitted lines instead of failing the render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobCard {
    pub title: String,
    pub company: String,
    pub location: String,
    pub employment_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_label: Option<String>,
    pub skills: Vec<String>,
    pub posted_label: String,
    pub detail_path: String,
}

impl JobCard {
    pub fn compose(job: &Job, now: DateTime<Utc>) -> Self {
        Self {
            title: job.job_title.clone(),
            company: job.company.clone(),
            location: job.job_location.clone(),
            employment_type: job.employment_type.clone(),
            salary_label: salary_label(job.salary_min, job.salary_max),
            skills: job
                .key_skills
                .iter()
                .take(MAX_SKILL_CHIPS)
                .cloned()
                .collect(),
            posted_label: posted_label(job.created_at, now),
            detail_path: format!("/jobs/{}", job.id),
        }
    }
}

/// No advertised minimum means no salary line at all.
fn salary_label(min: Option<u32>, max: Option<u32>) -> Option<String> {
    let min = min?;
    Some(match max {
        Some(max) if max != min => format!("{} - {}", format_usd(min), format_usd(max)),
        _ => format!("From {}", format_usd(min)),
    })
}

fn format_usd(amount: u32) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${grouped}")
}

fn posted_label(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(created_at);
    let seconds = elapsed.num_seconds().max(0);

    let (count, unit) = if seconds < 60 {
        return "Posted just now".to_string();
    } else if seconds < 3_600 {
        (seconds / 60, "minute")
    } else if seconds < 86_400 {
        (seconds / 3_600, "hour")
    } else if seconds < 2_592_000 {
        (seconds / 86_400, "day")
    } else if seconds < 31_536_000 {
        (seconds / 2_592_000, "month")
    } else {
        (seconds / 31_536_000, "year")
    };

    let plural = if count == 1 { "" } else { "s" };
    format!("Posted {count} {unit}{plural} ago")
}
