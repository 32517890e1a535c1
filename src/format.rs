use chrono::NaiveDate;
use serde::Serialize;

use crate::model::Genre;

pub const TMDB_IMG_URL: &str = "https://image.tmdb.org/t/p/original";
const YOUTUBE_WATCH_URL: &str = "https://www.youtube.com/watch";

/// Extract "hh:mm AM" from a raw timing like "21/12/2021 09:00 AM"
pub fn format_time_label(raw: &str) -> String {
    raw.split_whitespace()
        .skip(1)
        .take(2)
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Format a date as "Tue 21/12/2021"
pub fn format_date_label(date: NaiveDate) -> String {
    date.format("%a %d/%m/%Y").to_string()
}

/// Format minutes as "2h 28m"
pub fn format_runtime(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// First three genre names joined with '/', e.g. "Action/Adventure/Science Fiction".
pub fn genre_text(genres: &[Genre]) -> Option<String> {
    let names: Vec<&str> = genres
        .iter()
        .take(3)
        .map(|g| g.name.as_str())
        .filter(|n| !n.is_empty())
        .collect();
    if names.is_empty() {
        None
    } else {
        Some(names.join("/"))
    }
}

pub fn image_url(path: &str) -> String {
    format!("{}/{}", TMDB_IMG_URL, path.trim_start_matches('/'))
}

pub fn trailer_url(key: &str) -> String {
    format!("{}?v={}", YOUTUBE_WATCH_URL, key)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreKind {
    Critic,
    Audience,
}

impl ScoreKind {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Critic => "Tomatometer",
            Self::Audience => "Audience score",
        }
    }

    /// "167 reviews" / "2,500+ verified ratings"
    pub fn count_label(&self, count: &str) -> String {
        match self {
            Self::Critic => format!("{} reviews", count),
            Self::Audience => format!("{} verified ratings", count),
        }
    }
}

/// Icon shown next to a Rotten Tomatoes score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBadge {
    Rotten,
    Fresh,
    Certified,
    AudienceFail,
    AudienceCertified,
}

impl ScoreBadge {
    /// `None` when the score is not a number.
    pub fn classify(kind: ScoreKind, score: &str) -> Option<Self> {
        let value: f64 = score.trim().trim_end_matches('%').parse().ok()?;
        let badge = match kind {
            ScoreKind::Critic if value <= 60.0 => Self::Rotten,
            ScoreKind::Critic if value < 80.0 => Self::Fresh,
            ScoreKind::Critic => Self::Certified,
            ScoreKind::Audience if value <= 50.0 => Self::AudienceFail,
            ScoreKind::Audience => Self::AudienceCertified,
        };
        Some(badge)
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Rotten => "/rotten_tomato_rotten.svg",
            Self::Fresh => "/rotten_tomato_fresh.svg",
            Self::Certified => "/rotten_tomato_certified.svg",
            Self::AudienceFail => "/rotten_tomato_audience_fail.svg",
            Self::AudienceCertified => "/rotten_tomato_audience_certified.svg",
        }
    }
}

pub fn review_url(base: &str, kind: ScoreKind) -> String {
    match kind {
        ScoreKind::Critic => format!("{}?type=top_critics", base),
        ScoreKind::Audience => format!("{}?type=verified_audience", base),
    }
}
