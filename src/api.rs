//! Wire schema of the showtimes API and the validation step that turns it
//! into the typed model.
//!
//! The upstream payloads are loosely typed: most fields may be missing or
//! null, and scores arrive either as strings or numbers. Everything here is
//! lenient except the showtime records themselves, which are rejected one by
//! one when they cannot be read.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer};

use crate::error::{RejectedRecord, TimingError};
use crate::model::{
    CastMember, CinemaShowtimes, Genre, MovieDetail, MovieInfo, MovieSummary, Score, TheatreChain,
    Timing, TimingStatus, TomatoData, Video,
};

/// Format of every upstream timing, e.g. "21/12/2021 09:00 AM".
pub const TIMING_FORMAT: &str = "%d/%m/%Y %I:%M %p";

/// A validated value together with the records dropped on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    pub value: T,
    pub rejected: Vec<RejectedRecord>,
}

impl<T> Parsed<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Parsed<U> {
        Parsed {
            value: f(self.value),
            rejected: self.rejected,
        }
    }
}

/// Body of `GET /api/{slug}`.
#[derive(Debug, Deserialize)]
pub struct MovieResponse {
    pub data: RawMovieData,
}

/// Element of the `GET /api/` listing.
#[derive(Debug, Deserialize)]
pub struct RawMovieSummary {
    pub id: u64,
    pub slug: String,
    pub data: RawMovieData,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawMovieData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub cinemas: Vec<RawCinema>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub info: RawMovieInfo,
}

#[derive(Debug, Deserialize)]
pub struct RawCinema {
    #[serde(default, deserialize_with = "lenient_string")]
    pub cinema: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub theatre: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timings: Vec<RawTiming>,
}

#[derive(Debug, Deserialize)]
pub struct RawTiming {
    #[serde(default, deserialize_with = "string_or_number")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub timing: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawMovieInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<RawGenre>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default, rename = "tomatoData")]
    pub tomato_data: Option<RawTomatoData>,
    #[serde(default)]
    pub videos: Option<RawVideos>,
    #[serde(default)]
    pub credits: Option<RawCredits>,
    #[serde(default)]
    pub theatres: Option<Vec<String>>,
    #[serde(default, rename = "reviewUrl")]
    pub review_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawGenre {
    #[serde(default)]
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTomatoData {
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub tomato_score: Option<RawScore>,
    #[serde(default)]
    pub audience_score: Option<RawScore>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawScore {
    #[serde(default, deserialize_with = "string_or_number")]
    pub score: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub count: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawVideos {
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<RawVideo>,
}

#[derive(Debug, Deserialize)]
pub struct RawVideo {
    #[serde(rename = "type")]
    pub kind: String,
    pub key: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawCredits {
    #[serde(default, deserialize_with = "null_as_default")]
    pub cast: Vec<RawCastMember>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub crew: Vec<RawCastMember>,
}

#[derive(Debug, Deserialize)]
pub struct RawCastMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub profile_path: Option<String>,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub job: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Scores come as "90", 90 or null depending on the scrape.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Null reads as "" and any other non-string as its JSON text, so a bad
/// showtime field is rejected with its record instead of failing the payload.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => s,
        Some(other) => other.to_string(),
        None => String::new(),
    })
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.trim().is_empty())
}

/// Parse one upstream timing record.
pub fn parse_timing(raw: RawTiming) -> Result<Timing, TimingError> {
    let starts_at = NaiveDateTime::parse_from_str(raw.timing.trim(), TIMING_FORMAT).map_err(
        |source| TimingError::Malformed {
            raw: raw.timing.clone(),
            source,
        },
    )?;
    let status: TimingStatus = raw
        .status
        .parse()
        .map_err(|_| TimingError::UnknownStatus {
            raw: raw.timing.clone(),
            status: raw.status.clone(),
        })?;

    Ok(Timing {
        starts_at,
        raw: raw.timing,
        status,
        url: non_empty(raw.url),
    })
}

impl RawCinema {
    pub fn validate(self) -> Result<Parsed<CinemaShowtimes>, RejectedRecord> {
        let chain: TheatreChain =
            self.theatre
                .parse()
                .map_err(|_| RejectedRecord::UnknownTheatre {
                    cinema: self.cinema.clone(),
                    theatre: self.theatre.clone(),
                })?;

        let mut timings = Vec::with_capacity(self.timings.len());
        let mut rejected = Vec::new();
        for raw in self.timings {
            match parse_timing(raw) {
                Ok(t) => timings.push(t),
                Err(error) => rejected.push(RejectedRecord::Timing {
                    cinema: self.cinema.clone(),
                    error,
                }),
            }
        }

        Ok(Parsed {
            value: CinemaShowtimes {
                name: self.cinema,
                chain,
                timings,
            },
            rejected,
        })
    }
}

impl RawCastMember {
    fn into_member(self) -> CastMember {
        CastMember {
            id: self.id,
            name: self.name,
            profile_path: non_empty(self.profile_path),
            popularity: self.popularity.unwrap_or_default(),
            character: non_empty(self.character),
            job: non_empty(self.job),
        }
    }
}

impl RawScore {
    fn into_score(self) -> Option<Score> {
        let score = self.score?;
        Some(Score {
            score,
            count: self.count,
        })
    }
}

impl RawMovieInfo {
    pub fn validate(self) -> MovieInfo {
        let tomato = self
            .tomato_data
            .map(|t| TomatoData {
                rating: non_empty(t.rating),
                tomato_score: t.tomato_score.and_then(RawScore::into_score),
                audience_score: t.audience_score.and_then(RawScore::into_score),
            })
            .unwrap_or_default();
        let credits = self.credits.unwrap_or_default();

        MovieInfo {
            title: self.title.unwrap_or_default(),
            overview: non_empty(self.overview),
            runtime: self.runtime.unwrap_or_default(),
            genres: self
                .genres
                .into_iter()
                .map(|g| Genre {
                    id: g.id,
                    name: g.name,
                })
                .collect(),
            backdrop_path: non_empty(self.backdrop_path),
            poster_path: non_empty(self.poster_path),
            tomato,
            videos: self
                .videos
                .map(|v| v.results)
                .unwrap_or_default()
                .into_iter()
                .map(|v| Video {
                    kind: v.kind,
                    key: v.key,
                })
                .collect(),
            cast: credits.cast.into_iter().map(RawCastMember::into_member).collect(),
            crew: credits.crew.into_iter().map(RawCastMember::into_member).collect(),
            // unknown chains get no tag
            theatres: self
                .theatres
                .unwrap_or_default()
                .iter()
                .filter_map(|t| t.parse().ok())
                .collect(),
            review_url: non_empty(self.review_url),
        }
    }
}

impl RawMovieData {
    pub fn validate(self) -> Parsed<MovieDetail> {
        let mut cinemas = Vec::with_capacity(self.cinemas.len());
        let mut rejected = Vec::new();

        for raw in self.cinemas {
            match raw.validate() {
                Ok(parsed) => {
                    cinemas.push(parsed.value);
                    rejected.extend(parsed.rejected);
                }
                Err(record) => rejected.push(record),
            }
        }

        for record in &rejected {
            tracing::warn!(%record, "dropping record from showtimes payload");
        }

        Parsed {
            value: MovieDetail {
                info: self.info.validate(),
                cinemas,
            },
            rejected,
        }
    }
}

impl RawMovieSummary {
    pub fn validate(self) -> Parsed<MovieSummary> {
        let (id, slug) = (self.id, self.slug);
        self.data
            .validate()
            .map(|detail| MovieSummary { id, slug, detail })
    }
}
