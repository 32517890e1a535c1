use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::UnknownVariant;
use crate::format::{format_date_label, format_time_label};

/// Booking state of a single showtime slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimingStatus {
    Available,
    SellingFast,
    SoldOut,
}

impl FromStr for TimingStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('_', " ").as_str() {
            "AVAILABLE" => Ok(Self::Available),
            "SELLING FAST" => Ok(Self::SellingFast),
            "SOLD OUT" => Ok(Self::SoldOut),
            _ => Err(UnknownVariant::new("booking status", s)),
        }
    }
}

/// Cinema operator brand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TheatreChain {
    Gv,
    Shaw,
    Cathay,
}

impl TheatreChain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gv => "gv",
            Self::Shaw => "shaw",
            Self::Cathay => "cathay",
        }
    }
}

impl FromStr for TheatreChain {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gv" => Ok(Self::Gv),
            "shaw" => Ok(Self::Shaw),
            "cathay" => Ok(Self::Cathay),
            _ => Err(UnknownVariant::new("theatre chain", s)),
        }
    }
}

impl fmt::Display for TheatreChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One bookable showtime slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timing {
    pub starts_at: NaiveDateTime,
    /// Timestamp exactly as the API sent it, e.g. `21/12/2021 09:00 AM`.
    pub raw: String,
    pub status: TimingStatus,
    pub url: Option<String>,
}

impl Timing {
    pub fn date(&self) -> NaiveDate {
        self.starts_at.date()
    }

    /// Link to the booking page, withheld once the slot is sold out.
    pub fn booking_url(&self) -> Option<&str> {
        match self.status {
            TimingStatus::SoldOut => None,
            _ => self.url.as_deref(),
        }
    }

    pub fn time_label(&self) -> String {
        format_time_label(&self.raw)
    }
}

/// One cinema's timings for a movie.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CinemaShowtimes {
    pub name: String,
    pub chain: TheatreChain,
    pub timings: Vec<Timing>,
}

/// Cinemas and timings falling on one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateGroup {
    pub date: NaiveDate,
    pub cinemas: Vec<CinemaShowtimes>,
}

impl DateGroup {
    pub fn date_label(&self) -> String {
        format_date_label(self.date)
    }
}

/// A person credited on a movie, either cast (`character`) or crew (`job`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    pub profile_path: Option<String>,
    pub popularity: f64,
    pub character: Option<String>,
    pub job: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CastSelection {
    pub director: Option<CastMember>,
    pub popular_cast: Vec<CastMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Video {
    pub kind: String,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Score {
    pub score: String,
    pub count: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TomatoData {
    pub rating: Option<String>,
    pub tomato_score: Option<Score>,
    pub audience_score: Option<Score>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MovieInfo {
    pub title: String,
    pub overview: Option<String>,
    /// Running time in minutes; zero when unknown.
    pub runtime: u32,
    pub genres: Vec<Genre>,
    pub backdrop_path: Option<String>,
    pub poster_path: Option<String>,
    pub tomato: TomatoData,
    pub videos: Vec<Video>,
    pub cast: Vec<CastMember>,
    pub crew: Vec<CastMember>,
    pub theatres: Vec<TheatreChain>,
    pub review_url: Option<String>,
}

impl MovieInfo {
    /// Backdrop if present, otherwise the poster.
    pub fn image_path(&self) -> Option<&str> {
        self.backdrop_path
            .as_deref()
            .or(self.poster_path.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MovieDetail {
    pub info: MovieInfo,
    pub cinemas: Vec<CinemaShowtimes>,
}

/// An entry of the "now showing" listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieSummary {
    pub id: u64,
    pub slug: String,
    pub detail: MovieDetail,
}
