//! The movie detail page model and the loaders that feed it.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::ShowtimesApi;
use crate::api::Parsed;
use crate::cast::build_cast_selection;
use crate::error::Result;
use crate::format::{format_runtime, genre_text, image_url, trailer_url};
use crate::listing::{MovieCard, ScorePanel, build_listing, score_panels};
use crate::model::{CastSelection, DateGroup, MovieDetail, Video};
use crate::schedule::{build_schedule, find_date, select_date};

const TRAILER_KIND: &str = "Trailer";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trailer {
    pub key: String,
    pub url: String,
}

/// Everything a movie page shows. Optional sections are `None` or empty
/// when the upstream data lacks them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoviePage {
    pub title: String,
    pub image_url: Option<String>,
    pub rating: Option<String>,
    pub runtime: Option<String>,
    pub genres: Option<String>,
    pub overview: Option<String>,
    pub scores: Vec<ScorePanel>,
    pub cast: CastSelection,
    pub trailer: Option<Trailer>,
    pub schedule: Vec<DateGroup>,
}

impl MoviePage {
    pub fn has_cast_section(&self) -> bool {
        !self.cast.popular_cast.is_empty()
    }

    pub fn has_showtimes(&self) -> bool {
        !self.schedule.is_empty()
    }

    /// Info tags under the title, in display order.
    pub fn info_tags(&self) -> Vec<&str> {
        [&self.rating, &self.runtime, &self.genres]
            .into_iter()
            .filter_map(|tag| tag.as_deref())
            .collect()
    }

    /// Showtimes for a picked date, or the earliest date when none matches.
    pub fn showtimes_on(&self, date: Option<NaiveDate>) -> Option<&DateGroup> {
        select_date(&self.schedule, date)
    }

    /// Showtimes on exactly `date`.
    pub fn schedule_for(&self, date: NaiveDate) -> Option<&DateGroup> {
        find_date(&self.schedule, date)
    }
}

fn first_trailer(videos: &[Video]) -> Option<Trailer> {
    videos
        .iter()
        .find(|v| v.kind == TRAILER_KIND)
        .map(|v| Trailer {
            key: v.key.clone(),
            url: trailer_url(&v.key),
        })
}

pub fn build_movie_page(detail: &MovieDetail, now: NaiveDateTime) -> MoviePage {
    let info = &detail.info;

    MoviePage {
        title: info.title.clone(),
        image_url: info.image_path().map(image_url),
        rating: info.tomato.rating.clone(),
        runtime: (info.runtime > 0).then(|| format_runtime(info.runtime)),
        genres: genre_text(&info.genres),
        overview: info.overview.clone(),
        // scores sit inside the overview section
        scores: if info.overview.is_some() {
            score_panels(info)
        } else {
            Vec::new()
        },
        cast: build_cast_selection(&info.cast, &info.crew),
        trailer: first_trailer(&info.videos),
        schedule: build_schedule(&detail.cinemas, now),
    }
}

/// Fetch and validate the listing, then build its cards.
pub async fn load_listing(api: &dyn ShowtimesApi) -> Result<Parsed<Vec<MovieCard>>> {
    let raw = api.fetch_listing().await?;

    let mut movies = Vec::with_capacity(raw.len());
    let mut rejected = Vec::new();
    for summary in raw {
        let parsed = summary.validate();
        movies.push(parsed.value);
        rejected.extend(parsed.rejected);
    }

    Ok(Parsed {
        value: build_listing(&movies),
        rejected,
    })
}

/// Fetch and validate one movie, then build its page as of `now`.
pub async fn load_movie_page(
    api: &dyn ShowtimesApi,
    slug: &str,
    now: NaiveDateTime,
) -> Result<Parsed<MoviePage>> {
    let raw = api.fetch_movie(slug).await?;
    let parsed = raw.validate();
    tracing::debug!(
        slug,
        cinemas = parsed.value.cinemas.len(),
        rejected = parsed.rejected.len(),
        "validated movie payload"
    );
    Ok(parsed.map(|detail| build_movie_page(&detail, now)))
}
