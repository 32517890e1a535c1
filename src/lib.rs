pub mod api;
pub mod cast;
pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod listing;
pub mod model;
pub mod page;
pub mod schedule;
pub mod telemetry;

use crate::api::{RawMovieData, RawMovieSummary};

pub use crate::api::Parsed;
pub use crate::cast::build_cast_selection;
pub use crate::client::HttpShowtimesApi;
pub use crate::error::{Error, RejectedRecord, Result, TimingError, UnknownVariant};
pub use crate::listing::{MovieCard, build_listing};
pub use crate::model::{
    CastMember, CastSelection, CinemaShowtimes, DateGroup, MovieDetail, MovieSummary, TheatreChain,
    Timing, TimingStatus,
};
pub use crate::page::{MoviePage, build_movie_page, load_listing, load_movie_page};
pub use crate::schedule::{build_schedule, find_date, select_date};

/// Source of raw showtimes payloads.
#[async_trait::async_trait]
pub trait ShowtimesApi: Send + Sync {
    /// Every movie currently listed, with its cinemas and info.
    async fn fetch_listing(&self) -> Result<Vec<RawMovieSummary>>;

    /// Full payload for one movie, or `Error::MovieNotFound`.
    async fn fetch_movie(&self, slug: &str) -> Result<RawMovieData>;
}
