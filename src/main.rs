use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};

use cinema_showtimes::api::TIMING_FORMAT;
use cinema_showtimes::config::{
    DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_UTC_OFFSET_HOURS, Settings,
};
use cinema_showtimes::format::format_date_label;
use cinema_showtimes::schedule::local_now;
use cinema_showtimes::{
    Error, HttpShowtimesApi, MovieCard, MoviePage, TimingStatus, load_listing, load_movie_page,
    telemetry,
};

#[derive(Parser, Debug)]
#[command(name = "showtimes", about = "Movie showtimes from the SG showtimes API")]
struct Cli {
    /// Base URL of the showtimes API
    #[arg(long, env = "SHOWTIMES_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "SHOWTIMES_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// UTC offset of the cinemas' local time, in hours
    #[arg(
        long,
        env = "SHOWTIMES_UTC_OFFSET",
        default_value_t = DEFAULT_UTC_OFFSET_HOURS,
        allow_hyphen_values = true
    )]
    utc_offset_hours: i32,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List movies now showing, most widely shown first
    Listing {
        #[arg(long)]
        json: bool,
    },
    /// Show one movie's details and upcoming showtimes
    Movie {
        slug: String,
        /// Reference time, e.g. "21/12/2021 08:00 AM" (defaults to now)
        #[arg(long)]
        now: Option<String>,
        /// Only print showtimes for this date (dd/MM/yyyy)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
        #[arg(long)]
        json: bool,
    },
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%d/%m/%Y")
        .map_err(|e| format!("expected dd/MM/yyyy: {e}"))
}

fn parse_now(s: &str) -> Result<NaiveDateTime, Error> {
    NaiveDateTime::parse_from_str(s.trim(), TIMING_FORMAT)
        .map_err(|_| Error::InvalidNow(s.to_string()))
}

fn print_card(card: &MovieCard) {
    println!("TITLE       : {}", card.title);
    println!("URL         : {}", card.href());
    if let Some(ref genre) = card.genre {
        println!("GENRE       : {}", genre);
    }
    if let Some(ref runtime) = card.runtime {
        println!("RUNTIME     : {}", runtime);
    }
    if let Some(ref rating) = card.rating {
        println!("RATING      : {}", rating);
    }
    for score in &card.scores {
        println!("{:<12}: {}%", score.kind.title(), score.score);
    }
    if !card.theatres.is_empty() {
        let chains: Vec<&str> = card.theatres.iter().map(|t| t.as_str()).collect();
        println!("THEATRES    : {}", chains.join(", "));
    }
    println!("CINEMAS     : {}", card.cinema_count);
    if let Some(ref overview) = card.overview {
        println!("OVERVIEW    : {}", overview);
    }
    println!();
}

fn print_page(page: &MoviePage, date: Option<NaiveDate>) {
    println!("TITLE       : {}", page.title);
    let tags = page.info_tags();
    if !tags.is_empty() {
        println!("INFO        : {}", tags.join(" | "));
    }
    if let Some(ref image) = page.image_url {
        println!("IMAGE       : {}", image);
    }
    if let Some(ref overview) = page.overview {
        println!("OVERVIEW    : {}", overview);
    }
    for score in &page.scores {
        let count = score
            .count
            .as_deref()
            .map(|c| format!(" ({})", score.kind.count_label(c)))
            .unwrap_or_default();
        println!("{:<12}: {}%{}", score.kind.title(), score.score, count);
    }
    if let Some(ref director) = page.cast.director {
        println!("DIRECTOR    : {}", director.name);
    }
    if page.has_cast_section() {
        let names: Vec<&str> = page
            .cast
            .popular_cast
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        println!("CAST        : {}", names.join(", "));
    }
    if let Some(ref trailer) = page.trailer {
        println!("TRAILER     : {}", trailer.url);
    }

    if !page.has_showtimes() {
        println!("\nNo upcoming showtimes.");
        return;
    }
    let groups: Vec<_> = match date {
        Some(d) => match page.schedule_for(d) {
            Some(group) => vec![group],
            None => {
                println!("\nNo showtimes on {}.", format_date_label(d));
                return;
            }
        },
        None => page.schedule.iter().collect(),
    };
    for group in groups {
        println!("\n{}", group.date_label().to_uppercase());
        for cinema in &group.cinemas {
            let times: Vec<String> = cinema
                .timings
                .iter()
                .map(|t| match t.status {
                    TimingStatus::Available => t.time_label(),
                    TimingStatus::SellingFast => format!("{}*", t.time_label()),
                    TimingStatus::SoldOut => format!("({})", t.time_label()),
                })
                .collect();
            println!(
                "  [{}] {:<32} {}",
                cinema.chain,
                cinema.name.to_lowercase(),
                times.join("  ")
            );
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let subscriber = telemetry::get_subscriber(cli.log_level.clone(), std::io::stderr);
    telemetry::init_subscriber(subscriber)?;

    let settings = Settings {
        api_url: cli.api_url,
        timeout_secs: cli.timeout_secs,
        utc_offset_hours: cli.utc_offset_hours,
    };
    let api = HttpShowtimesApi::new(&settings)?;

    match cli.command {
        Command::Listing { json } => {
            let parsed = load_listing(&api).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&parsed.value)?);
            } else {
                for card in &parsed.value {
                    print_card(card);
                }
            }
            if !parsed.rejected.is_empty() {
                tracing::warn!(count = parsed.rejected.len(), "some records were skipped");
            }
        }
        Command::Movie {
            slug,
            now,
            date,
            json,
        } => {
            let now = match now {
                Some(ref s) => parse_now(s)?,
                None => local_now(settings.utc_offset()?),
            };
            let parsed = load_movie_page(&api, &slug, now).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&parsed.value)?);
            } else {
                print_page(&parsed.value, date);
            }
            if !parsed.rejected.is_empty() {
                tracing::warn!(count = parsed.rejected.len(), "some records were skipped");
            }
        }
    }

    Ok(())
}
