use tracing::Subscriber;
use tracing::subscriber::set_global_default;
use tracing_subscriber::{EnvFilter, Registry, fmt::MakeWriter, layer::SubscriberExt};

/// Build a subscriber filtered by `RUST_LOG`, falling back to `env_filter`.
pub fn get_subscriber<Sink>(
    env_filter: impl Into<String>,
    sink: Sink,
) -> impl Subscriber + Send + Sync
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter.into()));
    let formatting_layer = tracing_subscriber::fmt::Layer::new()
        .with_writer(sink)
        .with_target(false);
    Registry::default().with(env_filter).with(formatting_layer)
}

pub fn init_subscriber(
    subscriber: impl Subscriber + Send + Sync + 'static,
) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    set_global_default(subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscriber_accepts_events() {
        let subscriber = get_subscriber("debug", std::io::sink);
        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!(cinemas = 3, "built showtime schedule");
        });
    }
}
