use fanout::{init_logging, params, Broker, CallRecorder, Outcome, Params, PubSubPort, Settings};
use tokio::time::{self, MissedTickBehavior};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load()?;
    init_logging(settings.logging.clone())?;

    let broker: Broker<Params> = Broker::new();
    let recorder = CallRecorder::new();
    for name in &settings.subscribers {
        let id = broker.subscribe(recorder.handler(name.as_str(), Outcome::Ok));
        tracing::info!(subscriber = %name, subscription_id = %id, "Subscriber registered");
    }

    run_publisher(&broker, &recorder, &settings).await;

    tracing::info!(stats = ?broker.stats(), "Publisher stopped");
    Ok(())
}

/// Публикует номер итерации раз в `publish_interval`, пока не кончатся
/// итерации или не придёт Ctrl-C.
async fn run_publisher<B: PubSubPort<Params>>(
    port: &B,
    recorder: &CallRecorder,
    settings: &Settings,
) {
    let mut ticker = time::interval(settings.publish_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // первый тик срабатывает сразу
    ticker.tick().await;

    for i in 0..settings.iterations {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                tracing::info!(iteration = i, "Ctrl-C received, stopping");
                return;
            }
        }

        if let Err(e) = port.publish(&params![i as i64]) {
            tracing::warn!(iteration = i, error = %e, "Publish round reported failures");
        }
        let calls = recorder.calls();
        recorder.clear();
        tracing::info!(iteration = i, ?calls, "Published");
    }
}
