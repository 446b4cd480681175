//! Install a package, wait for it to show up, then remove it.
//!
//! The catalog lives in memory and publishes an install only after a few
//! lookups, imitating a remote service whose state settles eventually. Every
//! request goes through a pipeline carrying the same proxy agent and default
//! headers; the bounded poller waits for the installed version.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use queryable::{
    Agent, BoxError, Behavior, DefaultHeaders, Logging, Method, Moment, Pipeline, PollConfig,
    ProxyAgent, RequestConfig, Target, Transport, behavior::Behaviors, poll_until,
};
use tracing::info;

const SITE: &str = "https://catalog.local/sites/dev";
const PACKAGE: &str = "inventory-app";

struct Entry {
    version: String,
    lookups_until_visible: u32,
}

/// In-memory package catalog answering `GET`, `POST .../install` and
/// `POST .../uninstall`.
#[derive(Clone, Default)]
struct Catalog {
    entries: Arc<Mutex<BTreeMap<String, Entry>>>,
}

impl Catalog {
    fn entries(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, Entry>>, BoxError> {
        self.entries
            .lock()
            .map_err(|_| BoxError::from("catalog lock poisoned"))
    }
}

#[async_trait]
impl Transport for Catalog {
    type Response = Option<String>;

    async fn send(
        &self,
        target: &Target,
        config: &RequestConfig,
    ) -> Result<Self::Response, BoxError> {
        if config.agent.is_none() {
            return Err("catalog is only reachable through the proxy".into());
        }
        let path = target
            .as_str()
            .strip_prefix(SITE)
            .ok_or_else(|| BoxError::from(format!("unknown site: {target}")))?;
        let mut entries = self.entries()?;
        match (config.method, path.rsplit_once('/')) {
            (Method::Post, Some((package, "install"))) => {
                let version = config
                    .body
                    .as_ref()
                    .map(|body| String::from_utf8_lossy(body).into_owned())
                    .unwrap_or_else(|| "1.0.0".to_owned());
                entries.insert(
                    package.trim_start_matches("/apps/").to_owned(),
                    Entry {
                        version,
                        lookups_until_visible: 2,
                    },
                );
                Ok(None)
            }
            (Method::Post, Some((package, "uninstall"))) => {
                let removed = entries.remove(package.trim_start_matches("/apps/"));
                Ok(removed.map(|entry| entry.version))
            }
            (Method::Get, Some(("/apps", package))) => {
                Ok(entries.get_mut(package).and_then(|entry| {
                    if entry.lookups_until_visible > 0 {
                        entry.lookups_until_visible -= 1;
                        None
                    } else {
                        Some(entry.version.clone())
                    }
                }))
            }
            _ => Err(format!("unsupported request: {:?} {target}", config.method).into()),
        }
    }
}

fn shared_behaviors() -> Behaviors<Option<String>> {
    Behaviors::new()
        .with(Agent::new(
            ProxyAgent::new("http://proxy.local:3128").no_proxy(["localhost"]),
        ))
        .with(DefaultHeaders::new().header("Accept", "application/json;odata=verbose"))
        .with(Logging::new())
}

fn pipeline(
    catalog: &Catalog,
    behaviors: &impl Behavior<Option<String>>,
) -> Pipeline<Option<String>> {
    let mut pipeline = Pipeline::new(catalog.clone());
    pipeline.apply(behaviors);
    pipeline
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let catalog = Catalog::default();
    let behaviors = shared_behaviors();
    let site = Target::new(SITE);
    let app = site.join("apps").join(PACKAGE);

    pipeline(&catalog, &behaviors)
        .execute_state(queryable::RequestState::new(
            app.join("install"),
            RequestConfig::default().method(Method::Post).body("2.1.0"),
        ))
        .await?;
    info!(package = PACKAGE, "install requested");

    let outcome = poll_until(PollConfig::new(Duration::from_millis(200), 5), || {
        let mut lookup = pipeline(&catalog, &behaviors);
        lookup.on(Moment::Post).register_fn(|state| async move {
            info!(version = ?state.result.as_ref().and_then(Option::as_deref), "lookup finished");
            Ok(state)
        });
        let target = app.clone();
        async move {
            let version = lookup.execute(target, RequestConfig::default()).await?;
            Ok::<_, queryable::PipelineError>(version.is_some())
        }
    })
    .await?;
    info!(
        attempts = outcome.attempts(),
        satisfied = outcome.is_satisfied(),
        "finished waiting for install"
    );

    let removed = pipeline(&catalog, &behaviors)
        .execute(app.join("uninstall"), RequestConfig::default().method(Method::Post))
        .await?;
    info!(package = PACKAGE, version = ?removed, "uninstalled");
    Ok(())
}
