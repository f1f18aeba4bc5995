use resolver_core::{
    ErrorModel, ExceptionKind, HandlerRegistry, RequestContext, Resolver, ResolverConfig,
    ResolverSettings, StandardException,
};

use common::HttpStatusCode;
use models::SchemaRegistry;

use std::sync::{Mutex, Once};

use log::{Level, LevelFilter, Log, Metadata, Record};

/// Keeps every record the resolver emits so tests can check where it went.
struct CapturingLogger {
    records: Mutex<Vec<(String, Level, String)>>,
}

impl Log for CapturingLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut records) = self.records.lock() {
            records.push((
                record.target().to_string(),
                record.level(),
                record.args().to_string(),
            ));
        }
    }

    fn flush(&self) {}
}

static LOGGER: CapturingLogger = CapturingLogger {
    records: Mutex::new(Vec::new()),
};
static INIT: Once = Once::new();

fn capture() -> &'static CapturingLogger {
    INIT.call_once(|| {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(LevelFilter::Trace);
    });
    &LOGGER
}

fn records_for(target: &str) -> Vec<(Level, String)> {
    capture()
        .records
        .lock()
        .unwrap()
        .iter()
        .filter(|(t, _, _)| t == target)
        .map(|(_, level, message)| (*level, message.clone()))
        .collect()
}

/// **VALUE**: Crash reports and request entries land on the targets named in config.
///
/// **WHY THIS MATTERS**: The host logger routes `error_handler_crash_logger` to the
/// dedicated crash file. A report emitted anywhere else ends up in the normal log.
///
/// **BUG THIS CATCHES**: Would catch `Resolver::with_log_sink` ignoring the configured
/// targets and falling back to `envelope::request` / `envelope::crash`.
#[test]
fn given_custom_logger_targets_when_server_error_handled_then_reports_use_them() {
    // GIVEN
    capture();
    let config = ResolverConfig::from_toml_str(
        r#"
error_json_model = "RestfulError"
error_handler_logger = "orders::requests"
error_handler_crash_logger = "orders::crash"
"#,
    )
    .unwrap();
    let schemas = SchemaRegistry::with_standard().unwrap();
    let error_models = [ErrorModel::restful().unwrap()];
    let registry = HandlerRegistry::standard();
    let settings = ResolverSettings::from_config(&config, &schemas, &error_models, &registry).unwrap();
    let resolver = Resolver::with_log_sink(registry, settings);
    let request = RequestContext::parse("POST", "https://api.example.com/v1/payments").unwrap();

    // WHEN
    let envelope = resolver
        .handle_exception(
            &StandardException::new(ExceptionKind::ServiceUnavailable, "Ledger is down."),
            None,
            &request,
        )
        .unwrap();

    // THEN
    assert_eq!(envelope.status, HttpStatusCode::SERVICE_UNAVAILABLE);

    let crashes = records_for("orders::crash");
    assert_eq!(crashes.len(), 1, "expected one crash report, got {crashes:?}");
    assert_eq!(crashes[0].0, Level::Error);
    assert!(crashes[0].1.contains("/v1/payments"));

    let requests = records_for("orders::requests");
    assert_eq!(requests.len(), 1, "expected one request entry, got {requests:?}");
    assert_eq!(requests[0].0, Level::Info);
}
