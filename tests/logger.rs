//! The process-wide sink is a one-time global, so these tests live in their
//! own binary.

use std::io;
use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use xmlmap::{
    parse_document, set_logger, string_value, unknown_value, Logger, ParserOptions,
    ParserOverrides, Schema, TracingLogger, XmlDocument,
};

#[derive(Default)]
struct Collect(Mutex<Vec<(&'static str, String)>>);

impl Collect {
    fn entries(&self) -> Vec<(&'static str, String)> {
        self.0.lock().unwrap().clone()
    }
}

impl Logger for Collect {
    fn debug(&self, message: &str) {
        self.0.lock().unwrap().push(("debug", message.to_string()));
    }
    fn info(&self, message: &str) {
        self.0.lock().unwrap().push(("info", message.to_string()));
    }
    fn warn(&self, message: &str) {
        self.0.lock().unwrap().push(("warn", message.to_string()));
    }
    fn error(&self, message: &str) {
        self.0.lock().unwrap().push(("error", message.to_string()));
    }
}

#[derive(Clone, Default)]
struct Buffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn global_sink_is_installed_once_and_can_be_overridden() {
    let doc = XmlDocument::parse("<r><name>x</name><extra/></r>").unwrap();
    let schema = Schema::new().field("name", string_value());

    assert!(ParserOptions::effective(&ParserOverrides::default()).logger.is_none());

    let global = Arc::new(Collect::default());
    set_logger(Some(global.clone() as Arc<dyn Logger>)).unwrap();
    assert!(ParserOptions::effective(&ParserOverrides::default()).logger.is_some());

    let second = Arc::new(Collect::default());
    assert!(set_logger(Some(second.clone() as Arc<dyn Logger>)).is_err());
    assert!(set_logger(None).is_err());

    parse_document(&doc, &schema, &ParserOverrides::default()).unwrap();
    assert_eq!(
        global.entries(),
        vec![("warn", "unknown key(s) 'extra' in r".to_string())]
    );
    assert!(second.entries().is_empty());

    // per-call silence
    parse_document(&doc, &schema, &ParserOverrides::new().logger(None)).unwrap();
    assert_eq!(global.entries().len(), 1);

    // per-call sink replaces the global one
    let local = Arc::new(Collect::default());
    let overrides = ParserOverrides::new().logger(Some(local.clone() as Arc<dyn Logger>));
    parse_document(&doc, &schema, &overrides).unwrap();
    assert_eq!(global.entries().len(), 1);
    assert_eq!(local.entries().len(), 1);
}

#[test]
fn tracing_logger_forwards_to_subscriber() {
    let buffer = Buffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();

    let doc = XmlDocument::parse("<r><legacy>old</legacy></r>").unwrap();
    let schema = Schema::new().field("legacy", unknown_value());
    let overrides = ParserOverrides::new().logger(Some(Arc::new(TracingLogger) as Arc<dyn Logger>));

    tracing::subscriber::with_default(subscriber, || {
        parse_document(&doc, &schema, &overrides).unwrap();
        TracingLogger.error("failed");
    });

    let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
    let warn_line = output
        .lines()
        .find(|line| line.contains("unknown value for key legacy: 'old'"))
        .unwrap();
    assert!(warn_line.contains("WARN"));
    assert!(warn_line.contains("xmlmap"));
    assert!(output.lines().any(|line| line.contains("ERROR") && line.contains("failed")));
}
