//! Shared fixtures for the analysis integration tests.
#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use faultline_analysis::detectors::DetectorRegistry;
use faultline_analysis::engine::UnitContext;
use faultline_analysis::report::{BugInstance, BugSink, Priority};
use faultline_analysis::{Detector, DetectorFactory};
use faultline_core::errors::AnalysisError;
use faultline_core::{Cancellable, CancellationToken};

/// Ordered record of every detector and sink call made during a run.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn count_prefix(&self, prefix: &str) -> usize {
        self.entries().iter().filter(|e| e.starts_with(prefix)).count()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }
}

/// What a [`ScriptedDetector`] does on each unit.
#[derive(Clone)]
pub enum Behavior {
    /// Report one finding per unit.
    Report,
    /// Return a unit-analysis error on every unit.
    FailUnit,
    /// Return an internal error on every unit.
    FailInternal,
    /// Panic on every unit.
    Panic,
    /// Panic in finalize only.
    PanicInFinalize,
    /// Cancel the token when examining the named unit.
    CancelOn(String, CancellationToken),
    /// Report like `Report`, then cancel the token in finalize.
    CancelInFinalize(CancellationToken),
}

pub struct ScriptedDetector {
    name: String,
    behavior: Behavior,
    log: CallLog,
    sink: Arc<dyn BugSink>,
}

impl Detector for ScriptedDetector {
    fn examine(&mut self, ctx: &UnitContext<'_>) -> Result<(), AnalysisError> {
        self.log.push(format!("{}.examine({})", self.name, ctx.name()));
        match &self.behavior {
            Behavior::Report | Behavior::PanicInFinalize | Behavior::CancelInFinalize(_) => {
                self.sink.report(
                    BugInstance::new("TEST_PATTERN", Priority::Normal, &self.name, ctx.name())
                        .with_source_file(ctx.source_file()),
                );
                Ok(())
            }
            Behavior::FailUnit => Err(AnalysisError::unit(ctx.name(), "cannot make sense of it")),
            Behavior::FailInternal => Err(AnalysisError::internal("index out of range")),
            Behavior::Panic => panic!("detector exploded"),
            Behavior::CancelOn(unit, token) => {
                if ctx.name() == unit {
                    token.cancel();
                }
                Ok(())
            }
        }
    }

    fn finalize(&mut self) -> Result<(), AnalysisError> {
        self.log.push(format!("{}.finalize", self.name));
        match &self.behavior {
            Behavior::PanicInFinalize => panic!("finalize exploded"),
            Behavior::CancelInFinalize(token) => token.cancel(),
            _ => {}
        }
        Ok(())
    }
}

/// A factory whose detectors record their calls in `log`.
pub fn scripted_factory(name: &str, enabled: bool, behavior: Behavior, log: &CallLog) -> DetectorFactory {
    let detector_name = name.to_string();
    let log = log.clone();
    DetectorFactory::new(name, enabled, move |sink| {
        Box::new(ScriptedDetector {
            name: detector_name.clone(),
            behavior: behavior.clone(),
            log: log.clone(),
            sink,
        }) as Box<dyn Detector>
    })
}

/// A factory whose detectors do nothing.
pub fn noop_factory(name: &str, enabled: bool) -> DetectorFactory {
    scripted_factory(name, enabled, Behavior::Report, &CallLog::default())
}

pub fn registry_of(factories: Vec<DetectorFactory>) -> DetectorRegistry {
    let mut builder = DetectorRegistry::builder();
    for factory in factories {
        builder.register(factory).unwrap();
    }
    builder.build()
}

/// Sink that records its calls in a [`CallLog`] and keeps findings.
#[derive(Default)]
pub struct RecordingSink {
    pub log: CallLog,
    findings: Mutex<Vec<BugInstance>>,
    errors: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn with_log(log: &CallLog) -> Self {
        Self {
            log: log.clone(),
            ..Default::default()
        }
    }

    pub fn findings(&self) -> Vec<BugInstance> {
        self.findings.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl BugSink for RecordingSink {
    fn report(&self, bug: BugInstance) {
        self.findings.lock().unwrap().push(bug);
    }

    fn log_error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }

    fn finish(&self) {
        self.log.push("sink.finish");
    }

    fn report_queued_errors(&self) {
        self.log.push("sink.report_queued_errors");
    }
}

/// TOML descriptor for a unit, as read by `TomlUnitDecoder`.
pub fn descriptor(name: &str, source_file: Option<&str>) -> String {
    match source_file {
        Some(file) => format!("name = \"{name}\"\nsource_file = \"{file}\"\n"),
        None => format!("name = \"{name}\"\n"),
    }
}

/// Write a zip archive with the given `(entry name, contents)` pairs.
pub fn write_archive(dir: &Path, file_name: &str, entries: &[(&str, String)]) -> PathBuf {
    let path = dir.join(file_name);
    let file = std::fs::File::create(&path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Stored);
    for (name, contents) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(contents.as_bytes()).unwrap();
    }
    writer.finish().unwrap();
    path
}

/// Write an archive holding one unit entry per name, in order.
pub fn write_unit_archive(dir: &Path, file_name: &str, units: &[&str]) -> PathBuf {
    let entries: Vec<(String, String)> = units
        .iter()
        .map(|u| {
            let simple = u.rsplit('.').next().unwrap_or(u);
            (
                format!("{}.class", u.replace('.', "/")),
                descriptor(u, Some(&format!("{simple}.java"))),
            )
        })
        .collect();
    let borrowed: Vec<(&str, String)> = entries.iter().map(|(n, c)| (n.as_str(), c.clone())).collect();
    write_archive(dir, file_name, &borrowed)
}

/// Write a standalone unit file.
pub fn write_unit_file(dir: &Path, file_name: &str, unit: &str, source_file: Option<&str>) -> PathBuf {
    let path = dir.join(file_name);
    std::fs::write(&path, descriptor(unit, source_file)).unwrap();
    path
}
