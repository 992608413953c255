// tests/check.rs

use std::io::Cursor;

use dht_check::{
    // ---
    check,
    CheckConfig,
    Cli,
    LineReader,
    ProbeError,
    Report,
    Result,
    Severity,
    TelemetrySource,
};

use clap::Parser;

/// Serves bytes from memory through the same framing as the serial adapter
struct MemorySource {
    reader: LineReader<Cursor<Vec<u8>>>,
    reads: usize,
}

impl MemorySource {
    fn new(bytes: &str) -> Self {
        Self {
            reader: LineReader::new(
                Cursor::new(bytes.as_bytes().to_vec()),
                dht_check::MAX_LINE_LEN,
            ),
            reads: 0,
        }
    }
}

impl TelemetrySource for MemorySource {
    fn read_line(&mut self) -> Result<Vec<u8>> {
        self.reads += 1;
        self.reader.read_line().map_err(|err| ProbeError::Io {
            context: "cannot read from memory".to_string(),
            source: err,
        })
    }

    fn name(&self) -> &str {
        "memory"
    }
}

fn config(args: &[&str]) -> CheckConfig {
    let cli = Cli::try_parse_from(std::iter::once("check_dht").chain(args.iter().copied()))
        .expect("arguments should parse");
    CheckConfig::try_from(&cli).expect("configuration should be valid")
}

fn report_for(line: &str, args: &[&str]) -> Report {
    let config = config(args);
    let mut source = MemorySource::new(line);
    let outcome = check::run(&mut source, &config.thresholds);
    assert_eq!(source.reads, 1, "exactly one line is read");
    Report::from_outcome(&outcome)
}

#[test]
fn onboard_only_with_defaults_is_ok() {
    // ---
    // Arrange
    // ---
    let line = "{\"onboard\": 25.0}\n";

    // ---
    // Act
    // ---
    let report = report_for(line, &[]);

    // ---
    // Assert
    // ---
    assert_eq!(report.severity(), Severity::Ok);
    assert_eq!(report.exit_code(), 0);
    assert_eq!(report.to_string(), "OK - onboard=25°C | onboard=25;30;40");
}

#[test]
fn onboard_between_warning_and_critical_is_warning() {
    // ---
    // Arrange
    // ---
    let line = "{\"onboard\": 35.0}\n";
    let args = ["--warning", "30", "--critical", "40"];

    // ---
    // Act
    // ---
    let report = report_for(line, &args);

    // ---
    // Assert
    // ---
    assert_eq!(report.severity(), Severity::Warning);
    assert_eq!(report.exit_code(), 1);
    assert!(report.to_string().starts_with("WARNING - onboard=35°C"));
}

#[test]
fn humidity_above_critical_is_critical() {
    // ---
    // Arrange
    // ---
    let line = "{\"temperature\": 22, \"onboard\": 22, \"humidity\": 70, \"error\": 0}\r\n";
    let args = ["--humidity-warning", "60", "--humidity-critical", "65"];

    // ---
    // Act
    // ---
    let report = report_for(line, &args);

    // ---
    // Assert
    // ---
    assert_eq!(report.severity(), Severity::Critical);
    assert_eq!(report.exit_code(), 2);
    assert!(report
        .to_string()
        .starts_with("CRITICAL - temperature=22°C onboard=22°C humidity=70%"));
}

#[test]
#[cfg(unix)]
fn device_fault_short_circuits_evaluation() {
    // ---
    // Arrange
    // ---
    // every measurement would be OK; the fault still wins
    let line = "{\"temperature\": 22, \"onboard\": 22, \"humidity\": 35, \"error\": 5}\n";

    // ---
    // Act
    // ---
    let report = report_for(line, &[]);

    // ---
    // Assert
    // ---
    assert_eq!(report.exit_code(), 2);
    let text = report.to_string();
    assert!(text.contains("device reports error 5 (EIO: "), "{text}");
    assert!(text.contains("header pins"), "{text}");
    assert!(!text.contains("humidity="), "{text}");
}

#[test]
#[cfg(unix)]
fn device_fault_wins_over_out_of_range_values() {
    // ---
    // Arrange
    // ---
    let mut source = MemorySource::new(
        "{\"temperature\": 90, \"onboard\": 90, \"humidity\": 99, \"error\": 15.0}\n",
    );

    // ---
    // Act
    // ---
    let err = check::probe(&mut source).unwrap_err();

    // ---
    // Assert
    // ---
    match err {
        ProbeError::DeviceFault(fault) => {
            assert_eq!(fault.code, 15);
            assert_eq!(fault.name().as_deref(), Some("ENOTBLK"));
        }
        other => panic!("expected device fault, got {other:?}"),
    }
}

#[test]
fn missing_measurement_is_unknown_not_ok() {
    // ---
    // Arrange
    // ---
    let line = "{\"temperature\": 22, \"humidity\": 30, \"error\": 0}\n";

    // ---
    // Act
    // ---
    let report = report_for(line, &[]);

    // ---
    // Assert
    // ---
    assert_eq!(report.severity(), Severity::Unknown);
    assert_eq!(report.exit_code(), 3);
    assert!(report.to_string().contains("onboard"));
}

#[test]
fn malformed_line_is_unknown() {
    // ---
    // Arrange
    // ---
    let line = "temp=22.5\n";

    // ---
    // Act
    // ---
    let report = report_for(line, &[]);

    // ---
    // Assert
    // ---
    assert_eq!(report.exit_code(), 3);
    assert!(report.to_string().starts_with("UNKNOWN - invalid telemetry"));
}

#[test]
fn closed_stream_is_unknown() {
    // ---
    // Arrange
    // ---
    let line = "";

    // ---
    // Act
    // ---
    let report = report_for(line, &[]);

    // ---
    // Assert
    // ---
    assert_eq!(report.exit_code(), 3);
    assert!(report.to_string().contains("closed the connection"));
}

#[test]
fn only_the_first_line_is_used() {
    // ---
    // Arrange
    // ---
    let lines = "{\"onboard\": 20}\n{\"onboard\": 99}\n";

    // ---
    // Act
    // ---
    let report = report_for(lines, &[]);

    // ---
    // Assert
    // ---
    assert_eq!(report.severity(), Severity::Ok);
}

#[test]
fn unavailable_port_is_unknown() {
    // ---
    // Arrange
    // ---
    let config = config(&["--port", "/dev/dht-check-no-such-device", "--timeout", "1"]);

    // ---
    // Act
    // ---
    let report = Report::from_outcome(&check::check_serial(&config));

    // ---
    // Assert
    // ---
    assert_eq!(report.severity(), Severity::Unknown);
    assert_eq!(report.exit_code(), 3);
    assert!(report
        .to_string()
        .starts_with("UNKNOWN - cannot open serial port /dev/dht-check-no-such-device"));
}

#[test]
fn inverted_threshold_is_rejected_before_io() {
    // ---
    // Arrange
    // ---
    let cli = Cli::try_parse_from(["check_dht", "-w", "50", "-c", "40"]).unwrap();

    // ---
    // Act
    // ---
    let err = CheckConfig::try_from(&cli).unwrap_err();

    // ---
    // Assert
    // ---
    assert!(matches!(err, ProbeError::Config(_)));
    assert_eq!(Report::from_error(&err).exit_code(), 3);
}
