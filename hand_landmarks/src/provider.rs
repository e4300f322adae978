//! Landmark providers: the detector as seen from the frame loop.
//!
//! The detector itself (camera capture plus the pretrained hand model) runs
//! out of process. A provider hands back one [`Detection`] per call;
//! `Ok(None)` means the stream has ended.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::process::{Child, ChildStdout, Command, Stdio};

use crate::detection::Detection;
use crate::error::LandmarkError;
use crate::Result;

// ════════════════════════════════════════════════════════════════════════════
// LandmarkProvider trait
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver a [`Detection`] per frame.
pub trait LandmarkProvider {
    /// Block until the next frame's detection is available.
    fn next_detection(&mut self) -> Result<Option<Detection>>;
}

impl<P: LandmarkProvider + ?Sized> LandmarkProvider for Box<P> {
    fn next_detection(&mut self) -> Result<Option<Detection>> {
        (**self).next_detection()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// JSON-lines framing shared by both providers
// ════════════════════════════════════════════════════════════════════════════

struct JsonLines<R> {
    reader: R,
    line:   usize,
    buf:    String,
}

impl<R: BufRead> JsonLines<R> {
    fn new(reader: R) -> Self {
        JsonLines { reader, line: 0, buf: String::new() }
    }

    fn next(&mut self) -> Result<Option<Detection>> {
        loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;
            if self.buf.trim().is_empty() { continue; }

            let mut detection = Detection::from_json_line(&self.buf)
                .map_err(|source| LandmarkError::Parse { line: self.line, source })?;

            // A failed frame still counts as a frame, just without a hand.
            if let Some(err) = detection.error.take() {
                tracing::warn!("detector error: {}", err);
                detection.hands.clear();
            }
            return Ok(Some(detection));
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SubprocessProvider: live detector helper
// ════════════════════════════════════════════════════════════════════════════

/// How to launch the detector helper.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorOptions {
    pub python:               String,
    pub script:               String,
    pub camera:               u32,
    pub max_hands:            u32,
    pub detection_confidence: f32,
    pub tracking_confidence:  f32,
}

impl Default for DetectorOptions {
    fn default() -> Self {
        DetectorOptions {
            python:               "python3".to_string(),
            script:               "scripts/hand_detect.py".to_string(),
            camera:               0,
            max_hands:            2,
            detection_confidence: 0.7,
            tracking_confidence:  0.5,
        }
    }
}

/// Runs the detector helper as a child process and reads its stdout.
///
/// The helper owns the camera. It prints `READY` once the camera is open and
/// the model is loaded, then one JSON detection per captured frame. The
/// confidence thresholds are applied by the model itself; every hand the
/// helper reports is passed through in its original order.
pub struct SubprocessProvider {
    child: Child,
    lines: JsonLines<BufReader<ChildStdout>>,
}

impl SubprocessProvider {
    /// Launch the helper and wait for its `READY` line.
    ///
    /// Fails when the helper cannot be started or exits before signalling
    /// ready, which in practice means the camera could not be opened.
    pub fn spawn(opts: &DetectorOptions) -> Result<Self> {
        let mut child = Command::new(&opts.python)
            .arg(&opts.script)
            .args(["--camera", &opts.camera.to_string()])
            .args(["--max-hands", &opts.max_hands.to_string()])
            .args(["--detection-confidence", &opts.detection_confidence.to_string()])
            .args(["--tracking-confidence", &opts.tracking_confidence.to_string()])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| LandmarkError::Spawn { script: opts.script.clone(), source })?;

        let Some(stdout) = child.stdout.take() else {
            stop(&mut child);
            return Err(LandmarkError::PipeClosed("stdout"));
        };
        let mut reader = BufReader::new(stdout);

        let mut ready = String::new();
        if let Err(e) = reader.read_line(&mut ready) {
            stop(&mut child);
            return Err(e.into());
        }
        if ready.trim() != "READY" {
            stop(&mut child);
            return Err(LandmarkError::NotReady(ready.trim().to_string()));
        }

        tracing::info!(
            "detector ready (pid: {}, camera: {}, max hands: {})",
            child.id(),
            opts.camera,
            opts.max_hands
        );

        Ok(SubprocessProvider { child, lines: JsonLines::new(reader) })
    }
}

fn stop(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

impl LandmarkProvider for SubprocessProvider {
    fn next_detection(&mut self) -> Result<Option<Detection>> {
        let detection = self.lines.next()?;
        if detection.is_none() {
            tracing::warn!("detector closed its output");
        }
        Ok(detection)
    }
}

impl Drop for SubprocessProvider {
    fn drop(&mut self) {
        tracing::info!("stopping detector (pid: {})", self.child.id());
        stop(&mut self.child);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ReplayProvider: recorded sessions
// ════════════════════════════════════════════════════════════════════════════

/// Replays detections recorded in the same JSON-lines format.
pub struct ReplayProvider {
    lines: JsonLines<Box<dyn BufRead>>,
}

impl ReplayProvider {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LandmarkError::Replay {
            path: path.display().to_string(),
            source,
        })?;
        tracing::info!("replaying detections from {}", path.display());
        Ok(Self::from_reader(BufReader::new(file)))
    }

    pub fn from_reader<R: BufRead + 'static>(reader: R) -> Self {
        ReplayProvider { lines: JsonLines::new(Box::new(reader)) }
    }
}

impl LandmarkProvider for ReplayProvider {
    fn next_detection(&mut self) -> Result<Option<Detection>> {
        self.lines.next()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    const FRAME: &str = r#"{"width":640,"height":480,"hands":[{"score":0.9,"landmarks":[{"x":0.1,"y":0.2}]}]}"#;

    #[test]
    fn replay_reads_frames_then_ends() {
        let text = format!("{FRAME}\n\n{}\n", r#"{"width":640,"height":480}"#);
        let mut p = ReplayProvider::from_reader(Cursor::new(text));
        assert!(p.next_detection().unwrap().unwrap().has_hands());
        assert!(!p.next_detection().unwrap().unwrap().has_hands());
        assert!(p.next_detection().unwrap().is_none());
    }

    #[test]
    fn replay_reports_line_of_bad_json() {
        let text = format!("{FRAME}\nnot json\n");
        let mut p = ReplayProvider::from_reader(Cursor::new(text));
        p.next_detection().unwrap();
        match p.next_detection() {
            Err(LandmarkError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn detector_error_frame_has_no_hands() {
        let text = r#"{"width":1,"height":1,"hands":[{"landmarks":[]}],"error":"blur"}"#;
        let mut p = ReplayProvider::from_reader(Cursor::new(text.to_string()));
        let d = p.next_detection().unwrap().unwrap();
        assert!(!d.has_hands());
    }

    #[test]
    fn replay_opens_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "{FRAME}").unwrap();
        let mut p = ReplayProvider::open(f.path()).unwrap();
        assert!(p.next_detection().unwrap().is_some());
        assert!(p.next_detection().unwrap().is_none());
    }

    #[test]
    fn missing_replay_file_is_an_error() {
        assert!(matches!(
            ReplayProvider::open("/definitely/not/here.jsonl"),
            Err(LandmarkError::Replay { .. })
        ));
    }

    /// Options that run `script` through `sh` in place of the python helper.
    /// The detector flags land in `$1..` and are ignored.
    #[cfg(unix)]
    fn shell_helper(script: &str) -> (tempfile::NamedTempFile, DetectorOptions) {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(script.as_bytes()).unwrap();
        f.flush().unwrap();
        let opts = DetectorOptions {
            python: "sh".into(),
            script: f.path().display().to_string(),
            ..DetectorOptions::default()
        };
        (f, opts)
    }

    #[cfg(unix)]
    #[test]
    fn live_hands_pass_through_regardless_of_handedness_score() {
        let hand = format!(
            r#"{{"handedness":"Left","score":0.62,"landmarks":[{}]}}"#,
            vec![r#"{"x":0.5,"y":0.5}"#; 21].join(",")
        );
        let second = r#"{"handedness":"Right","score":0.99,"landmarks":[]}"#;
        let script = format!(
            "echo READY\necho '{{\"width\":640,\"height\":480,\"hands\":[{hand},{second}]}}'\n"
        );
        let (_f, opts) = shell_helper(&script);

        let mut p = SubprocessProvider::spawn(&opts).unwrap();
        let d = p.next_detection().unwrap().unwrap();
        assert_eq!(d.hands.len(), 2);
        assert_eq!(d.hands[0].score, 0.62);
        assert_eq!(d.hands[0].landmarks.len(), 21);
        assert!(p.next_detection().unwrap().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn helper_without_ready_line_is_rejected() {
        let (_f, opts) = shell_helper("echo 'cannot open camera 0'\n");
        match SubprocessProvider::spawn(&opts) {
            Err(LandmarkError::NotReady(line)) => assert_eq!(line, "cannot open camera 0"),
            other => panic!("expected NotReady, got {:?}", other.map(|_| ())),
        }
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_handshake_stops_the_helper() {
        let pid_file = tempfile::NamedTempFile::new().unwrap();
        let script = format!(
            "echo $$ > '{}'\nprintf '\\377\\n'\nsleep 30\n",
            pid_file.path().display()
        );
        let (_f, opts) = shell_helper(&script);

        assert!(matches!(SubprocessProvider::spawn(&opts), Err(LandmarkError::Io(_))));

        let pid = std::fs::read_to_string(pid_file.path()).unwrap();
        let alive = std::process::Command::new("kill")
            .args(["-0", pid.trim()])
            .stderr(std::process::Stdio::null())
            .status()
            .unwrap();
        assert!(!alive.success());
    }

    #[test]
    fn missing_interpreter_fails_to_spawn() {
        let opts = DetectorOptions {
            python: "/definitely/not/a/python".into(),
            ..DetectorOptions::default()
        };
        assert!(matches!(
            SubprocessProvider::spawn(&opts),
            Err(LandmarkError::Spawn { .. })
        ));
    }
}
