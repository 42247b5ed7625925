use std::io::Write;
use std::path::Path;

use crate::common::{say, Kiosk, Notifier, Probe, Result, Sleeper};
use crate::diagnostics::{free_space, human_size, read_cameras};
use crate::poller::Poller;

pub const MSG_STARTING: &str = "Starting";
pub const MSG_LAUNCHING: &str = "Launching browser";
pub const MSG_TESTING: &str = "Testing";

const HELP: &str = "\
The cameras are managed by the Agent DVR service (https://www.ispyconnect.com/download.aspx),
which is configured through its own browser menu.

Agent stores its camera configuration in {camerafile}

This program, AgentStart, needs no configuration. It waits until Agent is serving
on {target}, then starts {browser} in kiosk mode to present the live feeds.
";

pub struct AgentStart {
    config: crate::Config,
    probe: Box<dyn Probe>,
    sleeper: Box<dyn Sleeper>,
    notifier: Box<dyn Notifier>,
    kiosk: Box<dyn Kiosk>,
}

impl AgentStart {
    pub fn new(
        config: crate::Config,
        probe: Box<dyn Probe>,
        sleeper: Box<dyn Sleeper>,
        notifier: Box<dyn Notifier>,
        kiosk: Box<dyn Kiosk>,
    ) -> Self {
        Self {
            config,
            probe,
            sleeper,
            notifier,
            kiosk,
        }
    }

    /// Waits for Agent, then brings up the kiosk browser and dismisses its
    /// first-run dialog. Only launcher failures are returned.
    pub fn run(&mut self, out: &mut dyn Write) -> Result<()> {
        self.notifier.notify(MSG_STARTING);

        Poller::new(
            self.probe.as_ref(),
            self.sleeper.as_ref(),
            self.config.poll_interval(),
        )
        .wait_until_available(out);

        self.notifier.notify(MSG_LAUNCHING);

        self.kiosk.open(&self.config.url)?;
        self.sleeper.sleep(self.config.settle_delay());

        self.kiosk.dismiss_dialog()?;
        say(out, "My work here is done\n");

        // Stay alive until the keypress has been handled.
        self.sleeper.sleep(self.config.settle_delay());
        Ok(())
    }

    /// Prints the help text, the camera list and free disk space, then sends
    /// a test notification. Nothing in here is fatal.
    pub fn help(&self, out: &mut dyn Write) {
        let text = HELP
            .replace("{camerafile}", &self.config.camera_file)
            .replace("{target}", &format!("{}:{}", self.config.host, self.config.port))
            .replace("{browser}", &self.config.browser);
        say(out, &format!("{text}\n"));

        self.print_cameras(out);
        self.print_free_space(out);

        self.notifier.notify(MSG_TESTING);
    }

    fn print_cameras(&self, out: &mut dyn Write) {
        match read_cameras(Path::new(&self.config.camera_file)) {
            Ok(cameras) => {
                for camera in cameras {
                    say(
                        out,
                        &format!(
                            "Camera '{}' = {} [{}/{}]\n",
                            camera.name, camera.url, camera.login, camera.password
                        ),
                    );
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "Camera list unavailable");
                say(out, &format!("error: {err}\n"));
            }
        }
        say(out, "\n");
    }

    fn print_free_space(&self, out: &mut dyn Write) {
        match free_space(Path::new(&self.config.system_drive)) {
            Some(bytes) => say(
                out,
                &format!("Free space on {}: {}\n\n", self.config.system_drive, human_size(bytes)),
            ),
            None => say(
                out,
                &format!("Free space on {}: unknown\n\n", self.config.system_drive),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Error;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::time::Duration;

    type Log = Rc<RefCell<Vec<String>>>;

    struct FakeProbe {
        failures_left: Cell<usize>,
        log: Log,
    }

    impl Probe for FakeProbe {
        fn is_reachable(&self) -> bool {
            self.log.borrow_mut().push("probe".into());
            match self.failures_left.get() {
                0 => true,
                n => {
                    self.failures_left.set(n - 1);
                    false
                }
            }
        }
    }

    struct FakeSleeper(Log);

    impl Sleeper for FakeSleeper {
        fn sleep(&self, duration: Duration) {
            self.0.borrow_mut().push(format!("sleep {}s", duration.as_secs()));
        }
    }

    struct FakeNotifier {
        fail: bool,
        log: Log,
    }

    impl Notifier for FakeNotifier {
        fn send(&self, message: &str) -> Result<()> {
            self.log.borrow_mut().push(format!("mail {message}"));
            if self.fail {
                let source: Box<dyn std::error::Error> = "connection refused".into();
                return Err(Error::MailError {
                    message: "Failed to send mail".into(),
                    source,
                });
            }
            Ok(())
        }
    }

    struct FakeKiosk {
        fail_open: bool,
        fail_escape: bool,
        log: Log,
    }

    impl Kiosk for FakeKiosk {
        fn open(&mut self, url: &url::Url) -> Result<()> {
            if self.fail_open {
                return Err(Error::LaunchError {
                    command: "msedge".into(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
                });
            }
            self.log.borrow_mut().push(format!("open {url}"));
            Ok(())
        }

        fn dismiss_dialog(&mut self) -> Result<()> {
            if self.fail_escape {
                let source: Box<dyn std::error::Error> = "no display".into();
                return Err(Error::KeyboardError {
                    message: "Failed to open virtual keyboard".into(),
                    source,
                });
            }
            self.log.borrow_mut().push("escape".into());
            Ok(())
        }
    }

    struct Setup {
        failures: usize,
        mail_fails: bool,
        open_fails: bool,
        escape_fails: bool,
        config: crate::Config,
    }

    impl Default for Setup {
        fn default() -> Self {
            Self {
                failures: 0,
                mail_fails: false,
                open_fails: false,
                escape_fails: false,
                config: crate::Config::default(),
            }
        }
    }

    impl Setup {
        fn build(self) -> (AgentStart, Log) {
            let log: Log = Rc::default();
            let service = AgentStart::new(
                self.config,
                Box::new(FakeProbe {
                    failures_left: Cell::new(self.failures),
                    log: log.clone(),
                }),
                Box::new(FakeSleeper(log.clone())),
                Box::new(FakeNotifier {
                    fail: self.mail_fails,
                    log: log.clone(),
                }),
                Box::new(FakeKiosk {
                    fail_open: self.open_fails,
                    fail_escape: self.escape_fails,
                    log: log.clone(),
                }),
            );
            (service, log)
        }
    }

    #[test]
    fn run_sequence() {
        let (mut service, log) = Setup {
            failures: 2,
            ..Setup::default()
        }
        .build();
        let mut out = Vec::new();

        service.run(&mut out).unwrap();

        assert_eq!(
            *log.borrow(),
            vec![
                "mail Starting",
                "probe",
                "sleep 20s",
                "probe",
                "sleep 20s",
                "probe",
                "mail Launching browser",
                "open http://localhost:8090/",
                "sleep 20s",
                "escape",
                "sleep 20s",
            ]
        );
        assert!(String::from_utf8(out).unwrap().contains("My work here is done"));
    }

    #[test]
    fn configured_delays_are_used() {
        let (mut service, log) = Setup {
            config: crate::Config {
                poll_seconds: 1,
                settle_seconds: 3,
                ..crate::Config::default()
            },
            failures: 1,
            ..Setup::default()
        }
        .build();

        service.run(&mut std::io::sink()).unwrap();

        let sleeps: Vec<String> = log
            .borrow()
            .iter()
            .filter(|entry| entry.starts_with("sleep"))
            .cloned()
            .collect();
        assert_eq!(sleeps, vec!["sleep 1s", "sleep 3s", "sleep 3s"]);
    }

    #[test]
    fn mail_failures_do_not_stop_the_launch() {
        let (mut service, log) = Setup {
            mail_fails: true,
            ..Setup::default()
        }
        .build();

        service.run(&mut std::io::sink()).unwrap();

        assert!(log.borrow().contains(&"escape".to_string()));
    }

    #[test]
    fn browser_failure_is_fatal() {
        let (mut service, log) = Setup {
            open_fails: true,
            ..Setup::default()
        }
        .build();

        let err = service.run(&mut std::io::sink()).unwrap_err();

        assert!(matches!(err, Error::LaunchError { .. }));
        assert!(!log.borrow().contains(&"escape".to_string()));
    }

    #[test]
    fn keyboard_failure_is_fatal() {
        let (mut service, log) = Setup {
            escape_fails: true,
            ..Setup::default()
        }
        .build();
        let mut out = Vec::new();

        let err = service.run(&mut out).unwrap_err();

        assert!(matches!(err, Error::KeyboardError { .. }));
        assert_eq!(
            *log.borrow(),
            vec![
                "mail Starting",
                "probe",
                "mail Launching browser",
                "open http://localhost:8090/",
                "sleep 20s",
            ]
        );
        assert!(!String::from_utf8(out).unwrap().contains("My work here is done"));
    }

    #[test]
    fn help_without_camera_file_still_sends_test_mail() {
        let dir = tempfile::tempdir().unwrap();
        let (service, log) = Setup {
            config: crate::Config {
                camera_file: dir.path().join("objects.xml").display().to_string(),
                ..crate::Config::default()
            },
            ..Setup::default()
        }
        .build();
        let mut out = Vec::new();

        service.help(&mut out);

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("error: Failed to read"));
        assert!(out.contains("Free space on"));
        assert_eq!(*log.borrow(), vec!["mail Testing"]);
    }

    #[test]
    fn help_lists_cameras() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("objects.xml");
        std::fs::write(
            &path,
            r#"<?xml version="1.0" encoding="utf-16"?>
<objects><cameras><camera name="Forecourt"><settings>
<substream>rtsp://10.0.0.21/stream2</substream><login>saphena</login><password>pw</password>
</settings></camera></cameras></objects>"#,
        )
        .unwrap();
        let (service, _log) = Setup {
            config: crate::Config {
                camera_file: path.display().to_string(),
                ..crate::Config::default()
            },
            ..Setup::default()
        }
        .build();
        let mut out = Vec::new();

        service.help(&mut out);

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains(&path.display().to_string()));
        assert!(out.contains("Camera 'Forecourt' = rtsp://10.0.0.21/stream2 [saphena/pw]"));
    }
}
