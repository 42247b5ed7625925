use clap::{crate_authors, crate_description, crate_name, crate_version, Arg, ArgAction, Command};
use pretty_env_logger::env_logger::Builder;
use std::env;
use std::io::Write;
use std::process::exit;

use agentstart::Config;

/// journald priority for a log level, see sd-daemon(3).
fn journald_priority(level: log::Level) -> u8 {
    match level {
        log::Level::Error => 3,
        log::Level::Warn => 4,
        log::Level::Info => 6,
        log::Level::Debug | log::Level::Trace => 7,
    }
}

fn setup_logger() {
    let mut builder: Builder = match env::var("RUST_LOG_STYLE") {
        Ok(style) if style == "SYSTEMD" => {
            let mut builder = pretty_env_logger::env_logger::builder();
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "<{}>{}: {}",
                    journald_priority(record.level()),
                    record.target(),
                    record.args()
                )
            });
            builder
        }
        _ => pretty_env_logger::formatted_builder(),
    };

    if env::var("RUST_LOG").is_err() {
        builder.filter_level(log::LevelFilter::Info);
    }
    builder.init();
}

pub(crate) fn main() {
    let cli = Command::new("AgentStart")
        .about(format!(
            "{}\n{} {}",
            crate_description!(),
            "Overrides are read from agentstart.yaml in the working directory",
            "and from AGENTSTART_* environment variables.",
        ))
        .disable_help_flag(true)
        .arg(
            Arg::new("help")
                .action(ArgAction::SetTrue)
                .short('?')
                .long("help")
                .help("Show help, the camera list and free disk space, then send a test mail"),
        )
        .author(crate_authors!("\n"));

    let args = cli.get_matches();

    setup_logger();

    println!(
        "{} {} - {}\n",
        crate_name!(),
        crate_version!(),
        crate_description!()
    );

    let mut service = Config::load().get_service();
    let mut stdout = std::io::stdout();

    if args.get_flag("help") {
        service.help(&mut stdout);
        exit(0);
    }

    if let Err(err) = service.run(&mut stdout) {
        tracing::debug!(error = ?err, "Supervisor stopped");
        eprintln!("Error: {err}");
        exit(1);
    }
}
