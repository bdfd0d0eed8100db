// Celebration Countdown
// Terminal driver: renders the configured countdown until it expires

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use celebration_countdown::models::countdown::CountdownSnapshot;
use celebration_countdown::models::settings::{CountdownSettings, OutputFormat};
use celebration_countdown::services::clock::SystemClock;
use celebration_countdown::services::countdown::{
    CountdownSession, CountdownTicker, ExpireCallback, FormattedDuration,
};
use celebration_countdown::services::device;
use celebration_countdown::services::notification::NotificationService;
use celebration_countdown::services::settings::SettingsService;

#[derive(Parser)]
#[command(name = "celebration-countdown")]
#[command(about = "Counts down to a civil date-time in a chosen time zone")]
struct Args {
    /// Settings file to load instead of the platform default; it must exist
    config: Option<PathBuf>,

    /// Write the default settings file and exit
    #[arg(long)]
    write_config: bool,

    /// Pick the refresh cadence from the detected device tier
    #[arg(long)]
    adaptive: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    let settings_service = match args.config {
        Some(path) => SettingsService::new(Some(path)),
        None => SettingsService::at_default_location(),
    };

    if args.write_config {
        let path = settings_service.save(&CountdownSettings::default())?;
        println!("Wrote default settings to {}", path.display());
        return Ok(());
    }

    let settings = settings_service
        .load()
        .context("Failed to load countdown settings")?;
    let tier = args.adaptive.then(|| device::classify(&device::detect()));
    let cadence = device::cadence(&settings, tier)?;

    let notifier = NotificationService::new(settings.notify_on_expire);
    let title = format!("Countdown to {}", settings.target);
    let on_expire: ExpireCallback = Box::new(move || {
        if let Err(err) = notifier.show_expired(&title, "The wait is over!") {
            log::warn!("Failed to post expiry notification: {err:?}");
        }
    });

    // A bad target or zone means no countdown is shown at all.
    let session = CountdownSession::from_settings(&settings, SystemClock, Some(on_expire))
        .context("Invalid countdown configuration")?;

    if session.is_expired() {
        log::info!("Target {} has already passed", settings.target);
        return Ok(());
    }

    log::info!(
        "Counting down to {} {} every {:?}",
        session.target().civil(),
        session.target().timezone().name(),
        cadence
    );

    let mut handle = CountdownTicker::spawn(session, cadence)?;
    render(settings.output, &handle.snapshot())?;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            alive = handle.changed() => {
                let snapshot = handle.snapshot();
                if snapshot.is_expired() {
                    break;
                }
                render(settings.output, &snapshot)?;
                if !alive {
                    break;
                }
            }
            _ = &mut ctrl_c => {
                log::info!("Interrupted; stopping countdown");
                handle.cancel();
                break;
            }
        }
    }

    if settings.output == OutputFormat::Text {
        println!();
    }
    Ok(())
}

fn render(output: OutputFormat, snapshot: &CountdownSnapshot) -> Result<()> {
    let mut stdout = io::stdout().lock();
    match output {
        OutputFormat::Text => {
            if let Some(formatted) = FormattedDuration::visible(snapshot) {
                write!(stdout, "\rTime remaining: {formatted}")?;
            }
        }
        OutputFormat::Json => {
            let line = serde_json::to_string(snapshot)?;
            writeln!(stdout, "{line}")?;
        }
    }
    stdout.flush()?;
    Ok(())
}
