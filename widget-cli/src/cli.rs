use std::future::Future;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Select, Text};
use tracing::debug;
use widget_core::{Config, Units, Widget, provider_from_config};

use crate::present;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-widget", version, about = "Current weather for a city")]
pub struct Cli {
    /// Unit system for this run: metric, imperial or standard.
    #[arg(long, global = true, value_parser = parse_units)]
    pub units: Option<Units>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key, default city and unit system.
    Configure,

    /// Show current weather for a city.
    Show {
        /// City name, e.g. "London".
        city: String,
    },

    /// Show current weather for a coordinate pair.
    Coords {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },

    /// Prompt for cities until Esc or Ctrl-C (the default).
    Interactive,
}

fn parse_units(value: &str) -> Result<Units, String> {
    Units::try_from(value).map_err(|e| e.to_string())
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;

        match self.command.unwrap_or(Command::Interactive) {
            Command::Configure => configure(&mut config)?,
            Command::Show { city } => {
                let widget = build_widget(&config, self.units)?;
                drive(&widget, widget.submit(&city)).await;
            }
            Command::Coords { lat, lon } => {
                let widget = build_widget(&config, self.units)?;
                drive(&widget, widget.show_coordinates(lat, lon)).await;
            }
            Command::Interactive => {
                let widget = build_widget(&config, self.units)?;
                interactive(&widget, config.default_city()).await?;
            }
        }

        Ok(())
    }
}

fn build_widget(config: &Config, units: Option<Units>) -> anyhow::Result<Widget> {
    let mut config = config.clone();
    if let Some(units) = units {
        config.units = units;
    }

    let provider = provider_from_config(&config)?;
    Ok(Widget::new(provider, config.units))
}

/// Run one widget operation, drawing each distinct view state as it appears.
async fn drive(widget: &Widget, action: impl Future<Output = ()>) {
    let mut rx = widget.subscribe();
    let mut last: Option<String> = None;
    tokio::pin!(action);

    loop {
        tokio::select! {
            () = &mut action => break,
            Ok(()) = rx.changed() => {
                let frame = present::render(&rx.borrow_and_update());
                draw(frame, &mut last);
            }
        }
    }

    draw(present::render(&widget.view()), &mut last);
}

fn draw(frame: Option<String>, last: &mut Option<String>) {
    match frame {
        Some(frame) if last.as_ref() != Some(&frame) => {
            println!("{frame}");
            *last = Some(frame);
        }
        _ => {}
    }
}

async fn interactive(widget: &Widget, default_city: Option<&str>) -> anyhow::Result<()> {
    if let Some(city) = default_city {
        drive(widget, widget.show_city(city)).await;
    }

    loop {
        let initial = widget.view().input;
        let answer =
            tokio::task::spawn_blocking(move || Text::new("City:").with_initial_value(&initial).prompt())
                .await
                .context("Prompt task failed")?;

        match answer {
            Ok(input) => drive(widget, widget.submit(&input)).await,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                debug!("Prompt closed");
                return Ok(());
            }
            Err(e) => return Err(e).context("Failed to read city"),
        }
    }
}

fn configure(config: &mut Config) -> anyhow::Result<()> {
    let has_key = config.api_key.is_some();
    let prompt = if has_key {
        "OpenWeather API key (leave empty to keep the current one):"
    } else {
        "OpenWeather API key:"
    };

    let api_key = Password::new(prompt)
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;

    match api_key.trim() {
        "" if has_key => {}
        "" => bail!("An API key is required."),
        key => config.set_api_key(key.to_string()),
    }

    let current_city = config.default_city.clone().unwrap_or_default();
    let city = Text::new("Default city (optional):")
        .with_initial_value(&current_city)
        .prompt_skippable()?;
    config.default_city = city.map(|c| c.trim().to_string()).filter(|c| !c.is_empty());

    let start = Units::all().iter().position(|u| *u == config.units).unwrap_or(0);
    config.units = Select::new("Units:", Units::all().to_vec())
        .with_starting_cursor(start)
        .prompt()?;

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}
