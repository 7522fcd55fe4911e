//! Command-line front end
//!
//! Reads macro source or JSON from files or stdin, runs the codec and
//! writes the result. Diagnostics are reported through the log.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::config::{Command, Config};
use crate::decoder::{decode, detect_modes};
use crate::diagnostics::{DecodeResult, Diagnostic, Severity};
use crate::encoder::Encoder;
use crate::model::SetCollection;

/// Quiet period after a file event before re-rendering
const WATCH_DEBOUNCE: Duration = Duration::from_millis(150);

/// JSON accepted by `encode`: full decode output or a bare set collection
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EncodeInput {
    Decoded { sets: SetCollection },
    Sets(SetCollection),
}

impl EncodeInput {
    fn into_sets(self) -> SetCollection {
        match self {
            EncodeInput::Decoded { sets } | EncodeInput::Sets(sets) => sets,
        }
    }
}

/// Events from the file watcher
#[derive(Debug)]
enum WatchEvent {
    Changed,
    WatcherError(notify::Error),
}

/// Set up `env_logger` from the configured level; `RUST_LOG` still wins
pub fn init_logging(config: &Config) {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();
}

/// Run the configured subcommand
pub async fn run(config: Config) -> Result<ExitCode> {
    if let Some(path) = &config.config_file {
        log::debug!("Using config file {}", path.display());
    }

    let encoder = Encoder::new(config.encode);

    match config.command.clone() {
        Command::Decode {
            input,
            pretty,
            output,
        } => {
            let source = read_input(input.as_deref()).await?;
            let result = decode(&source);
            report_diagnostics(&result.diagnostics);

            let json = if pretty {
                serde_json::to_string_pretty(&result)?
            } else {
                serde_json::to_string(&result)?
            };
            write_output(output.as_deref(), &format!("{}\n", json)).await?;
            Ok(exit_code(&result))
        }
        Command::Encode {
            input,
            view,
            output,
            ..
        } => {
            let json = read_input(input.as_deref()).await?;
            let sets = serde_json::from_str::<EncodeInput>(&json)
                .context("input is not a JSON set collection")?
                .into_sets();
            let sets = select_view(sets, config.effective_view(view.as_deref()));
            write_output(output.as_deref(), &encoder.encode(&sets)).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Preview {
            input,
            view,
            output,
            ..
        } => {
            let source = read_input(input.as_deref()).await?;
            let (rendered, result) =
                render_preview(&source, &encoder, config.effective_view(view.as_deref()));
            write_output(output.as_deref(), &rendered).await?;
            Ok(exit_code(&result))
        }
        Command::Modes { input } => {
            let source = read_input(input.as_deref()).await?;
            let listing: String = detect_modes(&source)
                .iter()
                .map(|(mode, option)| format!("{} = {}\n", mode, option))
                .collect();
            write_output(None, &listing).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Watch { input, view, .. } => {
            watch(&input, &encoder, config.effective_view(view.as_deref())).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Decode, log diagnostics and re-encode the selected view
fn render_preview(
    source: &str,
    encoder: &Encoder,
    view: Option<String>,
) -> (String, DecodeResult) {
    let result = decode(source);
    report_diagnostics(&result.diagnostics);
    let sets = select_view(result.sets.clone(), view);
    (encoder.encode(&sets), result)
}

fn select_view(sets: SetCollection, view: Option<String>) -> SetCollection {
    match view {
        Some(base) => {
            let selected = sets.view(&base);
            if selected.is_empty() {
                log::warn!("No sets found for \"{}\"", base);
            }
            selected
        }
        None => sets,
    }
}

fn report_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        let location = diagnostic.path.as_deref().unwrap_or("<source>");
        match diagnostic.severity {
            Severity::Success => log::info!("{}: {}", location, diagnostic.message),
            Severity::Warning => log::warn!("{}: {}", location, diagnostic.message),
            Severity::Error => log::error!("{}: {}", location, diagnostic.message),
        }
    }
}

fn exit_code(result: &DecodeResult) -> ExitCode {
    if result.is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Read a file, or stdin for `None` / `-`
async fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading {}", path.display())),
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("reading stdin")?;
            Ok(buffer)
        }
    }
}

/// Write to a file, or stdout for `None`
async fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => tokio::fs::write(path, text)
            .await
            .with_context(|| format!("writing {}", path.display())),
        None => {
            print!("{}", text);
            Ok(())
        }
    }
}

/// Print the preview, then again after every change to `input`
async fn watch(input: &Path, encoder: &Encoder, view: Option<String>) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let file_name = input
        .file_name()
        .map(|name| name.to_os_string())
        .with_context(|| format!("{} is not a file path", input.display()))?;

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<Event, notify::Error>| match res {
            Ok(event) => {
                if let EventKind::Create(_) | EventKind::Modify(_) = event.kind {
                    if event
                        .paths
                        .iter()
                        .any(|path| path.file_name() == Some(file_name.as_os_str()))
                    {
                        let _ = tx.send(WatchEvent::Changed);
                    }
                }
            }
            Err(e) => {
                let _ = tx.send(WatchEvent::WatcherError(e));
            }
        },
        notify::Config::default().with_poll_interval(Duration::from_secs(1)),
    )?;

    // Editors often replace the file, so watch its directory
    let dir = watch_dir(input);
    watcher
        .watch(&dir, RecursiveMode::NonRecursive)
        .with_context(|| format!("watching {}", dir.display()))?;
    log::info!("Watching {}", input.display());

    print_watch_preview(input, encoder, view.as_deref()).await?;

    while let Some(event) = rx.recv().await {
        match event {
            WatchEvent::Changed => {
                tokio::time::sleep(WATCH_DEBOUNCE).await;
                while let Ok(WatchEvent::Changed) = rx.try_recv() {}

                if let Err(e) = print_watch_preview(input, encoder, view.as_deref()).await {
                    log::error!("{:#}", e);
                }
            }
            WatchEvent::WatcherError(e) => log::error!("File watcher error: {}", e),
        }
    }

    Ok(())
}

async fn print_watch_preview(input: &Path, encoder: &Encoder, view: Option<&str>) -> Result<()> {
    let source = read_input(Some(input)).await?;
    let (rendered, _) = render_preview(&source, encoder, view.map(str::to_string));
    let title = view.unwrap_or("all sets");
    write_output(None, &format!("-- preview ({})\n{}\n", title, rendered)).await
}

fn watch_dir(input: &Path) -> PathBuf {
    match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_input_accepts_both_shapes() {
        let bare = r#"{"idle":{"main":"Excalibur"}}"#;
        let full = r#"{"sets":{"idle":{"main":"Excalibur"}},"diagnostics":[]}"#;

        let from_bare = serde_json::from_str::<EncodeInput>(bare)
            .expect("bare sets")
            .into_sets();
        let from_full = serde_json::from_str::<EncodeInput>(full)
            .expect("decode output")
            .into_sets();

        assert_eq!(from_bare, from_full);
        assert!(from_bare.contains("idle"));
    }

    #[test]
    fn test_render_preview_normalizes() {
        let source = "sets.idle = { left_ring = 'Defending Ring', main = \"Excalibur\" }";
        let (rendered, result) = render_preview(source, &Encoder::default(), None);
        assert!(result.is_valid());
        assert_eq!(
            rendered,
            "sets.idle = {\n    main = \"Excalibur\",\n    ring1 = \"Defending Ring\",\n}\n"
        );
    }

    #[test]
    fn test_select_view() {
        let result = decode("sets.idle = {}\nsets.idle.Town = {}\nsets.engaged = {}");
        let selected = select_view(result.sets, Some("idle".to_string()));
        assert_eq!(selected.paths().collect::<Vec<_>>(), vec!["idle", "idle.Town"]);
    }

    #[test]
    fn test_watch_dir_for_bare_file_name() {
        assert_eq!(watch_dir(Path::new("job.lua")), PathBuf::from("."));
        assert_eq!(watch_dir(Path::new("data/job.lua")), PathBuf::from("data"));
    }
}
