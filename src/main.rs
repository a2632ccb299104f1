// SPDX-License-Identifier: MPL-2.0
use pfp_editor::app::{paths, App, Flags, Message};
use pfp_editor::editor::{CanvasMessage, ToolbarMessage};
use pfp_editor::media::HatAsset;
use pfp_editor::notifications::Severity;
use std::path::PathBuf;
use std::process::ExitCode;

const HELP: &str = "\
Put a hat on a profile picture and export it as PNG.

USAGE:
  pfp_editor [OPTIONS] [IMAGE]

OPTIONS:
  -h, --help              Print this help
      --lang <LOCALE>     Interface language (e.g. en-US, fr)
      --data-dir <DIR>    Directory for local storage
      --config-dir <DIR>  Directory containing settings.toml
      --pick              Choose the photo with a file dialog
      --hat <NAME>        beanie, party or crown
      --fit               Fit the hat to the head
      --reset             Reset the hat transform
      --move <DX,DY>      Drag the hat by DX,DY box units
      --resize <DW,DH>    Resize the hat by DW,DH box units
      --lock-aspect       Keep the hat's width/height ratio while resizing
      --rotate <DEG>      Rotate the hat by DEG degrees
      --undo <N>          Undo N steps
      --redo <N>          Redo N steps
      --share             Share instead of only exporting
      --no-export         Skip writing the PNG
      --diagnostics <FILE>  Write a diagnostics report as JSON
";

/// Editing steps requested on the command line, applied in a fixed order.
#[derive(Debug, Default)]
struct Script {
    pick: bool,
    hat: Option<HatAsset>,
    reset: bool,
    fit: bool,
    drag: Option<(f32, f32)>,
    resize: Option<(f32, f32)>,
    lock_aspect: bool,
    rotate: Option<f32>,
    undo: usize,
    redo: usize,
    share: bool,
    export: bool,
    diagnostics: Option<PathBuf>,
}

fn parse_pair(value: &str) -> Result<(f32, f32), String> {
    let (a, b) = value
        .split_once(',')
        .ok_or_else(|| format!("expected two comma-separated numbers, got '{value}'"))?;
    let a = a.trim().parse::<f32>().map_err(|e| e.to_string())?;
    let b = b.trim().parse::<f32>().map_err(|e| e.to_string())?;
    Ok((a, b))
}

fn parse_args(mut args: pico_args::Arguments) -> Result<(Flags, Script), pico_args::Error> {
    let mut flags = Flags {
        lang: args.opt_value_from_str("--lang")?,
        data_dir: args.opt_value_from_str("--data-dir")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
        ..Flags::default()
    };
    let script = Script {
        pick: args.contains("--pick"),
        hat: args.opt_value_from_str("--hat")?,
        reset: args.contains("--reset"),
        fit: args.contains("--fit"),
        drag: args.opt_value_from_fn("--move", parse_pair)?,
        resize: args.opt_value_from_fn("--resize", parse_pair)?,
        lock_aspect: args.contains("--lock-aspect"),
        rotate: args.opt_value_from_str("--rotate")?,
        undo: args.opt_value_from_str("--undo")?.unwrap_or(0),
        redo: args.opt_value_from_str("--redo")?.unwrap_or(0),
        share: args.contains("--share"),
        export: !args.contains("--no-export"),
        diagnostics: args.opt_value_from_str("--diagnostics")?,
    };
    flags.file_path = args
        .finish()
        .into_iter()
        .next()
        .and_then(|s| s.into_string().ok());
    Ok((flags, script))
}

fn pick_photo() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .add_filter(
            "Images",
            &["png", "jpg", "jpeg", "gif", "webp", "bmp", "tiff", "ico", "svg"],
        )
        .pick_file()
}

/// Prints and clears pending notifications. Returns whether any was an error.
///
/// Called after every step so timed notifications are shown before they expire.
fn print_notifications(app: &mut App) -> bool {
    let notifications = app.notifications_mut().drain();
    let mut failed = false;
    for notification in &notifications {
        failed |= notification.severity() == Severity::Error;
        println!(
            "[{}] {}",
            notification.severity().label(),
            app.notification_text(notification)
        );
    }
    failed
}

fn apply_script(app: &mut App, script: &Script) -> bool {
    let mut messages: Vec<Message> = Vec::new();
    if let Some(hat) = script.hat {
        messages.push(ToolbarMessage::SelectHat(hat).into());
    }
    if script.lock_aspect {
        messages.push(ToolbarMessage::LockAspect(true).into());
    }
    if script.reset {
        messages.push(ToolbarMessage::Reset.into());
    }
    if script.fit {
        messages.push(ToolbarMessage::FitToHead.into());
    }
    if let Some((dx, dy)) = script.drag {
        messages.push(CanvasMessage::DragStarted.into());
        messages.push(CanvasMessage::DragMoved { dx, dy }.into());
        messages.push(CanvasMessage::GestureEnded.into());
    }
    if let Some((dw, dh)) = script.resize {
        messages.push(CanvasMessage::ResizeStarted.into());
        messages.push(CanvasMessage::ResizeMoved { dw, dh }.into());
        messages.push(CanvasMessage::GestureEnded.into());
    }
    if let Some(degrees) = script.rotate {
        messages.push(ToolbarMessage::RotateBy(degrees).into());
    }
    messages.extend((0..script.undo).map(|_| ToolbarMessage::Undo.into()));
    messages.extend((0..script.redo).map(|_| ToolbarMessage::Redo.into()));
    if script.export {
        messages.push(ToolbarMessage::Download.into());
    }
    if script.share {
        messages.push(ToolbarMessage::Share.into());
    }

    let mut failed = false;
    for message in messages {
        app.update(message);
        failed |= print_notifications(app);
    }
    failed
}

#[tokio::main]
async fn main() -> ExitCode {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return ExitCode::SUCCESS;
    }

    let (mut flags, script) = match parse_args(args) {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            return ExitCode::from(2);
        }
    };

    paths::init_cli_overrides(flags.data_dir.clone(), flags.config_dir.clone());

    if script.pick && flags.file_path.is_none() {
        flags.file_path = pick_photo().map(|path| path.display().to_string());
    }

    let mut app = App::new(flags);
    app.run_until_idle().await;
    let mut failed = print_notifications(&mut app);

    if app.editor().image().is_some() {
        failed |= apply_script(&mut app, &script);
        app.run_until_idle().await;
        failed |= print_notifications(&mut app);
    } else if !failed {
        eprintln!("No photo given; nothing to export.");
    }

    let t = app.editor().transform();
    println!(
        "hat {} at ({:.1}, {:.1}) size {:.1}x{:.1} rotation {:.1}",
        app.editor().hat(),
        t.x,
        t.y,
        t.width,
        t.height,
        t.rotation
    );

    if let Some(path) = &script.diagnostics {
        if let Err(err) = app.export_diagnostics(path) {
            eprintln!("[ERROR] diagnostics export failed: {err}");
            failed = true;
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

