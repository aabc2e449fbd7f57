use std::io::{self, Write};

use super::{ScriptedClicks, TerminalDisplay};
use crate::BoardDisplay;
use crate::controller::{ClickError, ClickOutcome, ControllerEvent, MoveController};
use crate::rules::ShakmatyRules;

/// Clears the screen and moves cursor to top-left.
#[inline]
fn clear_screen() {
    print!("\x1B[2J\x1B[H");
}

/// Runs an interactive terminal session standing in for the board window.
///
/// Pointer clicks are entered as pixel coordinates or square names and
/// go through the same controller a windowed front end would use.
pub fn run_interactive_terminal() {
    let mut controller = MoveController::new();
    let mut display = TerminalDisplay::new();
    let mut messages: Vec<String> = Vec::new();

    redraw(&mut display, &controller, &messages);

    loop {
        print!("> ");
        if let Err(e) = io::stdout().flush() {
            log::error!("failed to flush stdout: {e}");
            break;
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                log::error!("failed to read input: {e}");
                break;
            }
        }

        let parts: Vec<&str> = input.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }
        messages.clear();

        match parts[0] {
            "c" => match (parts.get(1), parts.get(2)) {
                (Some(x), Some(y)) => match (x.parse::<i32>(), y.parse::<i32>()) {
                    (Ok(x), Ok(y)) => {
                        let result = controller.handle_pointer(x, y);
                        messages.push(describe(result));
                    }
                    _ => messages.push("Coordinates must be integers".to_string()),
                },
                _ => messages.push("Usage: c <x> <y>".to_string()),
            },
            "s" => {
                let mut clicks = ScriptedClicks::new();
                match clicks.push_script(&parts[1..].join(" ")) {
                    Ok(()) if clicks.is_empty() => {
                        messages.push("Usage: s <square>...".to_string())
                    }
                    Ok(()) => clicks.drain(|square| {
                        messages.push(describe(controller.handle_click(square)));
                    }),
                    Err(e) => messages.push(format!("❌ {e}")),
                }
            }
            "load" => {
                let fen = input.trim_start().trim_start_matches("load").trim();
                let rules = if fen.is_empty() || fen == "startpos" {
                    Ok(ShakmatyRules::new())
                } else {
                    ShakmatyRules::from_fen(fen)
                };
                match rules {
                    Ok(rules) => {
                        let geometry = *controller.geometry();
                        controller = MoveController::with_engine(rules, geometry);
                        messages.push("✅ Position loaded from FEN".to_string());
                    }
                    Err(e) => messages.push(format!("❌ {e}")),
                }
            }
            "n" => {
                controller.reset();
                messages.push("🔄 New game".to_string());
            }
            "p" => {}
            "q" => break,
            _ => messages.push("Unknown command".to_string()),
        }

        for event in controller.drain_events() {
            match event {
                ControllerEvent::GameOver(status) => messages.push(format!("🏁 {status}")),
                ControllerEvent::MoveRejected(mv) => messages.push(format!("Illegal move {mv}")),
                ControllerEvent::SnapshotChanged(_) | ControllerEvent::SelectionChanged(_) => {}
            }
        }

        redraw(&mut display, &controller, &messages);
    }
}

/// One-line summary of a click result.
fn describe(result: Result<ClickOutcome, ClickError>) -> String {
    match result {
        Ok(ClickOutcome::Ignored) => "Nothing to select there".to_string(),
        Ok(ClickOutcome::Selected(square)) => format!("Selected {square}"),
        Ok(ClickOutcome::Deselected(square)) => format!("Deselected {square}"),
        Ok(ClickOutcome::Moved { mv, .. }) => format!("Played {mv}"),
        Err(ClickError::IllegalMove(_)) => "Selection cleared".to_string(),
        Err(e @ ClickError::GameOver(_)) => e.to_string(),
    }
}

/// Draws the complete interface: help text, board and last messages.
fn redraw(display: &mut TerminalDisplay, controller: &MoveController, messages: &[String]) {
    clear_screen();
    println!("♟️  Click Chess");
    println!();
    println!(
        "Commands: c <x> <y> | s <square>... | n (new game) | load <fen> | p (refresh) | q (quit)"
    );
    println!();

    if let Err(e) = display.show(&controller.frame()) {
        log::error!("{e}");
    }

    println!();
    for message in messages {
        println!("{message}");
    }
}
