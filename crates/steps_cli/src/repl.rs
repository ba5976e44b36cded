use crate::config::ReportConfig;
use crate::output::print_records;
use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use steps_engine::solve;

/// Line-oriented interactive loop: every line is a batch of one, with a
/// few `:commands` to flip report options on the fly.
pub fn run(mut config: ReportConfig) -> Result<()> {
    let mut editor = DefaultEditor::new()?;

    println!("stepsolve — type a math problem, :help for commands, :quit to exit");
    loop {
        match editor.readline("> ") {
            Ok(line) => {
                let line = line.trim().to_string();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(&line);

                if let Some(command) = line.strip_prefix(':') {
                    if !handle_command(command, &mut config) {
                        break;
                    }
                    continue;
                }

                let records = solve(&line);
                print_records(&records, &config)?;
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Returns false when the loop should stop.
fn handle_command(command: &str, config: &mut ReportConfig) -> bool {
    match command.trim() {
        "quit" | "q" | "exit" => return false,
        "markdown" => {
            config.markdown = !config.markdown;
            println!("markdown output: {}", config.markdown);
        }
        "json" => {
            config.json = !config.json;
            println!("json output: {}", config.json);
        }
        "steps" => {
            config.show_steps = !config.show_steps;
            println!("step traces: {}", config.show_steps);
        }
        "save" => match config.save() {
            Ok(()) => println!("saved report.toml"),
            Err(e) => eprintln!("could not save config: {}", e),
        },
        "help" => {
            println!(":markdown  toggle Markdown output");
            println!(":json      toggle JSON output");
            println!(":steps     toggle step traces");
            println!(":save      persist the current options to report.toml");
            println!(":quit      exit");
        }
        other => println!("unknown command ':{}' (try :help)", other),
    }
    true
}
