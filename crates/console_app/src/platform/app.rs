use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use chrono::Local;
use console_core::{update, DemoSession, Msg};
use console_engine::ReqwestBackend;
use console_logging::{console_info, console_warn};

use super::config::ConsoleConfig;
use super::effects::EffectRunner;
use super::ui;
use super::ui::input::Command;

/// How long the loop waits for keyboard input before checking engine events.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

pub fn run_app(config: ConsoleConfig) -> anyhow::Result<()> {
    console_info!("Starting demo console against {}", config.base_url);
    let backend = ReqwestBackend::new(config.backend_settings())?;
    let runner = EffectRunner::new(Arc::new(backend))?;

    let (line_tx, line_rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });

    let mut console = Console {
        state: DemoSession::with_settings(config.ticker_settings()),
        runner,
    };
    println!(
        "Demo console session started {}. Type :help for commands.",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    console.draw();

    loop {
        match line_rx.recv_timeout(POLL_INTERVAL) {
            Ok(line) => {
                let current_input = console.state.view().chat.input;
                match ui::input::parse_line(&line, &current_input) {
                    Ok(Command::Dispatch(msgs)) => {
                        for msg in msgs {
                            console.dispatch(msg);
                        }
                    }
                    Ok(Command::Help) => println!("{}", ui::input::HELP),
                    Ok(Command::Quit) => break,
                    Err(message) => println!("{message}"),
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }

        while let Some(msg) = console.runner.poll() {
            console.dispatch(msg);
        }
        if console.state.consume_dirty() {
            console.draw();
        }
    }

    console_info!("Demo console closed");
    Ok(())
}

struct Console {
    state: DemoSession,
    runner: EffectRunner,
}

impl Console {
    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.run(effects);
    }

    fn draw(&self) {
        let frame = ui::render::render(&self.state.view());
        let mut stdout = io::stdout().lock();
        if let Err(err) = stdout
            .write_all(frame.as_bytes())
            .and_then(|()| stdout.flush())
        {
            console_warn!("Failed to draw frame: {}", err);
        }
    }
}
