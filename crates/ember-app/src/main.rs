mod commands;
mod render;

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use ember_client::projection::Screen;
use ember_client::{ClientConfig, HttpApi, Notifier, Orchestrator};

use crate::commands::{Command, HELP};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Logs go to stderr so they don't interleave with the screen.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ember=info,ember_client=info".into()),
        )
        .init();

    let config = ClientConfig::from_env();
    let api = Arc::new(HttpApi::new(&config)?);
    let (notifier, mut notices) = Notifier::channel();
    let orchestrator = Orchestrator::new(api, notifier);
    info!("Ember client talking to {}", config.api_url);

    // Verbs run as tasks; each reports here when it settles so the screen
    // is redrawn even for verbs that finish without a notice.
    let (settled_tx, mut settled_rx) = mpsc::unbounded_channel::<&'static str>();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    redraw(&orchestrator).await;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match Command::parse(&line) {
                    Ok(Command::Quit) => break,
                    Ok(command) => dispatch(&orchestrator, command, &settled_tx).await,
                    Err(e) => println!("{}", e),
                }
            }
            Some(notice) = notices.recv() => {
                println!("{}", render::notice(&notice));
                redraw(&orchestrator).await;
            }
            Some(verb) = settled_rx.recv() => {
                debug!("{} settled", verb);
                redraw(&orchestrator).await;
            }
        }
    }

    Ok(())
}

async fn redraw(orchestrator: &Orchestrator) {
    let screen = Screen::project(orchestrator.context()).await;
    print!("\n{}", render::screen(&screen));
}

/// Run `verb` in the background and report back on `settled` when it ends.
fn spawn_verb<F>(verb: &'static str, settled: &mpsc::UnboundedSender<&'static str>, fut: F)
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let settled = settled.clone();
    tokio::spawn(async move {
        fut.await;
        let _ = settled.send(verb);
    });
}

async fn dispatch(
    orchestrator: &Orchestrator,
    command: Command,
    settled: &mpsc::UnboundedSender<&'static str>,
) {
    let ctx = orchestrator.context();
    match command {
        Command::Help => println!("{}", HELP),
        Command::Quit => {}
        Command::Register {
            username,
            first_name,
        } => {
            let o = orchestrator.clone();
            spawn_verb("register", settled, async move {
                let _ = o.register(&username, &first_name).await;
            });
        }
        Command::Invite(None) => {
            if orchestrator.open_invite().await {
                redraw(orchestrator).await;
            }
        }
        Command::Invite(Some(username)) => {
            if ctx.session.user().await.is_none() {
                println!("register first");
                return;
            }
            // Inviting from the list goes through the form, as a tap would.
            orchestrator.open_invite().await;
            ctx.drafts.set_invite_username(username.clone()).await;
            let o = orchestrator.clone();
            spawn_verb("invite", settled, async move {
                let _ = o.invite(&username).await;
            });
        }
        Command::Open(n) => {
            let id = ctx.cache.streaks().await.get(n - 1).map(|s| s.id);
            let selected = match id {
                Some(id) => orchestrator.select_streak(id).await,
                None => None,
            };
            match selected {
                Some(_) => redraw(orchestrator).await,
                None => println!("no streak #{}", n),
            }
        }
        Command::Back => {
            orchestrator.back().await;
            redraw(orchestrator).await;
        }
        Command::Send(text) => {
            let Some(streak_id) = ctx.cache.selected_id().await else {
                println!("open a streak first");
                return;
            };
            if let Some(text) = text {
                ctx.drafts.set_message_text(text).await;
            }
            let o = orchestrator.clone();
            spawn_verb("send_message", settled, async move {
                let _ = o.send_draft(streak_id).await;
            });
        }
        Command::Restore => {
            let Some(streak) = ctx.cache.selected().await else {
                println!("open a streak first");
                return;
            };
            if !streak.can_restore() {
                println!("no restores left for this streak");
                return;
            }
            let o = orchestrator.clone();
            spawn_verb("restore_streak", settled, async move {
                let _ = o.restore_streak(streak.id).await;
            });
        }
        Command::Refresh => {
            let o = orchestrator.clone();
            spawn_verb("refresh", settled, async move {
                o.refresh().await;
            });
        }
        Command::Check => {
            let o = orchestrator.clone();
            spawn_verb("check_daily", settled, async move {
                match o.check_daily().await {
                    Ok(check) => println!("{} streak(s) lapsed since yesterday", check.expired_count),
                    Err(e) => warn!("daily check failed: {}", e),
                }
            });
        }
    }
}
