use crate::app::App;
use crate::events::AppEvent;
use async_channel::{Receiver, Sender};
use std::path::PathBuf;
use std::thread;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

/// Spawns the control socket and the config watcher on their own thread and
/// runtime, feeding the main event loop through the channel.
pub fn start_background_services(tx: Sender<AppEvent>, socket_path: PathBuf) {
    thread::spawn(move || {
        let rt = Runtime::new().expect("Failed to create Tokio runtime");

        rt.block_on(async {
            {
                let tx = tx.clone();
                tokio::spawn(async move {
                    crate::sys::server::run_server(tx, socket_path).await;
                });
            }

            {
                let tx = tx.clone();
                tokio::spawn(async move {
                    crate::config::run_async_watcher(tx).await;
                });
            }

            std::future::pending::<()>().await;
        });
    });
}

/// Runs the app's event loop on a current-thread runtime. Spin completions
/// are timer tasks on the local set, so every engine call happens on this
/// one logical thread.
pub fn run_event_loop(mut app: App, rx: Receiver<AppEvent>) -> anyhow::Result<()> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let local = LocalSet::new();

    local.block_on(&rt, async move {
        while let Ok(event) = rx.recv().await {
            if !app.update(event) {
                break;
            }
        }
    });

    Ok(())
}
