use crate::events::AppEvent;
use async_channel::Sender;
use spindle::ItemId;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::{UnixListener, UnixStream};

pub const DEFAULT_SOCKET_PATH: &str = "/tmp/roulette.sock";

/// Serves the line-oriented control protocol on a Unix socket. Each line is
/// one command; unrecognized lines are logged and dropped.
pub async fn run_server(tx: Sender<AppEvent>, path: PathBuf) {
    let Some(listener) = bind_socket(&path).await else {
        return;
    };
    log::info!("control socket listening on {}", path.display());

    loop {
        match listener.accept().await {
            Ok((mut stream, _)) => {
                let tx = tx.clone();
                tokio::spawn(async move {
                    let reader = BufReader::new(&mut stream);
                    let mut lines = reader.lines();

                    while let Ok(Some(line)) = lines.next_line().await {
                        match parse_command(line.trim()) {
                            Some(event) => {
                                if tx.send(event).await.is_err() {
                                    return;
                                }
                            }
                            None => log::warn!("unrecognized control command: {line:?}"),
                        }
                    }
                });
            }
            Err(e) => {
                log::error!("Failed to accept connection: {e}");
            }
        }
    }
}

/// Binds the control socket, clearing a stale path left behind by a dead
/// instance. A path another instance is actively serving is left alone.
async fn bind_socket(path: &Path) -> Option<UnixListener> {
    if std::fs::metadata(path).is_ok() {
        if UnixStream::connect(path).await.is_ok() {
            log::error!("{} is already served by another instance", path.display());
            return None;
        }
        let _ = std::fs::remove_file(path);
    }

    match UnixListener::bind(path) {
        Ok(l) => Some(l),
        Err(e) => {
            log::error!("Failed to bind control socket {}: {e}", path.display());
            None
        }
    }
}

/// Commands: `spin`, `list`, `quit`, `add <title>`, `remove <id>`,
/// `rename <id> <title>`, `replace <title>|<title>|...`.
fn parse_command(line: &str) -> Option<AppEvent> {
    let (verb, rest) = line
        .split_once(' ')
        .map(|(verb, rest)| (verb, rest.trim()))
        .unwrap_or((line, ""));

    match verb {
        "spin" => Some(AppEvent::Spin),
        "list" => Some(AppEvent::List),
        "quit" => Some(AppEvent::Quit),
        "add" if !rest.is_empty() => Some(AppEvent::AddItem(rest.to_owned())),
        "remove" => {
            let id = rest.parse::<u64>().ok()?;
            Some(AppEvent::RemoveItem(ItemId::from(id)))
        }
        "rename" => {
            let (id, title) = rest.split_once(' ')?;
            let id = id.trim().parse::<u64>().ok()?;
            Some(AppEvent::RenameItem(ItemId::from(id), title.trim().to_owned()))
        }
        "replace" => Some(AppEvent::ReplaceItems(
            rest.split('|')
                .map(|title| title.trim().to_owned())
                .filter(|title| !title.is_empty())
                .collect(),
        )),
        _ => None,
    }
}
