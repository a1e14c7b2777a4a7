use clap::Parser;
use roulette::app::App;
use roulette::config;
use roulette::engine::SpinEngine;
use roulette::events::AppEvent;
use roulette::store::ItemStore;
use roulette::sys::animator::ChannelAnimator;
use roulette::sys::runtime;
use roulette::sys::server::DEFAULT_SOCKET_PATH;
use spindle::RandomTurns;
use std::path::PathBuf;

#[derive(Parser)]
#[command(about = "Spin a wheel of items and let the pointer pick a winner")]
struct Cli {
    /// Item titles, overriding the configured seed list
    items: Vec<String>,

    /// Number of spins to run before exiting
    #[arg(long, default_value_t = 1)]
    spins: u32,

    /// Keep running and accept commands on the control socket
    #[arg(long)]
    listen: bool,

    /// Control socket path
    #[arg(long, default_value = DEFAULT_SOCKET_PATH)]
    socket: PathBuf,

    /// Write the default config file and exit
    #[arg(long)]
    init_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.init_config {
        let (path, wrote) = config::write_default_config()?;
        if wrote {
            println!("wrote {}", path.display());
        } else {
            println!("{} exists, left untouched", path.display());
        }
        return Ok(());
    }

    let cfg = config::load_or_setup();
    let settings = cfg.spin_settings()?;

    let mut store = ItemStore::new();
    if cli.items.is_empty() {
        for item in &cfg.items {
            let _ = match item.hue {
                Some(hue) => store.add_with_hue(&item.title, hue),
                None => store.add(&item.title),
            };
        }
    } else {
        for title in &cli.items {
            store.add(title);
        }
    }

    if cli.spins == 0 && !cli.listen {
        log::warn!("nothing to do: --spins 0 without --listen");
        return Ok(());
    }

    let (tx, rx) = async_channel::bounded(32);

    let engine = SpinEngine::new(
        settings,
        Box::new(RandomTurns::new()),
        Box::new(ChannelAnimator::new(tx.clone())),
    );
    let app = App::new(store, engine, cli.spins, cli.listen);

    // Start Background Services
    //
    // One-shot runs never read the control socket or the config watcher, so
    // they must not touch (and possibly unlink) a listening instance's socket.
    if cli.listen {
        runtime::start_background_services(tx.clone(), cli.socket.clone());
    }

    if cli.spins > 0 {
        tx.send_blocking(AppEvent::Spin)?;
    }

    runtime::run_event_loop(app, rx)
}
